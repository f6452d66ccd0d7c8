pub mod database;

use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use tracing::{debug, info};

use crate::{
    errors::{PlannerError, Result},
    utils::{db_file_in, ensure_dir, resolve_root},
};

pub use database::{default_categories, Database, SCHEMA_VERSION};

const TMP_SUFFIX: &str = "tmp";

/// A record type persisted in one of the store's collections.
pub trait Stored: Clone {
    /// Borrowed key type used for lookups.
    type Key: PartialEq + fmt::Display + ?Sized;
    /// Human-readable label used in errors and logs.
    const ENTITY: &'static str;

    fn key(&self) -> &Self::Key;
    fn rows(db: &Database) -> &Vec<Self>;
    fn rows_mut(db: &mut Database) -> &mut Vec<Self>;
}

/// Handle to the planner's versioned store: one JSON document held in memory
/// and written through atomically on every mutation. Constructed explicitly
/// and handed to the services that need it.
pub struct Store {
    path: PathBuf,
    db: Mutex<Database>,
    created: bool,
    migrations: Vec<String>,
}

impl Store {
    /// Opens the store under the given data root (default root when `None`),
    /// seeding a fresh document or migrating an older one as needed.
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let root = resolve_root(root);
        ensure_dir(&root).map_err(|err| {
            PlannerError::Initialization(format!("cannot create data root: {}", err))
        })?;
        let path = db_file_in(&root);
        let (db, created, migrations) = load_or_seed(&path)?;
        Ok(Self {
            path,
            db: Mutex::new(db),
            created,
            migrations,
        })
    }

    /// Whether this open seeded a brand-new document.
    pub fn created(&self) -> bool {
        self.created
    }

    /// Migration notes recorded while opening an older document.
    pub fn migrations(&self) -> &[String] {
        &self.migrations
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get<R: Stored>(&self, key: &R::Key) -> Result<Option<R>> {
        let db = self.lock()?;
        Ok(R::rows(&db).iter().find(|row| row.key() == key).cloned())
    }

    pub fn get_all<R: Stored>(&self) -> Result<Vec<R>> {
        let db = self.lock()?;
        Ok(R::rows(&db).clone())
    }

    /// Inserts or replaces the record with the same key.
    pub fn put<R: Stored>(&self, record: R) -> Result<()> {
        self.commit(|db| {
            let rows = R::rows_mut(db);
            if let Some(position) = rows.iter().position(|row| row.key() == record.key()) {
                rows[position] = record;
            } else {
                rows.push(record);
            }
            Ok(())
        })
    }

    /// Removes the record; returns whether anything was there to remove.
    pub fn delete<R: Stored>(&self, key: &R::Key) -> Result<bool> {
        self.commit(|db| {
            let rows = R::rows_mut(db);
            let before = rows.len();
            rows.retain(|row| row.key() != key);
            Ok(rows.len() != before)
        })
    }

    /// Read-modify-write of a single record as one atomic unit. This is the
    /// path whole-category item edits go through.
    pub fn update<R: Stored, T>(
        &self,
        key: &R::Key,
        apply: impl FnOnce(&mut R) -> Result<T>,
    ) -> Result<T> {
        self.commit(|db| {
            let row = R::rows_mut(db)
                .iter_mut()
                .find(|row| row.key() == key)
                .ok_or_else(|| PlannerError::not_found(R::ENTITY, key.to_string()))?;
            apply(row)
        })
    }

    /// Writes a final snapshot and releases the handle.
    pub fn close(self) -> Result<()> {
        let guard = self.lock()?;
        persist(&self.path, &guard)?;
        debug!(path = %self.path.display(), "store closed");
        Ok(())
    }

    /// Runs a mutation against a scratch copy, persists that copy, and only
    /// then replaces the in-memory document. A failed write leaves both the
    /// file and the in-memory state untouched.
    fn commit<T>(&self, mutate: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut guard = self.lock()?;
        let mut scratch = guard.clone();
        let value = mutate(&mut scratch)?;
        persist(&self.path, &scratch)?;
        *guard = scratch;
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| PlannerError::Persistence("store lock poisoned".into()))
    }
}

fn load_or_seed(path: &Path) -> Result<(Database, bool, Vec<String>)> {
    if !path.exists() {
        let db = Database::seeded();
        persist(path, &db).map_err(|err| {
            PlannerError::Initialization(format!("cannot seed planner database: {}", err))
        })?;
        info!(path = %path.display(), "seeded planner database");
        return Ok((db, true, Vec::new()));
    }

    let data = fs::read_to_string(path).map_err(|err| {
        PlannerError::Initialization(format!("cannot read planner database: {}", err))
    })?;
    let mut db: Database = serde_json::from_str(&data).map_err(|err| {
        PlannerError::Initialization(format!("cannot parse planner database: {}", err))
    })?;
    if db.schema_version > SCHEMA_VERSION {
        return Err(PlannerError::Initialization(format!(
            "database schema v{} is newer than supported v{}",
            db.schema_version, SCHEMA_VERSION
        )));
    }

    let migrations = db.migrate();
    if !migrations.is_empty() {
        persist(path, &db).map_err(|err| {
            PlannerError::Initialization(format!("cannot write migrated database: {}", err))
        })?;
        for note in &migrations {
            info!(path = %path.display(), "{}", note);
        }
    }
    Ok((db, false, migrations))
}

fn persist(path: &Path, db: &Database) -> Result<()> {
    save_document(path, db).map_err(|err| PlannerError::Persistence(err.to_string()))
}

fn save_document(path: &Path, db: &Database) -> Result<()> {
    let json = serde_json::to_string_pretty(db)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
