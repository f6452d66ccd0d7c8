use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{
    errors::{PlannerError, Result},
    ledger::StatusRecord,
    utils::{ensure_dir, resolve_root, status_file_in},
};

const TMP_SUFFIX: &str = "tmp";

/// Scholarship id to status record.
pub type StatusMap = BTreeMap<String, StatusRecord>;

/// File-backed scholarship status map, kept apart from the versioned store
/// and deliberately weaker in consistency: reads fail soft to an empty map,
/// writes replace the whole blob, and two near-simultaneous writers would be
/// last-write-wins.
pub struct StatusOverlay {
    path: PathBuf,
}

impl StatusOverlay {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = resolve_root(root);
        ensure_dir(&root)?;
        Ok(Self {
            path: status_file_in(&root),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full mapping. Absent or corrupt data yields an empty map rather
    /// than an error; corruption is logged and otherwise ignored.
    pub fn read(&self) -> StatusMap {
        if !self.path.exists() {
            return StatusMap::new();
        }
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %self.path.display(), "unreadable status overlay: {}", err);
                return StatusMap::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %self.path.display(), "corrupt status overlay ignored: {}", err);
                StatusMap::new()
            }
        }
    }

    /// Replaces the whole mapping in one atomic write.
    pub fn write(&self, map: &StatusMap) -> Result<()> {
        self.save(map)
            .map_err(|err| PlannerError::Persistence(err.to_string()))
    }

    pub fn record(&self, id: &str) -> Option<StatusRecord> {
        self.read().get(id).copied()
    }

    /// Read-modify-write of one entry against the current blob.
    pub fn set(&self, id: &str, record: StatusRecord) -> Result<()> {
        let mut map = self.read();
        map.insert(id.to_string(), record);
        self.write(&map)
    }

    /// Drops one entry; absent ids are a no-op that leaves the file alone.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut map = self.read();
        if map.remove(id).is_none() {
            return Ok(false);
        }
        self.write(&map)?;
        Ok(true)
    }

    fn save(&self, map: &StatusMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ScholarshipStatus;
    use tempfile::TempDir;

    fn temp_overlay() -> (TempDir, StatusOverlay) {
        let dir = TempDir::new().expect("temp dir");
        let overlay = StatusOverlay::new(Some(dir.path().to_path_buf())).expect("overlay");
        (dir, overlay)
    }

    #[test]
    fn absent_file_reads_as_empty() {
        let (_dir, overlay) = temp_overlay();
        assert!(overlay.read().is_empty());
        assert!(!overlay.path().exists(), "reading must not create the file");
    }

    #[test]
    fn set_then_read_round_trips() {
        let (_dir, overlay) = temp_overlay();
        overlay
            .set("3", StatusRecord::new(ScholarshipStatus::Awarded, Some(2500.0)))
            .expect("set awarded");
        overlay
            .set("custom-1-ab", StatusRecord::new(ScholarshipStatus::Applied, None))
            .expect("set applied");

        let map = overlay.read();
        assert_eq!(map.len(), 2);
        assert_eq!(map["3"].status, ScholarshipStatus::Awarded);
        assert_eq!(map["3"].awarded_amount, Some(2500.0));
        assert_eq!(map["custom-1-ab"].awarded_amount, None);
    }

    #[test]
    fn corrupt_blob_reads_as_empty() {
        let (_dir, overlay) = temp_overlay();
        overlay
            .set("1", StatusRecord::new(ScholarshipStatus::Applied, None))
            .expect("seed entry");
        fs::write(overlay.path(), "{broken").expect("corrupt the file");

        assert!(overlay.read().is_empty(), "corruption must fail soft");
    }

    #[test]
    fn remove_reports_presence_and_skips_writes_for_absent_ids() {
        let (_dir, overlay) = temp_overlay();
        assert!(!overlay.remove("9").expect("remove absent"));
        assert!(
            !overlay.path().exists(),
            "no-op removal must not create the file"
        );

        overlay
            .set("9", StatusRecord::new(ScholarshipStatus::Rejected, None))
            .expect("seed entry");
        assert!(overlay.remove("9").expect("remove present"));
        assert!(overlay.read().is_empty());
    }
}
