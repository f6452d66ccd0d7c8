use std::sync::Once;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".studyabroad_core";
const DB_FILE: &str = "study_abroad_db.json";
const STATUS_FILE: &str = "scholarship_status.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("studyabroad_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.studyabroad_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("STUDYABROAD_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves an explicit data root, falling back to [`app_data_dir`].
pub fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

/// Path of the planner database file under the given data root.
pub fn db_file_in(root: &Path) -> PathBuf {
    root.join(DB_FILE)
}

/// Path of the scholarship status overlay file under the given data root.
pub fn status_file_in(root: &Path) -> PathBuf {
    root.join(STATUS_FILE)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins_over_default() {
        let root = PathBuf::from("/tmp/planner-root");
        assert_eq!(resolve_root(Some(root.clone())), root);
    }

    #[test]
    fn data_files_live_under_the_root() {
        let root = PathBuf::from("/tmp/planner-root");
        assert_eq!(db_file_in(&root), root.join("study_abroad_db.json"));
        assert_eq!(status_file_in(&root), root.join("scholarship_status.json"));
    }
}
