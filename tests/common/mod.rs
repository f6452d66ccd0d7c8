use studyabroad_core::{StatusOverlay, Store};
use tempfile::TempDir;

/// Creates an isolated planner environment backed by a unique directory.
/// Callers keep the [`TempDir`] guard alive for the duration of the test.
pub fn planner_env() -> (TempDir, Store, StatusOverlay) {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().to_path_buf();
    let store = Store::open(Some(root.clone())).expect("open planner store");
    let overlay = StatusOverlay::new(Some(root)).expect("open status overlay");
    (temp, store, overlay)
}
