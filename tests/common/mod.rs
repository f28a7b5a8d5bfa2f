use expense_core::core::LedgerStore;
use expense_core::storage::JsonFileStore;
use tempfile::TempDir;

/// Creates an isolated temp directory for one test.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// Opens a ledger store backed by the given directory; reopening against
/// the same directory simulates an app restart.
pub fn open_store(temp: &TempDir) -> LedgerStore {
    let backend =
        JsonFileStore::new(Some(temp.path().to_path_buf())).expect("create json backend");
    LedgerStore::open(Box::new(backend))
}
