pub mod json_store;

pub use json_store::JsonFileStore;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Minimal key-value storage abstraction. Values are JSON documents; the
/// typed layer above decides their shape.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Well-known keys in the application store.
pub mod keys {
    pub const EXPENSES: &str = "expenses";
    pub const MONTHLY_LIMIT: &str = "monthly_limit";
    pub const USERNAME: &str = "username";
    pub const LAST_ALERTED_PERIOD: &str = "last_alerted_period";
}
