//! The ledger store: owns the in-memory ledger and re-persists the full
//! snapshot on every mutation.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Category, Expense};
use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::storage::{keys, KeyValueStore};

type Result<T> = std::result::Result<T, LedgerError>;

/// Field replacements for [`LedgerStore::update`]. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub photo: PhotoUpdate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PhotoUpdate {
    #[default]
    Keep,
    Clear,
    Set(Vec<u8>),
}

/// Owns the expense ledger plus the key-value backend holding its snapshot
/// and the independent `monthly_limit`/`username`/`last_alerted_period`
/// scalars. Every mutating call serializes and rewrites the full snapshot
/// synchronously; persistence failures are surfaced to the caller while the
/// in-memory state stays authoritative for the session.
pub struct LedgerStore {
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
}

impl LedgerStore {
    /// Loads the persisted snapshot. A missing key or an unreadable snapshot
    /// yields an empty ledger; decode failures are logged, not propagated.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let ledger = match store.get(keys::EXPENSES) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Expense>>(&raw) {
                Ok(expenses) => Ledger::from_expenses(expenses),
                Err(err) => {
                    tracing::warn!("discarding undecodable expense snapshot: {err}");
                    Ledger::new()
                }
            },
            Ok(None) => Ledger::new(),
            Err(err) => {
                tracing::warn!("failed to read expense snapshot: {err}");
                Ledger::new()
            }
        };
        Self { ledger, store }
    }

    pub fn expenses(&self) -> &[Expense] {
        self.ledger.expenses()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.ledger.expense(id)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Prepends the record and persists the snapshot.
    pub fn add(&mut self, expense: Expense) -> Result<Uuid> {
        let id = self.ledger.prepend(expense);
        self.persist()?;
        Ok(id)
    }

    /// Removes matching records, preserving the order of survivors, and
    /// persists the snapshot when anything was removed.
    pub fn delete(&mut self, ids: &HashSet<Uuid>) -> Result<usize> {
        let removed = self.ledger.remove_ids(ids);
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Replaces the supplied fields in place. Returns `Ok(false)` without
    /// touching storage when `id` is unknown.
    pub fn update(&mut self, id: Uuid, update: ExpenseUpdate) -> Result<bool> {
        let Some(expense) = self.ledger.expense_mut(id) else {
            return Ok(false);
        };
        if let Some(title) = update.title {
            expense.title = title;
        }
        if let Some(amount) = update.amount {
            expense.amount = amount;
        }
        if let Some(category) = update.category {
            expense.category = category;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        match update.photo {
            PhotoUpdate::Keep => {}
            PhotoUpdate::Clear => expense.photo = None,
            PhotoUpdate::Set(bytes) => expense.photo = Some(bytes),
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self.ledger.expenses())?;
        self.store.put(keys::EXPENSES, &json)
    }

    /// The configured monthly limit; `0` means "no limit". An unreadable
    /// value degrades to `0` with a warning.
    pub fn monthly_limit(&self) -> Decimal {
        match self.store.get(keys::MONTHLY_LIMIT) {
            Ok(Some(raw)) => match serde_json::from_str::<Decimal>(&raw) {
                Ok(limit) => limit,
                Err(err) => {
                    tracing::warn!("discarding undecodable monthly limit: {err}");
                    Decimal::ZERO
                }
            },
            Ok(None) => Decimal::ZERO,
            Err(err) => {
                tracing::warn!("failed to read monthly limit: {err}");
                Decimal::ZERO
            }
        }
    }

    pub fn set_monthly_limit(&self, limit: Decimal) -> Result<()> {
        if limit < Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                "monthly limit must be non-negative".into(),
            ));
        }
        self.store
            .put(keys::MONTHLY_LIMIT, &serde_json::to_string(&limit)?)
    }

    /// The logged-in user, if any. Empty means logged out.
    pub fn username(&self) -> Option<String> {
        match self.store.get(keys::USERNAME) {
            Ok(Some(raw)) => serde_json::from_str::<String>(&raw)
                .ok()
                .filter(|name| !name.is_empty()),
            _ => None,
        }
    }

    pub fn set_username(&self, name: &str) -> Result<()> {
        self.store.put(keys::USERNAME, &serde_json::to_string(name)?)
    }

    pub fn clear_username(&self) -> Result<()> {
        self.store.remove(keys::USERNAME)
    }

    /// Month key of the most recent limit alert, if any.
    pub fn last_alerted_period(&self) -> Option<String> {
        match self.store.get(keys::LAST_ALERTED_PERIOD) {
            Ok(Some(raw)) => serde_json::from_str::<String>(&raw).ok(),
            _ => None,
        }
    }

    pub fn set_last_alerted_period(&self, period: Option<&str>) -> Result<()> {
        match period {
            Some(key) => self
                .store
                .put(keys::LAST_ALERTED_PERIOD, &serde_json::to_string(key)?),
            None => self.store.remove(keys::LAST_ALERTED_PERIOD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStore;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (LedgerStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let backend = JsonFileStore::new(Some(temp.path().to_path_buf())).expect("backend");
        (LedgerStore::open(Box::new(backend)), temp)
    }

    fn expense(title: &str, amount: Decimal) -> Expense {
        Expense::new(
            title,
            amount,
            Category::Market,
            NaiveDate::from_ymd_opt(2025, 5, 16).unwrap(),
        )
    }

    #[test]
    fn add_persists_and_survives_reopen() {
        let (mut store, temp) = store_with_temp_dir();
        store.add(expense("Groceries", dec!(64.90))).expect("add");

        let backend = JsonFileStore::new(Some(temp.path().to_path_buf())).expect("backend");
        let reopened = LedgerStore::open(Box::new(backend));
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.expenses()[0].title, "Groceries");
        assert_eq!(reopened.expenses()[0].amount, dec!(64.90));
    }

    #[test]
    fn update_of_unknown_id_is_a_noop() {
        let (mut store, _guard) = store_with_temp_dir();
        store.add(expense("Coffee", dec!(5))).expect("add");
        let touched = store
            .update(Uuid::new_v4(), ExpenseUpdate::default())
            .expect("update");
        assert!(!touched);
        assert_eq!(store.expenses()[0].title, "Coffee");
    }

    #[test]
    fn monthly_limit_defaults_to_zero() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.monthly_limit(), Decimal::ZERO);
        store.set_monthly_limit(dec!(250)).expect("set limit");
        assert_eq!(store.monthly_limit(), dec!(250));
    }

    #[test]
    fn negative_limit_is_rejected() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.set_monthly_limit(dec!(-1)).is_err());
    }

    #[test]
    fn username_empty_means_logged_out() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.username().is_none());
        store.set_username("zehra").expect("set");
        assert_eq!(store.username().as_deref(), Some("zehra"));
        store.set_username("").expect("set empty");
        assert!(store.username().is_none());
    }
}
