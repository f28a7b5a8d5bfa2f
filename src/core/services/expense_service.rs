//! Business logic helpers for managing expenses.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::ledger_store::{ExpenseUpdate, LedgerStore};
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Category, Expense};

/// Pre-validation input for a new expense.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub photo: Option<Vec<u8>>,
}

/// Provides validated CRUD helpers for the expense ledger.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates the draft, stores the record at the front of the ledger,
    /// and returns the stored expense.
    pub fn add(store: &mut LedgerStore, draft: ExpenseDraft) -> ServiceResult<Expense> {
        let title = validate_title(&draft.title)?;
        validate_amount(draft.amount)?;
        let mut expense = Expense::new(title, draft.amount, draft.category, draft.date);
        expense.photo = draft.photo;
        store.add(expense.clone())?;
        Ok(expense)
    }

    /// Applies a validated field update. `Ok(false)` means the id was not
    /// found and nothing changed.
    pub fn update(store: &mut LedgerStore, id: Uuid, mut update: ExpenseUpdate) -> ServiceResult<bool> {
        if let Some(title) = update.title.take() {
            update.title = Some(validate_title(&title)?);
        }
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }
        Ok(store.update(id, update)?)
    }

    /// Removes the given ids, returning how many records were deleted.
    pub fn remove(store: &mut LedgerStore, ids: &HashSet<Uuid>) -> ServiceResult<usize> {
        Ok(store.delete(ids)?)
    }
}

fn validate_title(raw: &str) -> ServiceResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Invalid("title must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Decimal) -> ServiceResult<()> {
    if amount < Decimal::ZERO {
        return Err(ServiceError::Invalid(
            "amount must be zero or positive".into(),
        ));
    }
    Ok(())
}
