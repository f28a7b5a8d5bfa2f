//! The ordered in-memory collection of expenses.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Expense;

/// Ordered sequence of expense records, newest first. Ordering affects only
/// display; aggregation never depends on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Inserts a record at the front of the sequence.
    pub fn prepend(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.insert(0, expense);
        id
    }

    /// Removes all records whose ids match, preserving the relative order of
    /// the survivors. Returns the number of records removed.
    pub fn remove_ids(&mut self, ids: &HashSet<Uuid>) -> usize {
        let before = self.expenses.len();
        self.expenses.retain(|expense| !ids.contains(&expense.id));
        before - self.expenses.len()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
