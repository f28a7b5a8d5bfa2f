//! Pure aggregation functions over a ledger snapshot.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{Category, Expense};

/// Grouping key for a calendar day, `YYYY-MM-DD`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Grouping key for an ISO week, e.g. `2025-W21`.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Grouping key for a calendar month, e.g. `2025-5` (unpadded).
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}

/// Grouping key for a calendar year.
pub fn year_key(date: NaiveDate) -> String {
    date.year().to_string()
}

/// Stateless aggregation over `&[Expense]`. Every function is a linear scan;
/// categories or periods with no expenses are absent from the results, and
/// empty input sums to zero.
pub struct StatsService;

impl StatsService {
    pub fn total_by_category(expenses: &[Expense]) -> BTreeMap<Category, Decimal> {
        let mut totals = BTreeMap::new();
        for expense in expenses {
            *totals.entry(expense.category).or_insert(Decimal::ZERO) += expense.amount;
        }
        totals
    }

    pub fn total_by_day(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
        Self::total_by_key(expenses, day_key)
    }

    pub fn total_by_week(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
        Self::total_by_key(expenses, week_key)
    }

    pub fn total_by_month(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
        Self::total_by_key(expenses, month_key)
    }

    pub fn total_by_year(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
        Self::total_by_key(expenses, year_key)
    }

    /// Sum over expenses in the same ISO week as `reference`.
    pub fn total_for_week(expenses: &[Expense], reference: NaiveDate) -> Decimal {
        let key = week_key(reference);
        expenses
            .iter()
            .filter(|expense| week_key(expense.date) == key)
            .map(|expense| expense.amount)
            .sum()
    }

    /// Sum over expenses in the same calendar month as `reference`.
    pub fn total_for_month(expenses: &[Expense], reference: NaiveDate) -> Decimal {
        let key = month_key(reference);
        expenses
            .iter()
            .filter(|expense| month_key(expense.date) == key)
            .map(|expense| expense.amount)
            .sum()
    }

    /// Sum over expenses in the ISO week before the one containing
    /// `reference`.
    pub fn total_for_previous_week(expenses: &[Expense], reference: NaiveDate) -> Decimal {
        Self::total_for_week(expenses, reference - Duration::days(7))
    }

    /// The category with the highest aggregated sum. Ties break toward the
    /// earlier variant in declaration order.
    pub fn top_category(expenses: &[Expense]) -> Option<(Category, Decimal)> {
        max_entry(Self::total_by_category(expenses))
    }

    /// The day with the highest aggregated sum. Ties break toward the
    /// lexicographically smaller day key.
    pub fn top_day(expenses: &[Expense]) -> Option<(String, Decimal)> {
        max_entry(Self::total_by_day(expenses))
    }

    pub fn total_spending(expenses: &[Expense]) -> Decimal {
        expenses.iter().map(|expense| expense.amount).sum()
    }

    fn total_by_key(
        expenses: &[Expense],
        key: fn(NaiveDate) -> String,
    ) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for expense in expenses {
            *totals.entry(key(expense.date)).or_insert(Decimal::ZERO) += expense.amount;
        }
        totals
    }
}

/// Scans in ascending key order and replaces only on a strictly greater sum,
/// so equal sums resolve to the smallest key.
fn max_entry<K: Ord>(totals: BTreeMap<K, Decimal>) -> Option<(K, Decimal)> {
    let mut best: Option<(K, Decimal)> = None;
    for (key, sum) in totals {
        match &best {
            Some((_, current)) if sum <= *current => {}
            _ => best = Some((key, sum)),
        }
    }
    best
}
