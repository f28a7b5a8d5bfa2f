//! Monthly spending-limit monitoring.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::services::stats_service::{month_key, StatsService};
use crate::domain::Expense;
use crate::notify::{NotificationRequest, Schedule};

/// Raised when the reference month's spending first crosses the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitAlert {
    pub period: String,
    pub total: Decimal,
    pub threshold: Decimal,
}

impl LimitAlert {
    pub fn notification(&self) -> NotificationRequest {
        NotificationRequest {
            title: "Spending limit exceeded".into(),
            body: format!(
                "You have spent {} this month, over your limit of {}.",
                self.total, self.threshold
            ),
            schedule: Schedule::Now,
        }
    }
}

/// Compares the current month's total against the configured threshold.
/// `last_alerted_period` keeps one alert per month key, including across
/// restarts when the caller persists it.
#[derive(Debug, Clone)]
pub struct LimitMonitor {
    threshold: Decimal,
    last_alerted_period: Option<String>,
}

impl LimitMonitor {
    pub fn new(threshold: Decimal, last_alerted_period: Option<String>) -> Self {
        Self {
            threshold,
            last_alerted_period,
        }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn last_alerted_period(&self) -> Option<&str> {
        self.last_alerted_period.as_deref()
    }

    /// True iff the threshold is positive and the reference month's total
    /// strictly exceeds it.
    pub fn is_exceeded(&self, expenses: &[Expense], reference: NaiveDate) -> bool {
        self.threshold > Decimal::ZERO
            && StatsService::total_for_month(expenses, reference) > self.threshold
    }

    /// Re-evaluates after a mutation or at startup. Returns an alert the
    /// first time a given month is over limit and records the month key.
    pub fn check(&mut self, expenses: &[Expense], reference: NaiveDate) -> Option<LimitAlert> {
        if !self.is_exceeded(expenses, reference) {
            return None;
        }
        let period = month_key(reference);
        if self.last_alerted_period.as_deref() == Some(period.as_str()) {
            return None;
        }
        self.last_alerted_period = Some(period.clone());
        Some(LimitAlert {
            period,
            total: StatsService::total_for_month(expenses, reference),
            threshold: self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal, date: (i32, u32, u32)) -> Expense {
        Expense::new(
            "x",
            amount,
            Category::Other,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[test]
    fn zero_threshold_never_exceeds() {
        let monitor = LimitMonitor::new(Decimal::ZERO, None);
        let expenses = vec![expense(dec!(10000), (2025, 5, 1))];
        assert!(!monitor.is_exceeded(&expenses, reference()));
    }

    #[test]
    fn exceeds_only_on_strictly_greater_monthly_total() {
        let monitor = LimitMonitor::new(dec!(100.00), None);
        let mut expenses = vec![expense(dec!(60.00), (2025, 5, 2))];
        assert!(!monitor.is_exceeded(&expenses, reference()));

        expenses.push(expense(dec!(50.00), (2025, 5, 10)));
        assert!(monitor.is_exceeded(&expenses, reference()));
    }

    #[test]
    fn exactly_at_threshold_is_not_exceeded() {
        let monitor = LimitMonitor::new(dec!(100), None);
        let expenses = vec![expense(dec!(100), (2025, 5, 2))];
        assert!(!monitor.is_exceeded(&expenses, reference()));
    }

    #[test]
    fn other_months_do_not_count() {
        let monitor = LimitMonitor::new(dec!(100), None);
        let expenses = vec![
            expense(dec!(90), (2025, 4, 30)),
            expense(dec!(90), (2025, 5, 1)),
        ];
        assert!(!monitor.is_exceeded(&expenses, reference()));
    }

    #[test]
    fn check_alerts_once_per_month() {
        let mut monitor = LimitMonitor::new(dec!(100), None);
        let expenses = vec![expense(dec!(110), (2025, 5, 1))];

        let alert = monitor.check(&expenses, reference()).expect("first alert");
        assert_eq!(alert.period, "2025-5");
        assert_eq!(alert.total, dec!(110));
        assert!(monitor.check(&expenses, reference()).is_none());
    }

    #[test]
    fn check_alerts_again_in_a_new_month() {
        let mut monitor = LimitMonitor::new(dec!(100), Some("2025-4".into()));
        let expenses = vec![expense(dec!(110), (2025, 5, 1))];
        assert!(monitor.check(&expenses, reference()).is_some());
        assert_eq!(monitor.last_alerted_period(), Some("2025-5"));
    }
}
