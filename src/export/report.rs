//! Content model for the human-readable spending report.
//!
//! This is the interface handed to a document renderer: totals, the
//! configured limit, and one dated line per expense, with pagination when
//! the entry list exceeds a page. Byte-level PDF drawing stays outside the
//! core.

use rust_decimal::Decimal;

use crate::domain::Expense;

const ENTRY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Default entry lines per rendered page.
pub const DEFAULT_LINES_PER_PAGE: usize = 33;

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingReport {
    pub title: String,
    pub total_spent: Decimal,
    pub monthly_limit: Decimal,
    pub entries: Vec<String>,
}

impl SpendingReport {
    /// Builds the report over the full ledger snapshot.
    pub fn build(expenses: &[Expense], monthly_limit: Decimal) -> Self {
        let total_spent = expenses.iter().map(|expense| expense.amount).sum();
        let entries = expenses
            .iter()
            .map(|expense| {
                format!(
                    "{} - {} - {} - {}",
                    expense.date.format(ENTRY_DATE_FORMAT),
                    expense.title,
                    expense.category,
                    expense.amount
                )
            })
            .collect();
        Self {
            title: "Monthly Spending Report".into(),
            total_spent,
            monthly_limit,
            entries,
        }
    }

    fn limit_line(&self) -> String {
        if self.monthly_limit > Decimal::ZERO {
            format!("Monthly limit: {}", self.monthly_limit)
        } else {
            "Monthly limit: none".into()
        }
    }

    /// Splits the entry lines into pages of at most `lines_per_page` lines.
    /// An empty report still produces one (entry-less) page.
    pub fn paginate(&self, lines_per_page: usize) -> Vec<Vec<String>> {
        let per_page = lines_per_page.max(1);
        if self.entries.is_empty() {
            return vec![Vec::new()];
        }
        self.entries
            .chunks(per_page)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// Plain-text rendering of the full report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push('\n');
        out.push_str(&format!("Total spent: {}\n", self.total_spent));
        out.push_str(&self.limit_line());
        out.push('\n');
        out.push('\n');
        out.push_str("Expenses:\n");
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }
}
