pub mod expense_service;
pub mod limit_service;
pub mod stats_service;

pub use expense_service::{ExpenseDraft, ExpenseService};
pub use limit_service::{LimitAlert, LimitMonitor};
pub use stats_service::StatsService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
