pub mod csv;
pub mod report;

pub use report::SpendingReport;
