#![doc(test(attr(deny(warnings))))]

//! Expense Core owns the expense ledger, its key-value persistence,
//! aggregation statistics, monthly limit monitoring, and export helpers
//! that power the command-line front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod notify;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
