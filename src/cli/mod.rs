//! Command-line front end and composition root.

pub mod commands;

use colored::Colorize;

use crate::config::{AppConfig, ConfigManager};
use crate::core::services::LimitMonitor;
use crate::core::LedgerStore;
use crate::errors::LedgerError;
use crate::notify::{LogNotifier, Notifier};
use crate::storage::JsonFileStore;

/// Everything a command handler needs: the ledger store, the injected
/// configuration, and the notification collaborator.
pub struct AppContext {
    pub store: LedgerStore,
    pub config: AppConfig,
    pub config_manager: ConfigManager,
    pub notifier: Box<dyn Notifier>,
}

impl AppContext {
    /// Wires the default backend, configuration, and notifier.
    pub fn bootstrap() -> Result<Self, LedgerError> {
        let backend = JsonFileStore::new_default()?;
        let store = LedgerStore::open(Box::new(backend));
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self {
            store,
            config,
            config_manager,
            notifier: Box::new(LogNotifier),
        })
    }

    /// Builds the limit monitor from the persisted threshold and alert flag.
    pub fn limit_monitor(&self) -> LimitMonitor {
        LimitMonitor::new(self.store.monthly_limit(), self.store.last_alerted_period())
    }

    /// Re-evaluates the limit and delivers at most one alert per month,
    /// persisting the alerted period.
    pub fn run_limit_check(&mut self, reference: chrono::NaiveDate) {
        let mut monitor = self.limit_monitor();
        if let Some(alert) = monitor.check(self.store.expenses(), reference) {
            self.notifier.deliver(&alert.notification());
            if let Err(err) = self.store.set_last_alerted_period(Some(&alert.period)) {
                tracing::warn!("failed to persist alerted period: {err}");
            }
        }
    }
}

/// Parses and dispatches one invocation. Returns the process exit code.
pub fn run(args: &[String]) -> i32 {
    let mut context = match AppContext::bootstrap() {
        Ok(context) => context,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            return 1;
        }
    };

    // Startup replay of the limit check, as the original app did on launch.
    context.run_limit_check(today());

    let Some(command) = args.first() else {
        print_usage();
        return 2;
    };

    let result = match command.as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "login" => commands::login(&context, &args[1..]),
        other => {
            // Everything else requires a session.
            let Some(username) = context.store.username() else {
                return not_logged_in();
            };
            match other {
                "logout" => commands::logout(&context),
                "whoami" => {
                    println!("{}", username);
                    Ok(())
                }
                "add" => commands::add(&mut context, &args[1..]),
                "list" => commands::list(&context, &args[1..]),
                "edit" => commands::edit(&mut context, &args[1..]),
                "remove" => commands::remove(&mut context, &args[1..]),
                "stats" => commands::stats(&context, &args[1..]),
                "limit" => commands::limit(&mut context, &args[1..]),
                "export" => commands::export(&context, &args[1..]),
                "settings" => commands::settings(&mut context, &args[1..]),
                unknown => {
                    eprintln!("{} unknown command `{}`", "error:".red().bold(), unknown);
                    print_usage();
                    return 2;
                }
            }
        }
    };

    match result {
        Ok(()) => 0,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            1
        }
    }
}

fn not_logged_in() -> i32 {
    eprintln!(
        "{} not logged in; run `expense_core_cli login <name>` first",
        "error:".red().bold()
    );
    1
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn print_usage() {
    println!("expense_core_cli — personal expense tracker");
    println!();
    println!("USAGE:");
    println!("  expense_core_cli login <name> | logout | whoami");
    println!("  expense_core_cli add <title> <amount> <category> [--date YYYY-MM-DD] [--photo FILE]");
    println!("  expense_core_cli list [--category NAME]");
    println!("  expense_core_cli edit <id> [--title T] [--amount A] [--category C] [--date D]");
    println!("                    [--photo FILE | --clear-photo]");
    println!("  expense_core_cli remove <id>...");
    println!("  expense_core_cli stats <category|day|week|month|year|habits>");
    println!("  expense_core_cli limit <show | set <amount>>");
    println!("  expense_core_cli export <csv|report> <path>");
    println!("  expense_core_cli settings <reminder <days> | language <en|tr>>");
    println!();
    println!(
        "Categories: {}",
        crate::domain::Category::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
