//! Command handlers for the CLI.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::{today, AppContext};
use crate::core::ledger_store::{ExpenseUpdate, PhotoUpdate};
use crate::core::services::{ExpenseDraft, ExpenseService, StatsService};
use crate::domain::Category;
use crate::export::{csv, SpendingReport};
use crate::notify::NotificationRequest;

type CommandResult = Result<(), String>;

pub fn login(context: &AppContext, args: &[String]) -> CommandResult {
    let name = args.first().map(|s| s.trim()).unwrap_or_default();
    if name.is_empty() {
        return Err("usage: login <name>".into());
    }
    context
        .store
        .set_username(name)
        .map_err(|err| err.to_string())?;
    println!("Welcome, {}", name.bold());
    Ok(())
}

pub fn logout(context: &AppContext) -> CommandResult {
    context
        .store
        .clear_username()
        .map_err(|err| err.to_string())?;
    println!("Logged out.");
    Ok(())
}

pub fn add(context: &mut AppContext, args: &[String]) -> CommandResult {
    let (positional, flags) = split_flags(args);
    let [title, amount, category] = positional.as_slice() else {
        return Err("usage: add <title> <amount> <category> [--date YYYY-MM-DD] [--photo FILE]".into());
    };
    let amount = parse_amount(amount)?;
    let category = parse_category(category)?;
    let date = match flag_value(&flags, "--date") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let photo = match flag_value(&flags, "--photo") {
        Some(path) => Some(read_photo(path)?),
        None => None,
    };

    let draft = ExpenseDraft {
        title: title.clone(),
        amount,
        category,
        date,
        photo,
    };
    let stored = ExpenseService::add(&mut context.store, draft).map_err(|err| err.to_string())?;
    println!(
        "Added {} {} ({}, {})",
        stored.category.icon(),
        stored.title.bold(),
        stored.amount,
        stored.date
    );
    context.run_limit_check(today());
    Ok(())
}

pub fn list(context: &AppContext, args: &[String]) -> CommandResult {
    let (_, flags) = split_flags(args);
    let filter = match flag_value(&flags, "--category") {
        Some(raw) => Some(parse_category(raw)?),
        None => None,
    };
    let language = context.config.language.as_str();
    for expense in context.store.expenses() {
        if let Some(category) = filter {
            if expense.category != category {
                continue;
            }
        }
        let photo_marker = if expense.photo.is_some() { " [photo]" } else { "" };
        println!(
            "{}  {}  {:<12}  {:>10}  {}{}",
            expense.id,
            expense.date,
            expense.category.label(language),
            expense.amount.to_string(),
            expense.title,
            photo_marker
        );
    }
    Ok(())
}

pub fn edit(context: &mut AppContext, args: &[String]) -> CommandResult {
    let (positional, flags) = split_flags(args);
    let [id] = positional.as_slice() else {
        return Err("usage: edit <id> [--title T] [--amount A] [--category C] [--date D]".into());
    };
    let id = parse_id(id)?;

    let mut update = ExpenseUpdate {
        title: flag_value(&flags, "--title").cloned(),
        ..Default::default()
    };
    if let Some(raw) = flag_value(&flags, "--amount") {
        update.amount = Some(parse_amount(raw)?);
    }
    if let Some(raw) = flag_value(&flags, "--category") {
        update.category = Some(parse_category(raw)?);
    }
    if let Some(raw) = flag_value(&flags, "--date") {
        update.date = Some(parse_date(raw)?);
    }
    if flags.iter().any(|(name, _)| name == "--clear-photo") {
        update.photo = PhotoUpdate::Clear;
    } else if let Some(path) = flag_value(&flags, "--photo") {
        update.photo = PhotoUpdate::Set(read_photo(path)?);
    }

    let touched = ExpenseService::update(&mut context.store, id, update)
        .map_err(|err| err.to_string())?;
    if touched {
        println!("Updated {}", id);
        context.run_limit_check(today());
    } else {
        println!("No expense with id {}", id);
    }
    Ok(())
}

pub fn remove(context: &mut AppContext, args: &[String]) -> CommandResult {
    if args.is_empty() {
        return Err("usage: remove <id>...".into());
    }
    let mut ids = HashSet::new();
    for raw in args {
        ids.insert(parse_id(raw)?);
    }
    let removed =
        ExpenseService::remove(&mut context.store, &ids).map_err(|err| err.to_string())?;
    println!("Removed {} expense(s)", removed);
    Ok(())
}

pub fn stats(context: &AppContext, args: &[String]) -> CommandResult {
    let expenses = context.store.expenses();
    let language = context.config.language.as_str();
    match args.first().map(String::as_str).unwrap_or("habits") {
        "category" => {
            for (category, total) in StatsService::total_by_category(expenses) {
                println!("{:<14} {}", category.label(language), total);
            }
        }
        "day" => print_totals(StatsService::total_by_day(expenses)),
        "week" => print_totals(StatsService::total_by_week(expenses)),
        "month" => print_totals(StatsService::total_by_month(expenses)),
        "year" => print_totals(StatsService::total_by_year(expenses)),
        "habits" => {
            if let Some((category, total)) = StatsService::top_category(expenses) {
                println!(
                    "Top category: {} {} ({})",
                    category.icon(),
                    category.label(language),
                    total
                );
            }
            if let Some((day, total)) = StatsService::top_day(expenses) {
                println!("Top day: {} ({})", day, total);
            }
            let reference = today();
            println!(
                "This week: {}",
                StatsService::total_for_week(expenses, reference)
            );
            println!(
                "Previous week: {}",
                StatsService::total_for_previous_week(expenses, reference)
            );
            println!(
                "This month: {}",
                StatsService::total_for_month(expenses, reference)
            );
            println!(
                "{} {}",
                "Total spending:".bold(),
                StatsService::total_spending(expenses)
            );
        }
        other => return Err(format!("unknown stats view `{}`", other)),
    }
    Ok(())
}

pub fn limit(context: &mut AppContext, args: &[String]) -> CommandResult {
    match args.first().map(String::as_str) {
        Some("show") | None => {
            let threshold = context.store.monthly_limit();
            if threshold > Decimal::ZERO {
                println!("Monthly limit: {}", threshold);
            } else {
                println!("Monthly limit: none");
            }
            let monitor = context.limit_monitor();
            let spent = StatsService::total_for_month(context.store.expenses(), today());
            println!("Spent this month: {}", spent);
            if monitor.is_exceeded(context.store.expenses(), today()) {
                println!("{}", "Limit exceeded!".red().bold());
            }
            Ok(())
        }
        Some("set") => {
            let raw = args.get(1).ok_or("usage: limit set <amount>")?;
            let value = parse_amount(raw)?;
            context
                .store
                .set_monthly_limit(value)
                .map_err(|err| err.to_string())?;
            // A fresh limit starts a fresh alert cycle.
            context
                .store
                .set_last_alerted_period(None)
                .map_err(|err| err.to_string())?;
            println!("Monthly limit updated.");
            context.run_limit_check(today());
            Ok(())
        }
        Some(other) => Err(format!("unknown limit action `{}`", other)),
    }
}

pub fn export(context: &AppContext, args: &[String]) -> CommandResult {
    let (format, path) = match (args.first(), args.get(1)) {
        (Some(format), Some(path)) => (format.as_str(), Path::new(path)),
        _ => return Err("usage: export <csv|report> <path>".into()),
    };
    let expenses = context.store.expenses();
    match format {
        "csv" => {
            let content = csv::csv_string(expenses, &context.config.language)
                .map_err(|err| err.to_string())?;
            fs::write(path, content).map_err(|err| err.to_string())?;
        }
        "report" => {
            let report = SpendingReport::build(expenses, context.store.monthly_limit());
            fs::write(path, report.render_text()).map_err(|err| err.to_string())?;
        }
        other => return Err(format!("unknown export format `{}`", other)),
    }
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn settings(context: &mut AppContext, args: &[String]) -> CommandResult {
    match (args.first().map(String::as_str), args.get(1)) {
        (Some("reminder"), Some(raw)) => {
            let days: u32 = raw
                .parse()
                .map_err(|_| format!("invalid day count `{}`", raw))?;
            context.config.reminder_frequency_days = days;
            context
                .config_manager
                .save(&context.config)
                .map_err(|err| err.to_string())?;
            context
                .notifier
                .deliver(&NotificationRequest::spending_reminder(days));
            if days == 0 {
                println!("Reminder disabled.");
            } else {
                println!("Reminder scheduled every {} day(s).", days);
            }
            Ok(())
        }
        (Some("language"), Some(raw)) => {
            let language = raw.to_lowercase();
            if language != "en" && language != "tr" {
                return Err(format!("unsupported language `{}`", raw));
            }
            context.config.language = language;
            context
                .config_manager
                .save(&context.config)
                .map_err(|err| err.to_string())?;
            println!("Language updated.");
            Ok(())
        }
        _ => Err("usage: settings <reminder <days> | language <en|tr>>".into()),
    }
}

fn print_totals(totals: std::collections::BTreeMap<String, Decimal>) {
    for (key, total) in totals {
        println!("{:<12} {}", key, total);
    }
}

/// Splits args into positionals and `(--flag, value)` pairs. Bare flags get
/// an empty value.
fn split_flags(args: &[String]) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut index = 0;
    while index < args.len() {
        let arg = &args[index];
        if let Some(name) = arg.strip_prefix("--") {
            if name == "clear-photo" {
                flags.push((arg.clone(), String::new()));
                index += 1;
            } else {
                let value = args.get(index + 1).cloned().unwrap_or_default();
                flags.push((arg.clone(), value));
                index += 2;
            }
        } else {
            positional.push(arg.clone());
            index += 1;
        }
    }
    (positional, flags)
}

fn flag_value<'a>(flags: &'a [(String, String)], name: &str) -> Option<&'a String> {
    flags
        .iter()
        .find(|(flag, _)| flag == name)
        .map(|(_, value)| value)
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    raw.parse::<Decimal>()
        .map_err(|_| format!("invalid amount `{}`", raw))
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>()
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("invalid date `{}`", raw))
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| format!("invalid id `{}`", raw))
}

fn read_photo(path: &str) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|err| format!("cannot read photo `{}`: {}", path, err))
}
