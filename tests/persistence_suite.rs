mod common;

use std::collections::HashSet;
use std::fs;

use chrono::NaiveDate;
use expense_core::core::ledger_store::ExpenseUpdate;
use expense_core::core::services::{ExpenseDraft, ExpenseService};
use expense_core::domain::Category;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{open_store, temp_dir};

fn draft(title: &str, amount: rust_decimal::Decimal, day: u32) -> ExpenseDraft {
    ExpenseDraft {
        title: title.into(),
        amount,
        category: Category::Market,
        date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        photo: None,
    }
}

#[test]
fn add_survives_restart_with_identical_fields() {
    let temp = temp_dir();
    let mut store = open_store(&temp);
    let mut input = draft("Weekly groceries", dec!(64.90), 16);
    input.photo = Some(vec![1, 2, 3, 4, 5]);
    let stored = ExpenseService::add(&mut store, input).expect("add expense");
    drop(store);

    let reopened = open_store(&temp);
    assert_eq!(reopened.len(), 1);
    let loaded = &reopened.expenses()[0];
    assert_eq!(loaded.id, stored.id);
    assert_eq!(loaded.title, "Weekly groceries");
    assert_eq!(loaded.amount, dec!(64.90));
    assert_eq!(loaded.category, Category::Market);
    assert_eq!(loaded.date, NaiveDate::from_ymd_opt(2025, 5, 16).unwrap());
    assert_eq!(loaded.photo, Some(vec![1, 2, 3, 4, 5]));
}

#[test]
fn newest_expense_is_listed_first_after_restart() {
    let temp = temp_dir();
    let mut store = open_store(&temp);
    ExpenseService::add(&mut store, draft("older", dec!(1), 1)).expect("add");
    ExpenseService::add(&mut store, draft("newer", dec!(2), 2)).expect("add");
    drop(store);

    let reopened = open_store(&temp);
    assert_eq!(reopened.expenses()[0].title, "newer");
    assert_eq!(reopened.expenses()[1].title, "older");
}

#[test]
fn delete_removes_only_targets_and_keeps_order() {
    let temp = temp_dir();
    let mut store = open_store(&temp);
    let c = ExpenseService::add(&mut store, draft("C", dec!(3), 3)).expect("add");
    let b = ExpenseService::add(&mut store, draft("B", dec!(2), 2)).expect("add");
    let a = ExpenseService::add(&mut store, draft("A", dec!(1), 1)).expect("add");
    // Sequence is [A, B, C]; drop the middle record.
    let removed = ExpenseService::remove(&mut store, &HashSet::from([b.id])).expect("remove");
    assert_eq!(removed, 1);
    drop(store);

    let reopened = open_store(&temp);
    let ids: Vec<Uuid> = reopened.expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
}

#[test]
fn updating_unknown_id_leaves_snapshot_bytes_unchanged() {
    let temp = temp_dir();
    let mut store = open_store(&temp);
    ExpenseService::add(&mut store, draft("Stable", dec!(9.99), 5)).expect("add");
    let snapshot_path = temp.path().join("expenses.json");
    let before = fs::read(&snapshot_path).expect("read snapshot");

    let touched = ExpenseService::update(
        &mut store,
        Uuid::new_v4(),
        ExpenseUpdate {
            title: Some("Ghost".into()),
            ..Default::default()
        },
    )
    .expect("update call");
    assert!(!touched);

    let after = fs::read(&snapshot_path).expect("read snapshot again");
    assert_eq!(before, after);
}

#[test]
fn corrupt_snapshot_loads_as_empty_ledger() {
    let temp = temp_dir();
    let mut store = open_store(&temp);
    ExpenseService::add(&mut store, draft("Lost", dec!(5), 5)).expect("add");
    drop(store);

    fs::write(temp.path().join("expenses.json"), "{not json").expect("corrupt snapshot");
    let reopened = open_store(&temp);
    assert!(reopened.is_empty());
}

#[test]
fn limit_and_username_persist_independently_of_the_ledger() {
    let temp = temp_dir();
    let store = open_store(&temp);
    store.set_monthly_limit(dec!(300)).expect("set limit");
    store.set_username("zehra").expect("set username");
    drop(store);

    fs::remove_file(temp.path().join("expenses.json")).ok();
    let reopened = open_store(&temp);
    assert_eq!(reopened.monthly_limit(), dec!(300));
    assert_eq!(reopened.username().as_deref(), Some("zehra"));
}
