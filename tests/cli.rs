#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn walletui(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("walletui").unwrap();
    cmd.env("WALLETUI_DATA_DIR", dir.path());
    cmd
}

fn add(dir: &TempDir, args: &[&str]) {
    walletui(dir).arg("add").args(args).assert().success();
}

#[test]
fn test_balance_starts_at_zero() {
    let dir = TempDir::new().unwrap();
    walletui(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: 0.00 €"));
    assert!(dir.path().join("settings.json").exists());
    assert!(dir.path().join("walletui.db").exists());
}

#[test]
fn test_add_and_balance() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["October pay", "2500", "--type", "income", "--category", "Salary"]);
    add(&dir, &["Rent", "800", "--category", "housing", "--note", "flat"]);

    walletui(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: 1,700.00 €"));

    walletui(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("-800.00 €"))
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("flat"));
}

#[test]
fn test_add_rejects_invalid_form() {
    let dir = TempDir::new().unwrap();
    walletui(&dir)
        .args(["add", " ", "0", "--category", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Description cannot be empty"))
        .stderr(predicate::str::contains("Enter a valid positive amount"))
        .stderr(predicate::str::contains("'Salary' is not a valid Expense category"));

    walletui(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet."));
}

#[test]
fn test_stats_for_period() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["Gift", "50", "-t", "income", "-c", "Gift"]);
    add(&dir, &["Cinema", "12.5", "-c", "Entertainment"]);
    add(&dir, &["Old trip", "300", "-c", "Transport", "--date", "2001-01-01"]);

    walletui(&dir)
        .args(["stats", "--period", "6m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("last 6 Months"))
        .stdout(predicate::str::contains("Income:     50.00 €"))
        .stdout(predicate::str::contains("Expenses:   12.50 €"))
        .stdout(predicate::str::contains("Balance:    37.50 €"));

    walletui(&dir)
        .args(["stats", "--period", "2w"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown period"));
}

#[test]
fn test_edit_and_delete() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["Bus", "2", "-c", "Transport"]);

    walletui(&dir)
        .args(["edit", "1", "--amount", "3,40", "--description", "Bus ticket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated #1"));
    walletui(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus ticket"))
        .stdout(predicate::str::contains("-3.40 €"));

    walletui(&dir)
        .args(["edit", "1", "--type", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Choose a category"));

    walletui(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted #1: Bus ticket"));
    walletui(&dir)
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction 1 not found"));
}

#[test]
fn test_clear_requires_yes() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["Coffee", "3", "-c", "Other"]);
    add(&dir, &["Tea", "2", "-c", "Other"]);

    walletui(&dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be undone"));

    walletui(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 transactions"));

    walletui(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: 0.00 €"));
}

#[test]
fn test_categories_by_type() {
    let dir = TempDir::new().unwrap();
    walletui(&dir)
        .args(["categories", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_settings_change_currency() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"currency_symbol": "$", "date_format": "%Y/%m/%d"}"#,
    )
    .unwrap();
    add(&dir, &["Lunch", "9.99", "-c", "Groceries", "-d", "2026/03/07"]);

    walletui(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2026/03/07"))
        .stdout(predicate::str::contains("-9.99 $"));
}

#[test]
fn test_add_rejects_oversized_amount() {
    let dir = TempDir::new().unwrap();
    walletui(&dir)
        .args(["add", "Lottery", "79228162514264337593543950335", "-t", "income", "-c", "Gift"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot exceed"));
}
