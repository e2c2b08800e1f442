use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "fintrack";
const TODAY: &str = "2024-01-20";

fn fintrack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINTRACK_DATA_DIR", dir)
        .env("FINTRACK_AS_OF", TODAY)
        .env_remove("FINTRACK_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) {
    fintrack(dir).args(args).assert().success();
}

/// Income 5000 on 2024-01-01 and a 300 food expense on 2024-01-05
fn seed(dir: &Path, food_budget: &str) {
    run(dir, &["txn", "add", "income", "5000", "-c", "Salary", "-d", "2024-01-01"]);
    run(dir, &["txn", "add", "expense", "300", "-c", "Food", "-d", "2024-01-05"]);
    run(dir, &["budget", "set", "Food", food_budget]);
}

#[test]
fn cli_init_and_config() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialized fintrack"));
    assert!(dir.path().join("config.json").exists());

    fintrack(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Alert threshold: 80%"));
}

#[test]
fn cli_budget_within_limit_raises_no_alert() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), "400");

    fintrack(dir.path())
        .args(["budget", "status"])
        .assert()
        .success()
        .stdout(contains("$300.00").and(contains("$100.00")).and(contains("75.0%")));

    fintrack(dir.path())
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("No alerts."));
}

#[test]
fn cli_exhausted_budget_is_high_alert() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), "300");

    fintrack(dir.path())
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("HIGH").and(contains("over budget")));
}

#[test]
fn cli_goal_due_today_is_overdue() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["goal", "add", "Laptop", "1500", "--date", TODAY]);

    fintrack(dir.path())
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("HIGH").and(contains("Goal overdue")).and(contains("Laptop")));
}

#[test]
fn cli_goal_falls_behind_schedule() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["goal", "add", "Car", "1000", "--date", "2024-06-01"]);

    // 72 of 133 days elapsed with nothing saved
    fintrack(dir.path())
        .args(["--as-of", "2024-04-01", "alerts"])
        .assert()
        .success()
        .stdout(contains("Behind schedule").and(contains("Car")));
}

#[test]
fn cli_goal_in_the_past_is_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .args(["goal", "add", "Laptop", "1500", "--date", "2024-01-19"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn cli_dashboard_net_worth() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), "400");

    fintrack(dir.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(
            contains("Total Income:")
                .and(contains("$5,000.00"))
                .and(contains("Net Worth:"))
                .and(contains("$4,700.00")),
        );
}

#[test]
fn cli_health_score_in_range() {
    let dir = TempDir::new().unwrap();
    seed(dir.path(), "400");

    // ratio 0.06 -> 30, savings 0.94 -> 30, adherence 75 -> 20
    fintrack(dir.path())
        .args(["report", "health"])
        .assert()
        .success()
        .stdout(contains("Financial Health Score: 80/100"));
}

#[test]
fn cli_import_missing_column_inserts_nothing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.csv");
    fs::write(
        &file,
        "date,type,category,description\n\
         2024-01-02,Expense,Food,Lunch\n\
         2024-01-03,Expense,Transport,Bus\n\
         2024-01-04,Income,Salary,Pay\n",
    )
    .unwrap();

    fintrack(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("amount"));

    fintrack(dir.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(contains("No transactions found."));
}

#[test]
fn cli_export_then_import_round_trip() {
    let source = TempDir::new().unwrap();
    seed(source.path(), "400");
    let file = source.path().join("out.json");

    fintrack(source.path())
        .arg("export")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Exported 2 transaction(s)"));

    let target = TempDir::new().unwrap();
    fintrack(target.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Imported:    2"));
}

#[test]
fn cli_export_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .arg("export")
        .arg(dir.path().join("out.csv"))
        .args(["--start", "2024-02-01", "--end", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn cli_savings_without_interest() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .args(["calc", "savings", "--target", "1200", "--months", "12"])
        .assert()
        .success()
        .stdout(contains("Required Monthly Savings: $100.00"));
}

#[test]
fn cli_savings_already_met() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .args(["calc", "savings", "--target", "500", "--current", "800", "--months", "6"])
        .assert()
        .success()
        .stdout(contains("Goal already met"));
}

#[test]
fn cli_savings_zero_months_fails() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .args(["calc", "savings", "--target", "500", "--months", "0"])
        .assert()
        .failure()
        .stderr(contains("months"));
}

#[test]
fn cli_duplicate_category_is_reported() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["category", "add", "Pets", "--type", "expense"]);

    fintrack(dir.path())
        .args(["category", "add", "pets", "--type", "expense"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    fintrack(dir.path())
        .args(["category", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(contains("Pets").and(contains("Salary").not()));
}

#[test]
fn cli_recurring_run_is_idempotent() {
    let dir = TempDir::new().unwrap();
    run(
        dir.path(),
        &["recurring", "add", "Rent", "expense", "900", "-c", "Housing", "--start", "2023-11-01"],
    );

    fintrack(dir.path())
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(contains("created 3 transaction(s)"));

    fintrack(dir.path())
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(contains("created 0 transaction(s)"));
}

#[test]
fn cli_settings_validation() {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .args(["settings", "set", "--threshold", "83"])
        .assert()
        .failure()
        .stderr(contains("threshold"));

    run(dir.path(), &["settings", "set", "--threshold", "90", "--deadline-days", "14"]);
    fintrack(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(contains("90%").and(contains("14 day(s)")));

    fintrack(dir.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(contains("Settings"));
}
