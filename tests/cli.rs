use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &TempDir, amount: &str, category: &str, date: &str) {
    expenses(dir)
        .args(["expense", "add", amount, category, "--date", date])
        .assert()
        .success();
}

fn stored_ids(dir: &TempDir) -> Vec<i64> {
    let text = std::fs::read_to_string(dir.path().join("data").join("expenses.json")).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
    values.iter().map(|v| v["id"].as_i64().unwrap()).collect()
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Eating out"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("categories.json").exists());
}

#[test]
fn add_and_list_groups_by_month() {
    let dir = TempDir::new().unwrap();
    add(&dir, "12.50", "Groceries", "2024-06-01");
    add(&dir, "3", "Gas", "2024-07-15");

    expenses(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("July 2024"))
        .stdout(predicate::str::contains("June 2024"))
        .stdout(predicate::str::contains("$12.50"))
        .stdout(predicate::str::contains("Page 1 of 1 (2 expenses)"));
}

#[test]
fn add_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["expense", "add", "0", "Gas", "--date", "2024-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero."));
}

#[test]
fn delete_requires_force() {
    let dir = TempDir::new().unwrap();
    add(&dir, "5", "Gas", "2024-06-01");
    let id = stored_ids(&dir)[0].to_string();

    expenses(&dir)
        .args(["expense", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(stored_ids(&dir).len(), 1);

    expenses(&dir)
        .args(["expense", "delete", &id, "--force"])
        .assert()
        .success();
    assert!(stored_ids(&dir).is_empty());
}

#[test]
fn edit_changes_amount() {
    let dir = TempDir::new().unwrap();
    add(&dir, "5", "Gas", "2024-06-01");
    let id = stored_ids(&dir)[0].to_string();

    expenses(&dir)
        .args(["expense", "edit", &id, "--amount", "7.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$7.25"));
}

#[test]
fn category_add_and_delete() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["category", "add", "Books"])
        .assert()
        .success();

    expenses(&dir)
        .args(["category", "add", "Books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    expenses(&dir)
        .args(["category", "delete", "Books", "--force"])
        .assert()
        .success();

    expenses(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Books").not());
}

#[test]
fn analytics_for_range() {
    let dir = TempDir::new().unwrap();
    add(&dir, "10", "A", "2024-06-01");
    add(&dir, "5", "B", "2024-06-02");
    add(&dir, "3", "A", "2024-07-01");

    expenses(&dir)
        .args([
            "report", "analytics", "--from", "2024-06-01", "--to", "2024-06-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$10.00"))
        .stdout(predicate::str::contains("Total: $15.00"));
}

#[test]
fn export_csv_and_reimport() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    expenses(&dir)
        .args([
            "expense", "add", "4", "Gas", "--date", "2024-06-03", "-m", r#"He said "hi""#,
        ])
        .assert()
        .success();

    expenses(&dir)
        .args(["export", "csv", "--from", "2024-06-01", "--to", "2024-06-30", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expenses"));

    let file = std::fs::read_dir(out.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.starts_with("id,amount,category,details,date\n"));
    assert!(text.contains(r#","He said ""hi""","#));

    expenses(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:    0"))
        .stdout(predicate::str::contains("Skipped:     1"));
}

#[test]
fn export_empty_range_warns() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    expenses(&dir)
        .args(["export", "json", "--from", "2000-01-01", "--to", "2000-01-31", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing was exported"));

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn audit_records_mutations() {
    let dir = TempDir::new().unwrap();
    add(&dir, "5", "Gas", "2024-06-01");

    expenses(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("added expense #"));
}
