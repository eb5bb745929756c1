use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn bills_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bills"))
}

fn init(config_path: &Path) {
    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

fn write_ledger(config_path: &Path, ledger: &str) {
    fs::write(config_path.join("ledger.toml"), ledger).unwrap();
}

fn read_ledger(config_path: &Path) -> String {
    fs::read_to_string(config_path.join("ledger.toml")).unwrap()
}

const RENT_LEDGER: &str = r#"next_id = 3

[[bills]]
id = 1
description = "Office rent"
amount = "2500.00"
due_date = "2024-01-31"
status = "paid"
category = "rent"
supplier = "Main St Properties"
owner = "admin"
recurring = true
recurrence_type = "monthly"

[[bills]]
id = 2
description = "Cleaning"
amount = "80.00"
due_date = "2024-03-01"
category = "services"
owner = "admin"
recurring = true
recurrence_type = "weekly"
"#;

#[test]
fn test_help() {
    bills_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recurring bill generation"));
}

#[test]
fn test_version() {
    bills_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bills"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized bills config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("ledger.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");

    init(&config_path);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_run_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_run_on_empty_ledger() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 recurring bills generated"));
}

#[test]
fn test_run_rejects_bad_date() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_run_generates_and_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated: Office rent - 2024-02-29"))
        .stdout(predicate::str::contains("Generated: Cleaning - 2024-03-08"))
        .stdout(predicate::str::contains("2 recurring bills generated"));

    let ledger = read_ledger(&config_path);
    assert!(ledger.contains("next_generation_date = \"2024-03-29\""));
    assert!(ledger.contains("next_generation_date = \"2024-03-15\""));
    assert!(ledger.contains("template_id = 1"));

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 recurring bills generated"));
}

#[test]
fn test_dry_run_leaves_ledger_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);

    bills_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "run",
            "--dry-run",
            "--today",
            "2024-03-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would generate: Office rent - 2024-02-29"))
        .stdout(predicate::str::contains("DRY RUN: 2 bills would be generated"));

    assert_eq!(read_ledger(&config_path), RENT_LEDGER);
}

#[test]
fn test_run_refuses_while_locked() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);

    let holder = fs::File::create(config_path.join("ledger.lock")).unwrap();
    holder.try_lock().unwrap();

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-03-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Another run holds the ledger lock"));

    assert_eq!(read_ledger(&config_path), RENT_LEDGER);
}

#[test]
fn test_stale_lock_file_does_not_block_run() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);
    // Left behind by a run that was killed.
    fs::write(config_path.join("ledger.lock"), "999999\n").unwrap();

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 recurring bills generated"));
}

#[test]
fn test_run_exits_nonzero_when_templates_fail() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);
    // The ledger can no longer be saved.
    fs::create_dir(config_path.join("ledger.toml.tmp")).unwrap();

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-03-10"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed #1 'Office rent'"))
        .stdout(predicate::str::contains("Failed #2 'Cleaning'"))
        .stdout(predicate::str::contains("0 recurring bills generated"))
        .stderr(predicate::str::contains("2 template(s) failed"));

    assert_eq!(read_ledger(&config_path), RENT_LEDGER);
}

#[test]
fn test_malformed_template_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(
        &config_path,
        r#"next_id = 3

[[bills]]
id = 1
description = "Broken"
amount = "10.00"
due_date = "2024-01-01"
category = "misc"
owner = "admin"
recurring = true

[[bills]]
id = 2
description = "Internet"
amount = "99.90"
due_date = "2024-01-05"
category = "utilities"
owner = "admin"
recurring = true
recurrence_type = "mensal"
"#,
    );

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped #1 'Broken'"))
        .stdout(predicate::str::contains("Generated: Internet - 2024-02-05"))
        .stdout(predicate::str::contains("1 recurring bills generated"));
}

#[test]
fn test_unknown_recurrence_fallback_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    fs::write(
        config_path.join("config.toml"),
        "[engine]\nunknown_recurrence = \"fallback\"\n",
    )
    .unwrap();
    write_ledger(
        &config_path,
        r#"next_id = 2

[[bills]]
id = 1
description = "Hosting"
amount = "20.00"
due_date = "2024-01-01"
category = "it"
owner = "admin"
recurring = true
recurrence_type = "every-30-days"
"#,
    );

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "run", "--today", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated: Hosting - 2024-01-31"));
}

#[test]
fn test_list_and_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);
    write_ledger(&config_path, RENT_LEDGER);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DESCRIPTION"))
        .stdout(predicate::str::contains("Office rent"))
        .stdout(predicate::str::contains("$2500.00"))
        .stdout(predicate::str::contains("OVERDUE"))
        .stdout(predicate::str::contains("DAYS"))
        .stdout(predicate::str::contains(" -9 "))
        .stdout(predicate::str::contains("monthly"))
        .stdout(predicate::str::contains("Total: 2 bills"));

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bills Status"))
        .stdout(predicate::str::contains("Templates:        2 (2 active)"))
        .stdout(predicate::str::contains("Due for run:      2"));
}

#[test]
fn test_list_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bills-config");
    init(&config_path);

    bills_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bills found."));
}
