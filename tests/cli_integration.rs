use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn pkeep(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pkeep").unwrap();
    cmd.env("PKEEP_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_note_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    pkeep(home)
        .args(["note", "add", "Groceries", "-c", "Milk, eggs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added (1): Groceries"));

    pkeep(home)
        .args(["note", "edit", "1", "-t", "Groceries v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated (1): Groceries v2"));

    pkeep(home)
        .args(["note", "view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries v2"))
        .stdout(predicate::str::contains("Milk, eggs"));

    pkeep(home)
        .args(["note", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted (1)"));

    pkeep(home)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));

    assert!(home.join("notes.json").exists());
}

#[test]
fn test_first_run_creates_empty_backing_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .args(["contact", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts yet."));

    let raw = fs::read_to_string(temp_dir.path().join("contacts.json")).unwrap();
    assert_eq!(raw.trim(), "[]");
}

#[test]
fn test_invalid_id_fails_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .args(["task", "view", "abc"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid identifier"));
}

#[test]
fn test_unknown_id_reports_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .args(["contact", "edit", "9", "-n", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contact not found: 9"));
}

#[test]
fn test_invalid_priority_adds_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    pkeep(home)
        .args(["task", "add", "Ship report", "-p", "Urgent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    pkeep(home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet."));
}

#[test]
fn test_task_done_and_filter() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    pkeep(home)
        .args(["task", "add", "Ship report"])
        .args(["-p", "High", "--due", "31-12-2024"])
        .assert()
        .success();
    pkeep(home)
        .args(["task", "add", "Water plants", "-p", "low"])
        .assert()
        .success();

    pkeep(home)
        .args(["task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task completed (1): Ship report"));

    pkeep(home)
        .args(["task", "list", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water plants"))
        .stdout(predicate::str::contains("Ship report").not());

    pkeep(home)
        .args(["task", "list", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship report"))
        .stdout(predicate::str::contains("due 31-12-2024"));
}

#[test]
fn test_export_empty_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .args(["note", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes to export."));

    assert!(!temp_dir.path().join("notes.csv").exists());
}

#[test]
fn test_export_import_round_trip() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let csv_path = source.path().join("out.csv");

    pkeep(source.path())
        .args(["contact", "add", "Ada"])
        .args(["-p", "555-1234", "-e", "ada@example.com"])
        .assert()
        .success();
    pkeep(source.path())
        .args(["contact", "add", "Grace", "-e", "grace@example.com"])
        .assert()
        .success();

    pkeep(source.path())
        .args(["contact", "export", "--to"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 contacts"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("ID,Name,Phone,Email"));

    pkeep(target.path())
        .args(["contact", "import"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 contacts"));

    pkeep(target.path())
        .args(["contact", "view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace"))
        .stdout(predicate::str::contains("grace@example.com"));
}

#[test]
fn test_import_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .args(["note", "import", "nope.csv"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_data_dir_flag_wins_over_env() {
    let env_home = tempfile::tempdir().unwrap();
    let flag_home = tempfile::tempdir().unwrap();

    pkeep(env_home.path())
        .arg("--data-dir")
        .arg(flag_home.path())
        .args(["note", "add", "Here"])
        .assert()
        .success();

    assert!(flag_home.path().join("notes.json").exists());
    assert!(!env_home.path().join("notes.json").exists());
}

#[test]
fn test_corrupt_store_only_breaks_its_kind() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    fs::write(home.join("tasks.json"), "{ definitely not a list").unwrap();

    pkeep(home)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse"));

    pkeep(home)
        .args(["note", "add", "Still works"])
        .assert()
        .success();
}

#[test]
fn test_menu_adds_and_lists() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .arg("menu")
        .write_stdin("1\n1\nFrom menu\nbody\n2\n3\nxyz\n8\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added (1): From menu"))
        .stdout(predicate::str::contains("Invalid identifier"));

    pkeep(temp_dir.path())
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From menu"));
}

#[test]
fn test_no_subcommand_opens_menu() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .write_stdin("9\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main menu"))
        .stdout(predicate::str::contains("Invalid choice"));
}

#[test]
fn test_config_prints_paths() {
    let temp_dir = tempfile::tempdir().unwrap();

    pkeep(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.json"))
        .stdout(predicate::str::contains("contacts.csv"));
}

#[test]
fn test_config_init_writes_file_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.json");

    pkeep(temp_dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("\"notes_file\": \"notes.json\""));

    fs::write(&config_path, r#"{"notes_file": "journal.json"}"#).unwrap();
    pkeep(temp_dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("journal.json"));
}

#[test]
fn test_deleted_id_not_reused_across_runs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    pkeep(home).args(["note", "add", "First"]).assert().success();
    pkeep(home).args(["note", "add", "Second"]).assert().success();
    pkeep(home).args(["note", "delete", "2"]).assert().success();

    pkeep(home)
        .args(["note", "add", "Third"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added (3): Third"));
}
