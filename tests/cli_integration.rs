//! CLI integration tests for tick
//!
//! These tests verify the complete workflow from initialization through
//! task and project management, ensuring commands work together correctly.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the tick binary
fn tick_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tick"))
}

/// Create a temporary directory and initialize a tick workspace
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    tick_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Parse a command's stdout as JSON
fn json_output(output: &assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    tick_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tick workspace"));

    assert!(dir.path().join(".tick").is_dir());
    assert!(dir.path().join(".tick/config.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    tick_cmd().arg("init").arg(dir.path()).assert().success();
    tick_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_init_keeps_existing_config() {
    let dir = TempDir::new().unwrap();

    tick_cmd().arg("init").arg(dir.path()).assert().success();
    fs::write(
        dir.path().join(".tick/config.toml"),
        "default_priority = \"high\"\n",
    )
    .unwrap();

    tick_cmd().arg("init").arg(dir.path()).assert().success();

    let config = fs::read_to_string(dir.path().join(".tick/config.toml")).unwrap();
    assert!(config.contains("high"));
}

// =============================================================================
// Task Add Tests
// =============================================================================

#[test]
fn test_add_creates_task() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task 1: Buy milk"));
}

#[test]
fn test_add_fills_in_defaults() {
    let dir = setup_workspace();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy milk",
            "--due",
            "2099-01-01",
            "--priority",
            "high",
            "--desc",
            "",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["id"].as_u64().unwrap(), 1);
    assert_eq!(json["title"].as_str().unwrap(), "Buy milk");
    assert_eq!(json["description"].as_str().unwrap(), "No description");
    assert_eq!(json["due"].as_str().unwrap(), "2099-01-01");
    assert_eq!(json["priority"].as_str().unwrap(), "High");
    assert_eq!(json["project"].as_str().unwrap(), "uncategorised");
    assert!(!json["complete"].as_bool().unwrap());
}

#[test]
fn test_add_requires_a_due_date() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--due"));
}

#[test]
fn test_add_rejects_past_due_dates() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2000-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Due date cannot be in the past"));
}

#[test]
fn test_add_allows_due_today() {
    let dir = setup_workspace();
    let today = chrono::Local::now().date_naive().to_string();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", &today])
        .assert()
        .success();
}

#[test]
fn test_add_rejects_empty_titles() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "  ", "--due", "2099-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[test]
fn test_add_rejects_unknown_projects() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy milk",
            "--due",
            "2099-01-01",
            "--project",
            "Work",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project named 'Work'"));
}

#[test]
fn test_add_rejects_invalid_priorities() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy milk",
            "--due",
            "2099-01-01",
            "--priority",
            "urgent",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid priority"));
}

// =============================================================================
// List and Filter Tests
// =============================================================================

#[test]
fn test_list_shows_tasks() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Walk dog", "--due", "2099-01-02"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Walk dog"));
}

#[test]
fn test_list_empty_workspace() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"));
}

#[test]
fn test_list_filters_by_priority() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "urgent thing",
            "--due",
            "2099-01-01",
            "--priority",
            "high",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "later thing", "--due", "2099-01-01"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "High", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "urgent thing");
}

#[test]
fn test_list_filters_by_project() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "report",
            "--due",
            "2099-01-01",
            "--project",
            "Work",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "dishes", "--due", "2099-01-01"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "Work", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "report");
}

#[test]
fn test_list_today_and_upcoming() {
    let dir = setup_workspace();
    let today = chrono::Local::now().date_naive().to_string();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "due now", "--due", &today])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "due later", "--due", "2099-01-01"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "today", "--format", "json"])
        .assert()
        .success();
    let tasks = json_output(&output);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "due now");

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "upcoming", "--format", "json"])
        .assert()
        .success();
    let tasks = json_output(&output);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "due later");
}

#[test]
fn test_list_unknown_token_is_a_project_filter() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    // A token that is not a built-in filter matches projects by name
    tick_cmd()
        .current_dir(dir.path())
        .args(["list", "no-such-project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks match 'no-such-project'"));
}

#[test]
fn test_list_puts_completed_tasks_last() {
    let dir = setup_workspace();

    for title in ["first", "second", "third"] {
        tick_cmd()
            .current_dir(dir.path())
            .args(["add", title, "--due", "2099-01-01"])
            .assert()
            .success();
    }

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "2"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, vec!["first", "third", "second"]);
}

// =============================================================================
// Completion Tests
// =============================================================================

#[test]
fn test_done_toggles_completion() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: Buy milk"));

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened: Buy milk"));
}

#[test]
fn test_done_with_unknown_id_fails() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: 99"));
}

// =============================================================================
// Edit Tests
// =============================================================================

#[test]
fn test_edit_merges_changed_fields() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-02"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["edit", "1", "--title", "Buy oat milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task 1: Buy oat milk"));

    // Fields that were not passed keep their values
    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["show", "1", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["title"].as_str().unwrap(), "Buy oat milk");
    assert_eq!(json["due"].as_str().unwrap(), "2099-01-02");
}

#[test]
fn test_edit_rejects_past_due_dates() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["edit", "1", "--due", "2000-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Due date cannot be in the past"));
}

#[test]
fn test_edit_with_unknown_id_fails() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["edit", "7", "--title", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: 7"));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_the_task() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Buy milk"));

    tick_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"));
}

#[test]
fn test_rm_is_an_alias_for_delete() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Buy milk"));
}

// =============================================================================
// Show Tests
// =============================================================================

#[test]
fn test_show_displays_details() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy milk",
            "--due",
            "2099-01-01",
            "--desc",
            "Semi-skimmed",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1: Buy milk"))
        .stdout(predicate::str::contains("uncategorised"))
        .stdout(predicate::str::contains("2099-01-01"))
        .stdout(predicate::str::contains("Semi-skimmed"));
}

#[test]
fn test_show_with_unknown_id_fails() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: 3"));
}

// =============================================================================
// Project Tests
// =============================================================================

#[test]
fn test_project_add_and_list() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added project 2: Work"));

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uncategorised"))
        .stdout(predicate::str::contains("Work"));
}

#[test]
fn test_project_add_rejects_duplicates() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A project named 'Work' already exists",
        ));
}

#[test]
fn test_project_delete_reassigns_tasks() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "report",
            "--due",
            "2099-01-01",
            "--project",
            "Work",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project 'Work'"))
        .stdout(predicate::str::contains("1 task(s) moved to 'uncategorised'"));

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["show", "1", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["project"].as_str().unwrap(), "uncategorised");
}

#[test]
fn test_project_delete_refuses_the_default_project() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The 'uncategorised' project cannot be deleted",
        ));
}

#[test]
fn test_project_delete_with_unknown_id_fails() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: 9"));
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_status_shows_overview() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "1"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workspace Status"))
        .stdout(predicate::str::contains("uncategorised"));
}

#[test]
fn test_status_json_counts() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Walk dog", "--due", "2099-01-01"])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "1"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["tasks"]["total"].as_u64().unwrap(), 2);
    assert_eq!(json["tasks"]["done"].as_u64().unwrap(), 1);
    assert_eq!(json["tasks"]["open"].as_u64().unwrap(), 1);
    assert!(json["projects"].is_array());
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_default_filter_applies_to_list() {
    let dir = setup_workspace();

    fs::write(
        dir.path().join(".tick/config.toml"),
        "default_filter = \"High\"\n",
    )
    .unwrap();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "urgent thing",
            "--due",
            "2099-01-01",
            "--priority",
            "high",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "later thing", "--due", "2099-01-01"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "urgent thing");
}

#[test]
fn test_config_default_priority_applies_to_add() {
    let dir = setup_workspace();

    fs::write(
        dir.path().join(".tick/config.toml"),
        "default_priority = \"high\"\n",
    )
    .unwrap();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["priority"].as_str().unwrap(), "High");
}

#[test]
fn test_config_default_project_applies_to_add() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Work"])
        .assert()
        .success();

    fs::write(
        dir.path().join(".tick/config.toml"),
        "default_project = \"Work\"\n",
    )
    .unwrap();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["add", "report", "--due", "2099-01-01", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["project"].as_str().unwrap(), "Work");
}

// =============================================================================
// Verbose Flag Tests
// =============================================================================

#[test]
fn test_verbose_flag() {
    let dir = setup_workspace();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "status"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("[verbose]"));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_not_in_workspace_error() {
    let dir = TempDir::new().unwrap();

    tick_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a tick workspace"));
}

#[test]
fn test_corrupt_data_file_warns_and_continues() {
    let dir = setup_workspace();

    tick_cmd()
        .current_dir(dir.path())
        .args(["add", "Buy milk", "--due", "2099-01-01"])
        .assert()
        .success();

    fs::write(dir.path().join(".tick/tasks.json"), "{not json").unwrap();

    // The workspace stays usable; the unreadable file is reported and ignored
    tick_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"))
        .stderr(predicate::str::contains("Warning"));
}

// =============================================================================
// Full Workflow Integration Test
// =============================================================================

#[test]
fn test_full_workflow() {
    let dir = setup_workspace();

    // 1. Create a project
    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "add", "Groceries"])
        .assert()
        .success();

    // 2. Add tasks to it
    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy milk",
            "--due",
            "2099-01-01",
            "--project",
            "Groceries",
            "--priority",
            "high",
        ])
        .assert()
        .success();

    tick_cmd()
        .current_dir(dir.path())
        .args([
            "add",
            "Buy bread",
            "--due",
            "2099-01-02",
            "--project",
            "Groceries",
        ])
        .assert()
        .success();

    // 3. Complete one
    tick_cmd()
        .current_dir(dir.path())
        .args(["done", "1"])
        .assert()
        .success();

    // 4. The project view shows the open task first
    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "Groceries", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"].as_str().unwrap(), "Buy bread");
    assert!(tasks[1]["complete"].as_bool().unwrap());

    // 5. Delete the project; tasks survive under the default project
    tick_cmd()
        .current_dir(dir.path())
        .args(["project", "delete", "2"])
        .assert()
        .success();

    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["list", "uncategorised", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json.as_array().unwrap().len(), 2);

    // 6. Status reflects the final state
    let output = tick_cmd()
        .current_dir(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let json = json_output(&output);
    assert_eq!(json["tasks"]["total"].as_u64().unwrap(), 2);
    assert_eq!(json["tasks"]["done"].as_u64().unwrap(), 1);
}
