mod common;
use common::cli::{SaveitWorkspace, run_shell};

#[test]
fn test_undo_redo_branch_in_shell() {
    let workspace = SaveitWorkspace::new();
    let script = "\
add X x
add Y y
undo
add Z z
redo
list
";
    let out = run_shell(&workspace, script, "branch");
    assert!(out.status.success(), "{}", out.stderr);
    assert!(out.stderr.contains("No more commands to redo"), "{}", out.stderr);
    assert!(out.stdout.contains("1. X"));
    assert!(out.stdout.contains("2. Z"));
    assert!(!out.stdout.contains(". Y"));

    let lines = workspace.data_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"Z\""));
}

#[test]
fn test_select_supplies_implicit_targets() {
    let workspace = SaveitWorkspace::new();
    let script = r#"
add "Build hangs" "Blocking waiting for file lock"
add "Slow tests" "sleep everywhere"
select 2
solve https://example.com/mock-time "Use a mock clock"
tag flaky
select 2 1
edit-solution --remark "Mock the clock"
home
show 2
"#;
    let out = run_shell(&workspace, script, "select");
    assert!(out.status.success(), "{}", out.stderr);
    assert!(!out.stderr.contains("Error"), "{}", out.stderr);
    assert!(out.stdout.contains("Now at /"));
    assert!(out.stdout.contains("2. Slow tests"));
    assert!(out.stdout.contains("Tags: [flaky]"));
    assert!(out.stdout.contains("https://example.com/mock-time - Mock the clock"));
    assert!(out.stdout.contains("Searched 2 time(s)"));
}

#[test]
fn test_failed_lines_do_not_stop_the_shell() {
    let workspace = SaveitWorkspace::new();
    let script = "\
add A a
delete 9
bogus-command
tag
# comments are skipped
add B b
list
";
    let out = run_shell(&workspace, script, "failures");
    assert!(out.status.success());
    assert!(out.stderr.contains("The issue index 9 is out of range (have 1)"));
    assert!(out.stdout.contains("2. B"));
    assert_eq!(workspace.data_lines().len(), 2);
}

#[test]
fn test_undo_all_then_redo_all() {
    let workspace = SaveitWorkspace::new();
    let script = "\
add A a
add B b
delete 1
undo
undo
undo
undo
redo
redo
redo
list
";
    let out = run_shell(&workspace, script, "round_trip");
    assert!(out.status.success());
    assert_eq!(out.stderr.matches("No more commands to undo").count(), 1);
    assert!(out.stdout.contains("Undone to version 0"));
    assert!(out.stdout.contains("Redone to version 3"));
    assert!(out.stdout.contains("1. B"));
    assert!(!out.stdout.contains(". A"));
}

#[test]
fn test_exit_stops_reading() {
    let workspace = SaveitWorkspace::new();
    let out = run_shell(&workspace, "add A a\nexit\nadd B b\n", "exit");
    assert!(out.status.success());
    assert_eq!(workspace.data_lines().len(), 1);
}
