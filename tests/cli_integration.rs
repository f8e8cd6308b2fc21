use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LOG: &str = r#"{"line": 1, "profile": "spockdoor", "start_time": "2024-05-10T11:00:00.5", "duration": 0.5, "command": "get_ipython().run_line_magic('wa', '')", "stdout": "motor at 10"}
{"line": 2, "profile": "secondDoor", "start_time": "2024-05-10T11:05:00.1", "duration": 1.25, "command": "fetch('http://www.example.org')"}
{"line": 3, "profile": "lab", "start_time": "2024-05-10T11:10:00", "duration": "n/a", "command": "ct 0.5", "result": "done"}
"#;

const FORM: &str = r#"{
    "title": "Inspector options",
    "sections": [
        {"title": "General", "fields": [
            {"name": "user", "type": "text", "label": "User name"},
            {"name": "verbose", "type": "checkbox", "label": "Verbose", "default": true}
        ]},
        {"fields": [
            {"name": "theme", "type": "select", "label": "Theme", "options": ["dark", "light"]},
            {"name": "window", "type": "radio", "label": "Time window", "options": [
                {"label": "Last hour", "value": "1h"},
                {"label": "Custom", "value": "custom", "disabled": true}
            ]}
        ]}
    ]
}"#;

/// A scratch working directory holding `session.jsonl`.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("session.jsonl"), LOG).unwrap();
    dir
}

fn logscope(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("logscope").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json_rows(dir: &Path, args: &[&str]) -> Vec<Value> {
    let output = logscope(dir)
        .arg("list")
        .arg("session.jsonl")
        .arg("--json")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    parsed.as_array().unwrap().clone()
}

fn field<'a>(rows: &'a [Value], name: &str) -> Vec<&'a str> {
    rows.iter().map(|r| r[name].as_str().unwrap()).collect()
}

#[test]
fn test_list_table() {
    let dir = workspace();
    logscope(dir.path())
        .arg("list")
        .arg("session.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("start_time"))
        .stdout(predicate::str::contains("2024-05-10T11:00:00 "))
        .stdout(predicate::str::contains("wa"))
        .stdout(predicate::str::contains("3 of 3 entries"))
        .stdout(predicate::str::contains("get_ipython").not());
}

#[test]
fn test_list_json_highlights_issue_row() {
    let dir = workspace();
    let rows = json_rows(dir.path(), &["--highlight-issues", "--highlight-pattern"]);
    assert_eq!(field(&rows, "style"), vec!["plain", "alert", "notice"]);
    assert_eq!(field(&rows, "profile"), vec!["1", "2", "lab"]);
}

#[test]
fn test_list_sort_clicks() {
    let dir = workspace();
    let once = json_rows(dir.path(), &["--sort", "line"]);
    assert_eq!(field(&once, "line"), vec!["3", "2", "1"]);

    let twice = json_rows(dir.path(), &["--sort", "line", "--sort", "line"]);
    assert_eq!(field(&twice, "line"), vec!["1", "2", "3"]);
}

#[test]
fn test_list_query_and_issues_only() {
    let dir = workspace();
    let rows = json_rows(dir.path(), &["--query", "CT"]);
    assert_eq!(field(&rows, "command"), vec!["ct 0.5"]);

    let rows = json_rows(dir.path(), &["--query", "CT", "--issues-only"]);
    assert_eq!(field(&rows, "line"), vec!["2"]);
}

#[test]
fn test_list_time_window() {
    let dir = workspace();
    let rows = json_rows(dir.path(), &["--since", "2024-05-10T11:04:00"]);
    assert_eq!(field(&rows, "line"), vec!["2", "3"]);

    let rows = json_rows(
        dir.path(),
        &["--since", "2024-05-10 11:00:00", "--until", "2024-05-10 11:06:00"],
    );
    assert_eq!(field(&rows, "line"), vec!["1", "2"]);
}

#[test]
fn test_list_unknown_column_fails() {
    let dir = workspace();
    logscope(dir.path())
        .args(["list", "session.jsonl", "--sort", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column: colour"));
}

#[test]
fn test_missing_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    logscope(dir.path())
        .args(["list", "absent.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load"))
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_malformed_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("session.jsonl"),
        "{\"line\": 1, \"command\": \"a\"}\n{oops\n",
    )
    .unwrap();
    let rows = json_rows(dir.path(), &[]);
    assert!(rows.is_empty());

    logscope(dir.path())
        .args(["list", "session.jsonl", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_max_lines_from_config() {
    let dir = workspace();
    fs::write(dir.path().join("logscope.json"), r#"{"max_lines": 1}"#).unwrap();
    let rows = json_rows(dir.path(), &[]);
    assert_eq!(field(&rows, "line"), vec!["3"]);

    let rows = json_rows(dir.path(), &["--max-lines", "2"]);
    assert_eq!(field(&rows, "line"), vec!["2", "3"]);
}

#[test]
fn test_show_follows_sorted_view() {
    let dir = workspace();
    logscope(dir.path())
        .args(["show", "session.jsonl", "1", "--sort", "line"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Command:\nct 0.5"))
        .stdout(predicate::str::contains("Result:\ndone"))
        .stdout(predicate::str::contains("Stdout:").not());
}

#[test]
fn test_show_out_of_range() {
    let dir = workspace();
    logscope(dir.path())
        .args(["show", "session.jsonl", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 9 is not in the current view"));
}

#[test]
fn test_options_submit() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), FORM).unwrap();
    logscope(dir.path())
        .args(["options", "--set", "theme=light", "--set", "user=ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspector options"))
        .stdout(predicate::str::contains("Custom = custom [disabled]"))
        .stdout(predicate::str::contains("Options updated"))
        .stdout(predicate::str::contains("\"theme\": \"light\""))
        .stdout(predicate::str::contains("\"user\": \"ada\""));
}

#[test]
fn test_options_cancel() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), FORM).unwrap();
    logscope(dir.path())
        .args(["options", "--set", "theme=light", "--cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Options unchanged"))
        .stdout(predicate::str::contains("\"theme\": \"dark\""));
}

#[test]
fn test_options_rejects_disabled_choice() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), FORM).unwrap();
    logscope(dir.path())
        .args(["options", "--set", "window=custom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("option `custom` is disabled"));
}

#[test]
fn test_options_without_definition() {
    let dir = tempfile::tempdir().unwrap();
    logscope(dir.path())
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"));
}

#[test]
fn test_unsupported_field_type_is_fatal() {
    let dir = workspace();
    let form = r#"{"sections": [{"fields": [{"name": "speed", "type": "slider", "label": "Speed"}]}]}"#;
    fs::write(dir.path().join("odd.json"), form).unwrap();
    logscope(dir.path())
        .args(["options", "--form", "odd.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unsupported field type `slider` for field `speed`",
        ));
}

#[test]
fn test_invalid_form_is_fatal() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), "not json").unwrap();
    logscope(dir.path())
        .args(["list", "session.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form error"));
}

#[test]
fn test_browse_session() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), FORM).unwrap();
    logscope(dir.path())
        .args(["browse", "session.jsonl"])
        .write_stdin("search ct\nshow 1\noptions\nset theme=light\naccept\nsettings\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 3 entries"))
        .stdout(predicate::str::contains("Result:\ndone"))
        .stdout(predicate::str::contains("Options updated"))
        .stdout(predicate::str::contains("\"theme\": \"light\""));
}

#[test]
fn test_browse_reports_mistakes() {
    let dir = workspace();
    logscope(dir.path())
        .args(["browse", "session.jsonl"])
        .write_stdin("sort #\nshow 7\nfly\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Column # is not sortable"))
        .stdout(predicate::str::contains("Row 7 is not in the current view"))
        .stdout(predicate::str::contains("Unknown action: fly"));
}

#[test]
fn test_options_unedited_keep_defaults() {
    let dir = workspace();
    fs::write(dir.path().join("settings.json"), FORM).unwrap();
    logscope(dir.path())
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user\": \"\""))
        .stdout(predicate::str::contains("\"verbose\": true"))
        .stdout(predicate::str::contains("\"window\": \"1h\""));
}

#[test]
fn test_named_missing_form_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    logscope(dir.path())
        .args(["options", "--form", "settings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_browse_window_with_spaced_bounds() {
    let dir = workspace();
    logscope(dir.path())
        .args(["browse", "session.jsonl"])
        .write_stdin("window 2024-05-10 11:00:00 .. 2024-05-10 11:06:00\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 entries"));
}
