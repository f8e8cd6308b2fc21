//! Shared fixtures for unit and integration tests.

use crate::model::LogEntry;
use crate::window::parse_timestamp;
use chrono::NaiveDateTime;

pub const SAMPLE_FORM: &str = r#"{
    "title": "Inspector options",
    "sections": [
        {
            "title": "General",
            "fields": [
                {"name": "user", "type": "text", "label": "User name"},
                {"name": "verbose", "type": "checkbox", "label": "Verbose", "default": true}
            ]
        },
        {
            "fields": [
                {"name": "theme", "type": "select", "label": "Theme", "options": ["dark", "light"]},
                {"name": "window", "type": "radio", "label": "Time window", "options": [
                    {"label": "Last hour", "value": "1h"},
                    {"label": "Last day", "value": "24h"},
                    {"label": "Custom", "value": "custom", "disabled": true},
                    "all"
                ]}
            ]
        }
    ]
}"#;

/// Three records; only the second one is an issue.
pub const SAMPLE_LOG: &str = r#"{"line": 1, "profile": "spockdoor", "start_time": "2024-05-10T11:00:00.5", "duration": 0.5, "command": "get_ipython().run_line_magic('wa', '')", "stdout": "motor at 10"}
{"line": 2, "profile": "secondDoor", "start_time": "2024-05-10T11:05:00.1", "duration": 1.25, "command": "fetch('http://www.example.org')"}
{"line": 3, "profile": "lab", "start_time": "2024-05-10T11:10:00", "duration": "n/a", "command": "ct 0.5", "result": "done"}
"#;

pub fn entry(line: i64, command: &str) -> LogEntry {
    LogEntry::new(line, command)
}

pub fn entry_with_stdout(line: i64, command: &str, stdout: &str) -> LogEntry {
    LogEntry {
        stdout: Some(stdout.to_string()),
        ..LogEntry::new(line, command)
    }
}

/// Reference instant for time-window tests: 2024-05-10 12:00:00.
pub fn fixed_now() -> NaiveDateTime {
    parse_timestamp("2024-05-10T12:00:00").expect("valid fixture timestamp")
}
