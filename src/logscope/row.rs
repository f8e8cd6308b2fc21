//! Display rows and detail views.
//!
//! Rows are recomputed from the sorted view on every refresh and never
//! mutated afterwards. The `#` column is the 1-based position in the current
//! view, so it changes as filters and sorting change. A detail view is built
//! from the entry itself, never from the (truncated) row.

use crate::highlight::{annotate, HighlightFlags, RowStyle};
use crate::model::LogEntry;
use serde::Serialize;
use std::fmt;

/// Commands are shown cut to this many characters in the table.
pub const COMMAND_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub index: usize,
    pub line: String,
    pub profile: String,
    pub start_time: String,
    pub duration: String,
    pub command: String,
    pub style: RowStyle,
}

impl DisplayRow {
    pub fn new(index: usize, entry: &LogEntry, style: RowStyle) -> Self {
        Self {
            index,
            line: entry.line.to_string(),
            profile: entry.profile.clone(),
            start_time: without_fraction(&entry.start_time).to_string(),
            duration: entry.duration.to_string(),
            command: truncate_chars(&entry.command, COMMAND_WIDTH),
            style,
        }
    }

    /// Cell texts in column order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.index.to_string(),
            self.line.clone(),
            self.profile.clone(),
            self.start_time.clone(),
            self.duration.clone(),
            self.command.clone(),
        ]
    }
}

pub fn build_rows(sorted: &[&LogEntry], flags: &HighlightFlags) -> Vec<DisplayRow> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, entry)| DisplayRow::new(i + 1, entry, annotate(entry, flags)))
        .collect()
}

/// Everything before the first `.`, which drops fractional seconds.
pub fn without_fraction(timestamp: &str) -> &str {
    timestamp.split('.').next().unwrap_or(timestamp)
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Full, untruncated outputs of one entry. Empty outputs are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDetail {
    pub index: usize,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryDetail {
    pub fn from_entry(index: usize, entry: &LogEntry) -> Self {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Self {
            index,
            command: entry.command.clone(),
            stdout: non_empty(&entry.stdout),
            result: non_empty(&entry.result),
            error: non_empty(&entry.error),
        }
    }

    /// Titled sections in display order; `Command` is always present.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        let mut sections = vec![("Command", self.command.as_str())];
        for (title, value) in [
            ("Stdout", &self.stdout),
            ("Result", &self.result),
            ("Error", &self.error),
        ] {
            if let Some(text) = value {
                sections.push((title, text.as_str()));
            }
        }
        sections
    }
}

impl fmt::Display for EntryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (title, text)) in self.sections().into_iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}:\n{}", title, text)?;
        }
        Ok(())
    }
}
