//! # Highlight Engine
//!
//! Tags each visible row with at most one style. Predicates are checked in
//! priority order and the first match wins; styles never stack.

use crate::model::LogEntry;
use crate::query::is_issue;
use serde::Serialize;

/// Substring that marks the commands the pattern highlight is for.
pub const PATTERN_MARKER: &str = "ct";

/// Toggles that drive filtering and annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightFlags {
    pub highlight_issues: bool,
    pub highlight_pattern: bool,
    pub issues_only: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    #[default]
    Plain,
    /// Issue rows (rendered bold red).
    Alert,
    /// Pattern matches (rendered bold green).
    Notice,
}

pub fn annotate(entry: &LogEntry, flags: &HighlightFlags) -> RowStyle {
    if flags.highlight_issues && is_issue(entry) {
        RowStyle::Alert
    } else if flags.highlight_pattern && entry.command.contains(PATTERN_MARKER) {
        RowStyle::Notice
    } else {
        RowStyle::Plain
    }
}
