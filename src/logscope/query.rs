//! # Query Engine
//!
//! Derives the visible set from the store. Two predicates select rows:
//!
//! - the free-text query, a case-insensitive substring match on `command`
//! - "issues only", which keeps entries matching [`is_issue`]
//!
//! They do not compose: while issues-only is on, its result **replaces** the
//! text filter's. The query text is kept and takes effect again once
//! issues-only is switched off. The time window, when bounded, is applied on
//! top of whichever of the two is in effect.
//!
//! The result borrows from the store and keeps store order.

use crate::highlight::HighlightFlags;
use crate::model::LogEntry;
use crate::window::TimeWindow;
use chrono::NaiveDateTime;

/// The free-text query and time window. Issues-only lives in
/// [`HighlightFlags`] alongside the other toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub window: TimeWindow,
}

/// Heuristic error detection: `www` in the command, or an error marker in
/// stdout. The casing of each marker is significant.
pub fn is_issue(entry: &LogEntry) -> bool {
    let stdout = entry.stdout_text();
    entry.command.contains("www")
        || stdout.contains("error")
        || stdout.contains("Error")
        || stdout.contains("DevError")
}

pub fn matches_text(entry: &LogEntry, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || entry.command.to_lowercase().contains(&needle)
}

pub fn visible<'a>(
    entries: &'a [LogEntry],
    query: &Query,
    flags: &HighlightFlags,
    now: NaiveDateTime,
) -> Vec<&'a LogEntry> {
    entries
        .iter()
        .filter(|e| {
            if flags.issues_only {
                is_issue(e)
            } else {
                matches_text(e, &query.text)
            }
        })
        .filter(|e| query.window.contains(e, now))
        .collect()
}
