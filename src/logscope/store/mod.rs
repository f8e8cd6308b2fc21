//! # Entry Store
//!
//! The store owns the canonical working set of log entries. Records come from
//! an [`EntrySource`], are normalized exactly once on the way in (see
//! [`normalize`]), and are read-only afterwards. Every view the rest of the
//! crate computes borrows from here; nothing downstream mutates or
//! re-normalizes an entry.
//!
//! ## Implementations
//!
//! - [`fs::JsonlFile`]: newline-delimited JSON on disk (production)
//! - [`memory::InMemorySource`]: the same format held in a string (testing)
//!
//! ## Load failures
//!
//! A missing file, an unreadable file, or a single malformed line fails the
//! whole read. [`EntryStore::load_or_empty`] is the recovery boundary: it
//! logs the error, hands it back for reporting, and yields an empty store so
//! the application stays usable.

use crate::error::{LogscopeError, Result};
use crate::model::LogEntry;
use tracing::{info, warn};

pub mod fs;
pub mod memory;
pub mod normalize;

/// Somewhere raw log records can be read from.
pub trait EntrySource {
    /// Reads and parses the records. With `max_lines > 0` only the last
    /// `max_lines` raw lines are considered.
    fn read_entries(&self, max_lines: usize) -> Result<Vec<LogEntry>>;

    /// Human-readable origin, used in messages and logs.
    fn describe(&self) -> String;
}

/// Parses newline-delimited JSON records, counting `max_lines` from the end.
/// Blank lines are skipped; the first malformed line fails the parse.
pub fn parse_records(content: &str, max_lines: usize) -> Result<Vec<LogEntry>> {
    let lines: Vec<&str> = content.lines().collect();
    let skip = if max_lines == 0 {
        0
    } else {
        lines.len().saturating_sub(max_lines)
    };

    let mut entries = Vec::new();
    for (offset, raw) in lines.iter().enumerate().skip(skip) {
        if raw.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(raw).map_err(|source| LogscopeError::Load {
            line: offset + 1,
            source,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<LogEntry>,
}

impl EntryStore {
    /// Takes ownership of raw entries and normalizes them.
    pub fn from_entries(mut entries: Vec<LogEntry>) -> Self {
        normalize::normalize_entries(&mut entries);
        Self { entries }
    }

    pub fn load<S: EntrySource>(source: &S, max_lines: usize) -> Result<Self> {
        let entries = source.read_entries(max_lines)?;
        Ok(Self::from_entries(entries))
    }

    /// Loads from `source`, falling back to an empty store on failure.
    pub fn load_or_empty<S: EntrySource>(
        source: &S,
        max_lines: usize,
    ) -> (Self, Option<LogscopeError>) {
        match Self::load(source, max_lines) {
            Ok(store) => {
                info!(source = %source.describe(), count = store.len(), "loaded log entries");
                (store, None)
            }
            Err(err) => {
                warn!(source = %source.describe(), error = %err, "failed to load log");
                (Self::default(), Some(err))
            }
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
