//! # Sort Engine
//!
//! Orders the visible set by one column. `line`, `start_time` and `duration`
//! compare numerically when a value parses as a float and as text when it
//! does not, so one column can silently mix both orderings. Numbers sort
//! before text. `command` is always text. `#` and `profile` are not sortable.
//!
//! Sorting is stable in both directions: descending order is produced by a
//! reversed comparator, never by reversing the output, so entries with equal
//! keys keep their prior relative order.

use crate::error::{LogscopeError, Result};
use crate::model::{LogEntry, Scalar};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const ASCENDING_MARKER: &str = " ↑";
pub const DESCENDING_MARKER: &str = " ↓";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Index,
    Line,
    Profile,
    StartTime,
    Duration,
    Command,
}

impl Column {
    /// Display order of the table.
    pub const ALL: [Column; 6] = [
        Column::Index,
        Column::Line,
        Column::Profile,
        Column::StartTime,
        Column::Duration,
        Column::Command,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::Index => "#",
            Column::Line => "line",
            Column::Profile => "profile",
            Column::StartTime => "start_time",
            Column::Duration => "duration",
            Column::Command => "command",
        }
    }

    pub fn is_sortable(self) -> bool {
        !matches!(self, Column::Index | Column::Profile)
    }

    /// Resolves a header label, with or without a direction marker.
    pub fn from_label(label: &str) -> Option<Column> {
        let bare = label
            .strip_suffix(ASCENDING_MARKER)
            .or_else(|| label.strip_suffix(DESCENDING_MARKER))
            .unwrap_or(label)
            .trim();
        match bare {
            "#" => Some(Column::Index),
            "line" => Some(Column::Line),
            "profile" | "spock" => Some(Column::Profile),
            "start_time" | "startTime" => Some(Column::StartTime),
            "duration" => Some(Column::Duration),
            "command" => Some(Column::Command),
            _ => None,
        }
    }
}

impl FromStr for Column {
    type Err = LogscopeError;

    fn from_str(s: &str) -> Result<Self> {
        Column::from_label(s).ok_or_else(|| LogscopeError::Api(format!("Unknown column: {}", s)))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which column the view is sorted by, and in which direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub active: Option<Column>,
    pub descending: bool,
}

impl SortState {
    /// A header click. Every accepted click flips the direction and activates
    /// `column`; the direction carries over between columns. Clicks on
    /// unsortable columns change nothing and return `false`.
    pub fn toggle(&mut self, column: Column) -> bool {
        if !column.is_sortable() {
            return false;
        }
        self.descending = !self.descending;
        self.active = Some(column);
        true
    }

    pub fn apply<'a>(&self, visible: &[&'a LogEntry]) -> Vec<&'a LogEntry> {
        match self.active {
            Some(column) => sort(visible, column, self.descending),
            None => visible.to_vec(),
        }
    }

    /// Header labels; only the active column carries a direction marker.
    pub fn headers(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|&column| {
                if self.active == Some(column) {
                    let marker = if self.descending {
                        DESCENDING_MARKER
                    } else {
                        ASCENDING_MARKER
                    };
                    format!("{}{}", column.label(), marker)
                } else {
                    column.label().to_string()
                }
            })
            .collect()
    }
}

pub fn sort<'a>(visible: &[&'a LogEntry], column: Column, descending: bool) -> Vec<&'a LogEntry> {
    if !column.is_sortable() {
        return visible.to_vec();
    }

    let mut keyed: Vec<(SortKey, &'a LogEntry)> = visible
        .iter()
        .map(|&entry| (SortKey::of(entry, column), entry))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        if descending {
            b.compare(a)
        } else {
            a.compare(b)
        }
    });

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(entry: &LogEntry, column: Column) -> Self {
        match column {
            Column::Line => Self::coerce(&entry.line),
            Column::StartTime => Self::coerce_text(&entry.start_time),
            Column::Duration => Self::coerce(&entry.duration),
            Column::Command => SortKey::Text(entry.command.clone()),
            Column::Index | Column::Profile => SortKey::Text(String::new()),
        }
    }

    fn coerce(value: &Scalar) -> Self {
        match value {
            Scalar::Number(n) => match n.as_f64() {
                Some(f) => SortKey::Number(f),
                None => Self::coerce_text(&n.to_string()),
            },
            Scalar::Text(s) => Self::coerce_text(s),
        }
    }

    fn coerce_text(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(f) => SortKey::Number(f),
            Err(_) => SortKey::Text(raw.to_string()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}
