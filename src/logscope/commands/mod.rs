use crate::form::SettingsState;
use crate::highlight::HighlightFlags;
use crate::model::LogEntry;
use crate::query::{self, Query};
use crate::row::{DisplayRow, EntryDetail};
use crate::sort::SortState;
use crate::store::EntryStore;
use chrono::NaiveDateTime;

pub mod detail;
pub mod options;
pub mod view;

/// Session state behind the table: what is filtered, flagged and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: Query,
    pub flags: HighlightFlags,
    pub sort: SortState,
}

/// Filters then sorts the store for `state`.
pub fn sorted_view<'a>(
    store: &'a EntryStore,
    state: &ViewState,
    now: NaiveDateTime,
) -> Vec<&'a LogEntry> {
    let visible = query::visible(store.entries(), &state.query, &state.flags, now);
    state.sort.apply(&visible)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub headers: Vec<String>,
    pub rows: Vec<DisplayRow>,
    pub detail: Option<EntryDetail>,
    pub settings: Option<SettingsState>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_table(mut self, headers: Vec<String>, rows: Vec<DisplayRow>) -> Self {
        self.headers = headers;
        self.rows = rows;
        self
    }

    pub fn with_detail(mut self, detail: EntryDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_settings(mut self, settings: SettingsState) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
