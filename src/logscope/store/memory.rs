use super::{parse_records, EntrySource};
use crate::error::Result;
use crate::model::LogEntry;

/// Log records held in memory, in the same JSON Lines format as on disk.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    content: String,
}

impl InMemorySource {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl EntrySource for InMemorySource {
    fn read_entries(&self, max_lines: usize) -> Result<Vec<LogEntry>> {
        parse_records(&self.content, max_lines)
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
