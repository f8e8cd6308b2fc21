use super::{parse_records, EntrySource};
use crate::error::{LogscopeError, Result};
use crate::model::LogEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON Lines log file on disk.
pub struct JsonlFile {
    path: PathBuf,
}

impl JsonlFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_home(path.as_ref()),
        }
    }
}

impl EntrySource for JsonlFile {
    fn read_entries(&self, max_lines: usize) -> Result<Vec<LogEntry>> {
        let content = fs::read_to_string(&self.path).map_err(LogscopeError::Io)?;
        parse_records(&content, max_lines)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Expands a leading `~` to the home directory, when one is known.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
