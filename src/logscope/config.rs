use crate::error::{LogscopeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "logscope.json";
pub const DEFAULT_FORM_DEFINITION: &str = "settings.json";

/// Configuration for logscope, read from logscope.json
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Only the last `max_lines` raw lines of a log are read; 0 reads everything
    #[serde(default)]
    pub max_lines: usize,

    /// Path of the options form definition. Unset means settings.json, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_definition: Option<PathBuf>,
}

impl InspectorConfig {
    /// Load config from the given file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(LogscopeError::Io)?;
        let config: InspectorConfig =
            serde_json::from_str(&content).map_err(LogscopeError::Serialization)?;
        Ok(config)
    }

    /// The form definition to read, and whether it was named explicitly.
    /// Only an implicit definition may be absent.
    pub fn form_path(&self) -> (PathBuf, bool) {
        match &self.form_definition {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_FORM_DEFINITION), false),
        }
    }
}
