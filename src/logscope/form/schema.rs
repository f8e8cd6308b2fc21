//! The declarative form definition, as read from JSON.

use crate::error::{LogscopeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Pinned value; wins over the current settings when the form opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceSpec>,
}

/// The kinds of field a form can hold. Unknown tags are kept so that the
/// error can name them when the field is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Checkbox,
    Select,
    Radio,
    Unsupported(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Unsupported(other) => other,
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => FieldType::Text,
            "checkbox" => FieldType::Checkbox,
            "select" => FieldType::Select,
            "radio" => FieldType::Radio,
            _ => FieldType::Unsupported(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A select/radio option: either a bare string or a structured entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSpec {
    Bare(String),
    Full {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        value: String,
        #[serde(default)]
        disabled: bool,
    },
}

impl ChoiceSpec {
    pub fn value(&self) -> &str {
        match self {
            ChoiceSpec::Bare(v) => v,
            ChoiceSpec::Full { value, .. } => value,
        }
    }

    /// Falls back to the value when no label is given.
    pub fn label(&self) -> &str {
        match self {
            ChoiceSpec::Bare(v) => v,
            ChoiceSpec::Full { label, value, .. } => label.as_deref().unwrap_or(value),
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, ChoiceSpec::Full { disabled: true, .. })
    }
}

impl FormDefinition {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(LogscopeError::Io)?;
        Self::from_json(&content)
            .map_err(|err| LogscopeError::Form(format!("{}: {}", path.display(), err)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let definition: FormDefinition =
            serde_json::from_str(content).map_err(|err| LogscopeError::Form(err.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Field names are the keys of the settings mapping and must be unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in self.fields() {
            if !seen.insert(field.name.as_str()) {
                return Err(LogscopeError::Form(format!(
                    "duplicate field name `{}`",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// All fields, in section order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields().find(|f| f.name == name)
    }
}
