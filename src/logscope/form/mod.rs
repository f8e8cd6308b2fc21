//! # Form Schema Engine
//!
//! Options are edited through a form whose layout comes from a declarative
//! JSON definition (sections of typed fields) instead of hard-coded controls.
//! The engine has three entry points around the host's [`SettingsState`]:
//!
//! ```text
//! FormDefinition --compute_defaults--> SettingsState      (startup)
//! FormDefinition + SettingsState --LiveForm::open--> LiveForm (edit)
//! FormDefinition + LiveForm --extract_submission--> SettingsState (accept)
//! ```
//!
//! Cancelling is dropping the [`LiveForm`]: nothing flows back, and the
//! settings the form was opened with stay as they were.
//!
//! Field kinds are a closed set ([`FieldType`]). A definition may name other
//! kinds; building such a field fails with
//! [`LogscopeError::UnsupportedFieldType`], which names the field and the
//! kind, and the whole form refuses to open.
//!
//! Titles, on the form and on sections, are labels only.

use crate::error::{LogscopeError, Result};
use serde::Serialize;
use serde_json::Value;

pub mod schema;
pub mod settings;
pub mod state;

pub use schema::{ChoiceSpec, FieldDef, FieldType, FormDefinition, Section};
pub use settings::SettingsState;
pub use state::{parse_bool, Choice, EditError, FieldState};

/// Initial settings: each field's `default`, else the value an untouched
/// field submits. Opening the form on these and accepting it unchanged gives
/// them back.
pub fn compute_defaults(definition: &FormDefinition) -> SettingsState {
    definition
        .fields()
        .map(|field| {
            let value = match &field.default {
                Some(v) => v.clone(),
                None => blank_value(field),
            };
            (field.name.clone(), value)
        })
        .collect()
}

/// Text is empty, a checkbox is off, a choice is its first selectable
/// option. Radios skip disabled options; with none left the value is null.
fn blank_value(field: &FieldDef) -> Value {
    match &field.kind {
        FieldType::Text => Value::String(String::new()),
        FieldType::Checkbox => Value::Bool(false),
        FieldType::Select => first_choice(field, false),
        FieldType::Radio => first_choice(field, true),
        FieldType::Unsupported(_) => Value::Null,
    }
}

fn first_choice(field: &FieldDef, skip_disabled: bool) -> Value {
    field
        .options
        .iter()
        .find(|opt| !(skip_disabled && opt.disabled()))
        .map(|opt| Value::String(opt.value().to_string()))
        .unwrap_or(Value::Null)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveField {
    pub name: String,
    pub label: String,
    pub state: FieldState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<LiveField>,
}

/// A form being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sections: Vec<LiveSection>,
}

impl LiveForm {
    /// Builds live state for every field. A pinned `value` in the definition
    /// wins over the entry in `current`.
    pub fn open(definition: &FormDefinition, current: &SettingsState) -> Result<Self> {
        let mut sections = Vec::with_capacity(definition.sections.len());
        for section in &definition.sections {
            let mut fields = Vec::with_capacity(section.fields.len());
            for field in &section.fields {
                let value = field.value.as_ref().or_else(|| current.get(&field.name));
                fields.push(LiveField {
                    name: field.name.clone(),
                    label: field.label.clone(),
                    state: FieldState::build(field, value)?,
                });
            }
            sections.push(LiveSection {
                title: section.title.clone(),
                fields,
            });
        }
        Ok(Self {
            title: definition.title.clone(),
            sections,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &LiveField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields().find(|f| f.name == name).map(|f| &f.state)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.name == name)
            .map(|f| &mut f.state)
    }

    /// Applies a textual edit to one field.
    pub fn edit(&mut self, name: &str, raw: &str) -> Result<()> {
        let state = self
            .field_mut(name)
            .ok_or_else(|| LogscopeError::Form(format!("no field named `{}`", name)))?;
        state
            .apply(raw)
            .map_err(|err| LogscopeError::Form(format!("field `{}`: {}", name, err)))
    }
}

/// Reads the live value of every field the definition names. The keys of the
/// result are exactly the definition's field names.
pub fn extract_submission(definition: &FormDefinition, form: &LiveForm) -> Result<SettingsState> {
    definition
        .fields()
        .map(|field| {
            let state = form.field(&field.name).ok_or_else(|| {
                LogscopeError::Form(format!("field `{}` is missing from the form", field.name))
            })?;
            Ok::<_, LogscopeError>((field.name.clone(), state.value()))
        })
        .collect()
}
