//! Live, editable state of a single field.

use super::schema::{FieldDef, FieldType};
use crate::error::{LogscopeError, Result};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldState {
    Text {
        value: String,
    },
    Checkbox {
        checked: bool,
    },
    Select {
        choices: Vec<Choice>,
        selected: Option<usize>,
    },
    /// Exclusive choice; disabled entries are listed but never selected.
    Radio {
        choices: Vec<Choice>,
        selected: Option<usize>,
    },
}

/// Why an edit was refused. The live state is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("{0} field does not take this kind of value")]
    WrongKind(&'static str),

    #[error("`{0}` is not one of the options")]
    UnknownOption(String),

    #[error("option `{0}` is disabled")]
    DisabledOption(String),

    #[error("`{0}` is not a boolean")]
    NotABool(String),
}

impl FieldState {
    pub fn build(field: &FieldDef, current: Option<&Value>) -> Result<Self> {
        let state = match &field.kind {
            FieldType::Text => FieldState::Text {
                value: current.map(text_of).unwrap_or_default(),
            },
            FieldType::Checkbox => FieldState::Checkbox {
                checked: current.is_some_and(truthy),
            },
            FieldType::Select => {
                let choices = choices_of(field, false);
                let selected = position_of(&choices, current);
                FieldState::Select { choices, selected }
            }
            FieldType::Radio => {
                let choices = choices_of(field, true);
                let selected = position_of(&choices, current);
                FieldState::Radio { choices, selected }
            }
            FieldType::Unsupported(kind) => {
                return Err(LogscopeError::UnsupportedFieldType {
                    field: field.name.clone(),
                    kind: kind.clone(),
                })
            }
        };
        Ok(state)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldState::Text { .. } => "text",
            FieldState::Checkbox { .. } => "checkbox",
            FieldState::Select { .. } => "select",
            FieldState::Radio { .. } => "radio",
        }
    }

    /// The value a submission records for this field.
    pub fn value(&self) -> Value {
        match self {
            FieldState::Text { value } => Value::String(value.clone()),
            FieldState::Checkbox { checked } => Value::Bool(*checked),
            FieldState::Select { choices, selected } | FieldState::Radio { choices, selected } => {
                selected
                    .and_then(|i| choices.get(i))
                    .map(|c| Value::String(c.value.clone()))
                    .unwrap_or(Value::Null)
            }
        }
    }

    pub fn set_text(&mut self, text: &str) -> std::result::Result<(), EditError> {
        match self {
            FieldState::Text { value } => {
                *value = text.to_string();
                Ok(())
            }
            other => Err(EditError::WrongKind(other.kind_name())),
        }
    }

    pub fn set_checked(&mut self, on: bool) -> std::result::Result<(), EditError> {
        match self {
            FieldState::Checkbox { checked } => {
                *checked = on;
                Ok(())
            }
            other => Err(EditError::WrongKind(other.kind_name())),
        }
    }

    pub fn select(&mut self, value: &str) -> std::result::Result<(), EditError> {
        match self {
            FieldState::Select { choices, selected } | FieldState::Radio { choices, selected } => {
                let index = choices
                    .iter()
                    .position(|c| c.value == value)
                    .ok_or_else(|| EditError::UnknownOption(value.to_string()))?;
                if choices[index].disabled {
                    return Err(EditError::DisabledOption(value.to_string()));
                }
                *selected = Some(index);
                Ok(())
            }
            other => Err(EditError::WrongKind(other.kind_name())),
        }
    }

    /// Applies an edit given as text, interpreted according to the field kind.
    pub fn apply(&mut self, raw: &str) -> std::result::Result<(), EditError> {
        match self {
            FieldState::Text { .. } => self.set_text(raw),
            FieldState::Checkbox { .. } => {
                let on = parse_bool(raw).ok_or_else(|| EditError::NotABool(raw.to_string()))?;
                self.set_checked(on)
            }
            FieldState::Select { .. } | FieldState::Radio { .. } => self.select(raw),
        }
    }
}

fn choices_of(field: &FieldDef, honor_disabled: bool) -> Vec<Choice> {
    field
        .options
        .iter()
        .map(|opt| Choice {
            label: opt.label().to_string(),
            value: opt.value().to_string(),
            disabled: honor_disabled && opt.disabled(),
        })
        .collect()
}

fn position_of(choices: &[Choice], current: Option<&Value>) -> Option<usize> {
    let wanted = current?.as_str()?;
    choices
        .iter()
        .position(|c| c.value == wanted && !c.disabled)
}

/// Truthiness of a JSON value: null, false, zero and empty containers are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        _ if !truthy(value) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lenient boolean spelling used for checkbox edits.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema::FormDefinition;
    use crate::test_utils::SAMPLE_FORM;
    use serde_json::json;

    fn field(name: &str) -> FieldDef {
        FormDefinition::from_json(SAMPLE_FORM)
            .unwrap()
            .field(name)
            .unwrap()
            .clone()
    }

    #[test]
    fn text_starts_from_current_value_or_empty() {
        let f = field("user");
        assert_eq!(FieldState::build(&f, None).unwrap().value(), json!(""));
        assert_eq!(FieldState::build(&f, Some(&Value::Null)).unwrap().value(), json!(""));
        assert_eq!(FieldState::build(&f, Some(&json!("ada"))).unwrap().value(), json!("ada"));
        assert_eq!(FieldState::build(&f, Some(&json!(42))).unwrap().value(), json!("42"));
    }

    #[test]
    fn checkbox_uses_truthiness() {
        let f = field("verbose");
        for (input, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!(""), false),
            (json!("x"), true),
            (Value::Null, false),
        ] {
            let state = FieldState::build(&f, Some(&input)).unwrap();
            assert_eq!(state.value(), Value::Bool(expected), "input {input}");
        }
        assert_eq!(FieldState::build(&f, None).unwrap().value(), json!(false));
    }

    #[test]
    fn select_requires_an_exact_option_value() {
        let f = field("theme");
        let state = FieldState::build(&f, Some(&json!("light"))).unwrap();
        assert_eq!(state.value(), json!("light"));

        let state = FieldState::build(&f, Some(&json!("neon"))).unwrap();
        assert_eq!(state.value(), Value::Null);
    }

    #[test]
    fn radio_never_selects_disabled_options() {
        let f = field("window");
        let state = FieldState::build(&f, Some(&json!("custom"))).unwrap();
        assert_eq!(state.value(), Value::Null);

        let mut state = FieldState::build(&f, Some(&json!("24h"))).unwrap();
        assert_eq!(state.value(), json!("24h"));
        assert_eq!(
            state.select("custom"),
            Err(EditError::DisabledOption("custom".into()))
        );
        assert_eq!(state.value(), json!("24h"));

        if let FieldState::Radio { choices, .. } = &state {
            let disabled: Vec<&str> = choices
                .iter()
                .filter(|c| c.disabled)
                .map(|c| c.label.as_str())
                .collect();
            assert_eq!(disabled, vec!["Custom"]);
        } else {
            panic!("expected radio state");
        }
    }

    #[test]
    fn unsupported_types_name_field_and_type() {
        let def = FormDefinition::from_json(
            r#"{"sections": [{"fields": [{"name": "speed", "type": "slider", "label": "Speed"}]}]}"#,
        )
        .unwrap();
        let err = FieldState::build(def.field("speed").unwrap(), None).unwrap_err();
        match err {
            LogscopeError::UnsupportedFieldType { field, kind } => {
                assert_eq!(field, "speed");
                assert_eq!(kind, "slider");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn edits_are_checked_against_the_kind() {
        let mut text = FieldState::build(&field("user"), None).unwrap();
        assert_eq!(text.set_checked(true), Err(EditError::WrongKind("text")));
        text.apply("grace").unwrap();
        assert_eq!(text.value(), json!("grace"));

        let mut checkbox = FieldState::build(&field("verbose"), None).unwrap();
        checkbox.apply("yes").unwrap();
        assert_eq!(checkbox.value(), json!(true));
        assert_eq!(checkbox.apply("maybe"), Err(EditError::NotABool("maybe".into())));
        assert_eq!(checkbox.value(), json!(true));

        let mut select = FieldState::build(&field("theme"), None).unwrap();
        assert_eq!(select.apply("neon"), Err(EditError::UnknownOption("neon".into())));
        select.apply("dark").unwrap();
        assert_eq!(select.value(), json!("dark"));
    }

    #[test]
    fn truthiness_rules() {
        assert!(!truthy(&json!([])));
        assert!(truthy(&json!({"a": 1})));
        assert!(!truthy(&json!(0.0)));
    }
}
