use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::{extract_submission, FormDefinition, LiveForm, SettingsState};

pub fn open(definition: &FormDefinition, current: &SettingsState) -> Result<LiveForm> {
    LiveForm::open(definition, current)
}

/// Accept: the submission replaces the settings wholesale.
pub fn submit(definition: &FormDefinition, form: &LiveForm) -> Result<CmdResult> {
    let settings = extract_submission(definition, form)?;
    Ok(CmdResult::default()
        .with_settings(settings)
        .with_message(CmdMessage::success("Options updated")))
}

/// Cancel: live edits are dropped.
pub fn cancel(_form: LiveForm) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::info("Options unchanged"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::compute_defaults;
    use crate::test_utils::SAMPLE_FORM;
    use serde_json::json;

    #[test]
    fn submit_returns_the_edited_settings() {
        let def = FormDefinition::from_json(SAMPLE_FORM).unwrap();
        let mut form = open(&def, &compute_defaults(&def)).unwrap();
        form.edit("theme", "light").unwrap();

        let result = submit(&def, &form).unwrap();
        let settings = result.settings.unwrap();
        assert_eq!(settings.get("theme"), Some(&json!("light")));
        assert_eq!(settings.len(), 4);
    }

    #[test]
    fn cancel_carries_no_settings() {
        let def = FormDefinition::from_json(SAMPLE_FORM).unwrap();
        let form = open(&def, &compute_defaults(&def)).unwrap();
        let result = cancel(form);
        assert!(result.settings.is_none());
        assert_eq!(result.messages[0].content, "Options unchanged");
    }
}
