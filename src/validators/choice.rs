//! Prefix-restricted autocomplete choice validator

use crate::error::ValidationError;
use crate::validation::{EditAction, FieldValidator, KeyEdit, ValidationState};

/// Entry restricted to a fixed candidate list
///
/// Candidates are matched case-insensitively by prefix on every keystroke.
/// An edit that matches nothing is rejected outright, so the field can never
/// commit a value outside the list. When exactly one candidate remains the
/// field autocompletes to it and asks the widget host to park the cursor at
/// the end of the text.
#[derive(Debug, Default)]
pub struct ConstrainedChoice {
    choices: Vec<String>,
    text: String,
    state: ValidationState,
    cursor_to_end: bool,
}

impl ConstrainedChoice {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            text: String::new(),
            state: ValidationState::new(),
            cursor_to_end: false,
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// True once after an autocomplete; the widget host consumes this and
    /// moves the cursor to the end of the text
    pub fn take_cursor_to_end(&mut self) -> bool {
        std::mem::take(&mut self.cursor_to_end)
    }

    fn matching(&self, prefix: &str) -> Vec<usize> {
        let prefix = prefix.to_lowercase();
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.to_lowercase().starts_with(&prefix))
            .map(|(i, _)| i)
            .collect()
    }
}

impl FieldValidator for ConstrainedChoice {
    fn validation_state(&self) -> &ValidationState {
        &self.state
    }

    fn validation_state_mut(&mut self) -> &mut ValidationState {
        &mut self.state
    }

    fn current_text(&self) -> &str {
        &self.text
    }

    fn validate_key(&mut self, edit: &KeyEdit) -> bool {
        if edit.action == EditAction::Delete {
            self.text.clear();
            return true;
        }

        let matching = self.matching(&edit.proposed);
        match matching.len() {
            0 => false,
            1 => {
                self.text = self.choices[matching[0]].clone();
                self.cursor_to_end = true;
                true
            }
            _ => {
                self.text = edit.proposed.clone();
                true
            }
        }
    }

    fn validate_focus_out(&mut self) -> bool {
        if self.text.is_empty() {
            self.state.set_error(ValidationError::MissingValue);
            return false;
        }
        true
    }

    fn on_invalid_key(&mut self, edit: &KeyEdit) {
        self.state.set_error(ValidationError::NoMatchingChoice {
            input: edit.proposed.clone(),
        });
    }

    fn commit_edit(&mut self, _proposed: &str) {
        // validate_key already applied the edit, autocompleted or as typed
    }
}
