//! Keystroke and focus-out validation for form fields
//!
//! Every validated field implements [`FieldValidator`]: a per-keystroke check
//! that runs before an edit is committed to the field text, and a final-value
//! check that runs when the field loses focus. The shared dispatch logic
//! (clear the error state, branch on the event kind, switch the error
//! indicator on failure) lives in [`run_validation`] so each field type only
//! supplies the two checks and the invalid hooks.

use crate::error::ValidationError;

/// What kind of edit produced a key validation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Characters were inserted at the cursor
    Insert,
    /// Characters were removed (backspace, delete, cut, clear)
    Delete,
    /// Anything else (selection replaced, programmatic set)
    Other,
}

/// A single proposed edit to a field's text, captured before it is applied
///
/// `index` is the char position of the first difference between `current`
/// and `proposed`; `change` holds the inserted (or removed) characters.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEdit {
    pub proposed: String,
    pub current: String,
    pub change: String,
    pub index: usize,
    pub action: EditAction,
}

/// Validation events dispatched to a field validator
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationEvent {
    /// A proposed edit, checked before the text changes
    Key(KeyEdit),
    /// The field lost interactive focus (or validation was forced)
    FocusOut,
}

/// Per-field validation record: the current error plus the display flag
///
/// Cleared at the start of every validation pass so a stale error never
/// survives into the next interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationState {
    error: Option<ValidationError>,
    error_display: bool,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset before each validation pass
    pub fn clear(&mut self) {
        self.error = None;
        self.error_display = false;
    }

    pub fn set_error(&mut self, error: ValidationError) {
        self.error = Some(error);
    }

    pub fn set_error_display(&mut self, on: bool) {
        self.error_display = on;
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// User-facing message; empty when the field is in a good state
    pub fn message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.user_message())
            .unwrap_or_default()
    }

    pub fn is_error_displayed(&self) -> bool {
        self.error_display
    }
}

/// Two-phase validation capability implemented by every validated field
pub trait FieldValidator {
    fn validation_state(&self) -> &ValidationState;
    fn validation_state_mut(&mut self) -> &mut ValidationState;

    /// The field's current text, as the widget layer sees it
    fn current_text(&self) -> &str;

    /// Per-keystroke check, run before the edit is committed. Returning
    /// false rejects the edit and the field text is left untouched. Must be
    /// side-effect-free on failure apart from what [`Self::on_invalid_key`]
    /// performs.
    fn validate_key(&mut self, edit: &KeyEdit) -> bool {
        let _ = edit;
        true
    }

    /// Final-value check when the field loses focus (or validation is
    /// forced). May set the error message.
    fn validate_focus_out(&mut self) -> bool {
        true
    }

    /// Hook run when a key edit is rejected
    fn on_invalid_key(&mut self, edit: &KeyEdit) {
        let _ = edit;
    }

    /// Hook run when focus-out validation fails
    fn on_invalid_focus_out(&mut self) {}

    /// Apply an accepted key edit to the field text. Validators that rewrite
    /// the text on acceptance (autocomplete) override this.
    fn commit_edit(&mut self, proposed: &str);
}

/// Shared validation dispatch
///
/// Clears the error state, runs exactly one of the two checks based on the
/// event kind, applies the edit on an accepted key event, and on failure
/// switches the error indicator on and runs the matching invalid hook.
/// Returns whether the interaction was accepted.
pub fn run_validation<F>(field: &mut F, event: &ValidationEvent) -> bool
where
    F: FieldValidator + ?Sized,
{
    field.validation_state_mut().clear();

    let valid = match event {
        ValidationEvent::Key(edit) => field.validate_key(edit),
        ValidationEvent::FocusOut => field.validate_focus_out(),
    };

    if valid {
        if let ValidationEvent::Key(edit) = event {
            field.commit_edit(&edit.proposed);
        }
    } else {
        field.validation_state_mut().set_error_display(true);
        match event {
            ValidationEvent::Key(edit) => field.on_invalid_key(edit),
            ValidationEvent::FocusOut => field.on_invalid_focus_out(),
        }
    }

    valid
}

/// Focus-out validation for a field the user may never have touched
///
/// Synthesizes a focus-out event and dispatches it exactly like a real one,
/// invalid hook included. Used by the form controller to catch untouched
/// required fields before a save.
pub fn force_focus_out_validation<F>(field: &mut F) -> bool
where
    F: FieldValidator + ?Sized,
{
    run_validation(field, &ValidationEvent::FocusOut)
}

/// Derive the key edit between a field's text before and after a widget edit
///
/// Works in char positions: finds the common prefix and suffix and classifies
/// the difference as an insertion, a deletion, or a replacement. A pure
/// replacement reports the new characters at the first changed position.
pub fn derive_key_edit(current: &str, proposed: &str) -> KeyEdit {
    let cur: Vec<char> = current.chars().collect();
    let new: Vec<char> = proposed.chars().collect();

    let mut prefix = 0;
    while prefix < cur.len() && prefix < new.len() && cur[prefix] == new[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < cur.len() - prefix
        && suffix < new.len() - prefix
        && cur[cur.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let removed = cur.len() - prefix - suffix;
    let inserted = new.len() - prefix - suffix;

    let (action, change) = if inserted > 0 && removed == 0 {
        (EditAction::Insert, new[prefix..new.len() - suffix].iter().collect())
    } else if removed > 0 && inserted == 0 {
        (EditAction::Delete, cur[prefix..cur.len() - suffix].iter().collect())
    } else if inserted > 0 {
        // Selection replaced; validate the characters that went in
        (EditAction::Other, new[prefix..new.len() - suffix].iter().collect())
    } else {
        (EditAction::Other, String::new())
    };

    KeyEdit {
        proposed: proposed.to_string(),
        current: current.to_string(),
        change,
        index: prefix,
        action,
    }
}
