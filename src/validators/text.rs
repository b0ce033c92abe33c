//! Required-text and date field validators

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::validation::{EditAction, FieldValidator, KeyEdit, ValidationState};

/// Single-line entry that must hold a non-blank value at focus-out
///
/// No keystroke-level restriction; any edit is accepted.
#[derive(Debug, Default)]
pub struct RequiredText {
    text: String,
    state: ValidationState,
}

impl RequiredText {
    pub fn new() -> Self {
        Self::default()
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
}

impl FieldValidator for RequiredText {
    fn validation_state(&self) -> &ValidationState {
        &self.state
    }

    fn validation_state_mut(&mut self) -> &mut ValidationState {
        &mut self.state
    }

    fn current_text(&self) -> &str {
        &self.text
    }

    fn validate_focus_out(&mut self) -> bool {
        if self.text.trim().is_empty() {
            self.state.set_error(ValidationError::MissingValue);
            return false;
        }
        true
    }

    fn commit_edit(&mut self, proposed: &str) {
        self.text = proposed.to_string();
    }
}

/// Fixed-template `YYYY-MM-DD` date entry
///
/// Key validation enforces the template position by position: digits at the
/// year/month/day positions, a literal `-` at positions 4 and 7, nothing past
/// position 9. Deletions are always accepted so the user can back out of a
/// partial date. The calendar itself (month range, day-of-month, leap years)
/// is checked at focus-out.
#[derive(Debug, Default)]
pub struct DateText {
    text: String,
    state: ValidationState,
}

impl DateText {
    pub fn new() -> Self {
        Self::default()
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

    /// The parsed date, when the current text holds one
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.text, "%Y-%m-%d").ok()
    }
}

impl FieldValidator for DateText {
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
            return true;
        }
        for (offset, ch) in edit.change.chars().enumerate() {
            let ok = match edit.index + offset {
                4 | 7 => ch == '-',
                0..=3 | 5 | 6 | 8 | 9 => ch.is_ascii_digit(),
                _ => false,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    fn validate_focus_out(&mut self) -> bool {
        if self.text.is_empty() {
            self.state.set_error(ValidationError::MissingValue);
            return false;
        }
        if NaiveDate::parse_from_str(&self.text, "%Y-%m-%d").is_err() {
            self.state.set_error(ValidationError::InvalidDate {
                input: self.text.clone(),
            });
            return false;
        }
        true
    }

    fn commit_edit(&mut self, proposed: &str) {
        self.text = proposed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{derive_key_edit, force_focus_out_validation, run_validation, ValidationEvent};

    fn type_into<F: FieldValidator>(field: &mut F, current: &str, proposed: &str) -> bool {
        let edit = derive_key_edit(current, proposed);
        run_validation(field, &ValidationEvent::Key(edit))
    }

    #[test]
    fn test_required_text_empty_fails() {
        let mut field = RequiredText::new();
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "A value is required");
        assert!(field.validation_state().is_error_displayed());
    }

    #[test]
    fn test_required_text_whitespace_only_fails() {
        let mut field = RequiredText::new();
        field.set_text("   ");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "A value is required");
    }

    #[test]
    fn test_required_text_value_passes_and_clears_message() {
        let mut field = RequiredText::new();
        assert!(!force_focus_out_validation(&mut field));
        field.set_text("J. Simms");
        assert!(force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "");
        assert!(!field.validation_state().is_error_displayed());
    }

    #[test]
    fn test_required_text_accepts_any_keystroke() {
        let mut field = RequiredText::new();
        assert!(type_into(&mut field, "", "!"));
        assert_eq!(field.text(), "!");
    }

    #[test]
    fn test_date_accepts_full_date_typed_left_to_right() {
        let mut field = DateText::new();
        for ch in "2024-01-01".chars() {
            let current = field.text().to_string();
            let proposed = format!("{current}{ch}");
            assert!(
                type_into(&mut field, &current, &proposed),
                "rejected '{ch}' after '{current}'"
            );
        }
        assert_eq!(field.text(), "2024-01-01");
    }

    #[test]
    fn test_date_rejects_letter_at_digit_positions() {
        for prefix in ["", "2", "20", "202", "2024-", "2024-0", "2024-01-", "2024-01-0"] {
            let mut field = DateText::new();
            field.set_text(prefix);
            let proposed = format!("{prefix}x");
            assert!(
                !type_into(&mut field, prefix, &proposed),
                "accepted letter after '{prefix}'"
            );
            assert_eq!(field.text(), prefix);
        }
    }

    #[test]
    fn test_date_rejects_dash_at_digit_position() {
        let mut field = DateText::new();
        field.set_text("20");
        assert!(!type_into(&mut field, "20", "20-"));
    }

    #[test]
    fn test_date_rejects_digit_at_separator_position() {
        let mut field = DateText::new();
        field.set_text("2024");
        assert!(!type_into(&mut field, "2024", "20245"));
        assert!(type_into(&mut field, "2024", "2024-"));
    }

    #[test]
    fn test_date_rejects_past_template_end() {
        let mut field = DateText::new();
        field.set_text("2024-01-01");
        assert!(!type_into(&mut field, "2024-01-01", "2024-01-011"));
    }

    #[test]
    fn test_date_always_accepts_deletions() {
        let mut field = DateText::new();
        field.set_text("2024-01");
        assert!(type_into(&mut field, "2024-01", "2024-0"));
        assert!(type_into(&mut field, "2024-0", ""));
    }

    #[test]
    fn test_date_focus_out_empty_is_missing_value() {
        let mut field = DateText::new();
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "A value is required");
    }

    #[test]
    fn test_date_focus_out_bad_month() {
        let mut field = DateText::new();
        field.set_text("2024-13-01");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "Invalid date");
    }

    #[test]
    fn test_date_focus_out_leap_day() {
        let mut field = DateText::new();
        field.set_text("2024-02-29");
        assert!(force_focus_out_validation(&mut field));

        field.set_text("2023-02-29");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "Invalid date");
    }

    #[test]
    fn test_date_focus_out_rejects_impossible_day() {
        let mut field = DateText::new();
        field.set_text("2024-02-30");
        assert!(!force_focus_out_validation(&mut field));
    }
}
