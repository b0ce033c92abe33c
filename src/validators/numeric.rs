//! Bounded numeric spinner validation with reactive cross-field bounds

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::ValidationError;
use crate::validation::{self, EditAction, FieldValidator, KeyEdit, ValidationState};

/// Observable numeric variable shared between fields
///
/// Carries the committed value of one field so another field can use it as a
/// live minimum or maximum. Observers register with [`BoundVar::on_change`]
/// and are notified synchronously on every [`BoundVar::set`]. Sharing is
/// `Rc`-based; all validation runs on the UI thread.
#[derive(Default)]
pub struct BoundVar {
    value: RefCell<Option<f64>>,
    listeners: RefCell<Vec<Box<dyn Fn()>>>,
}

impl BoundVar {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn get(&self) -> Option<f64> {
        *self.value.borrow()
    }

    /// Store a new value and notify every registered observer
    pub fn set(&self, value: f64) {
        *self.value.borrow_mut() = Some(value);
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }

    /// Drop the stored value without notifying observers; used when the form
    /// resets, where every field is about to be cleared anyway
    pub fn reset(&self) {
        *self.value.borrow_mut() = None;
    }

    /// Register an observer called on every committed change
    pub fn on_change(&self, listener: Box<dyn Fn()>) {
        self.listeners.borrow_mut().push(listener);
    }
}

impl fmt::Debug for BoundVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundVar")
            .field("value", &self.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Static range and step configuration for a numeric field
///
/// `min` and `max` are explicit; pass `f64::NEG_INFINITY` / `f64::INFINITY`
/// for an unbounded side. The step is given as a decimal string whose
/// fractional-digit count fixes the field's precision: "0.01" allows two
/// fractional digits, "1" makes the field integer-only.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub precision: u32,
}

impl NumericSpec {
    pub fn new(min: f64, max: f64, step: &str) -> Self {
        Self {
            min,
            max,
            step: step.parse().unwrap_or(1.0),
            precision: fractional_digits(step),
        }
    }
}

/// Fractional digits in a decimal string, ignoring trailing zeros
fn fractional_digits(text: &str) -> u32 {
    text.split('.')
        .nth(1)
        .map(|frac| frac.trim_end_matches('0').chars().count() as u32)
        .unwrap_or(0)
}

/// Numeric entry with range, step precision, and optionally live bounds
/// taken from other fields
///
/// The effective minimum and maximum are the static configuration unless a
/// bound source is attached and holds a value, in which case the source
/// wins. A committed focus-out value can be propagated to a [`BoundVar`]
/// target, which is how one field feeds another field's range.
#[derive(Debug)]
pub struct BoundedNumeric {
    text: String,
    state: ValidationState,
    spec: NumericSpec,
    min_source: Option<Rc<BoundVar>>,
    max_source: Option<Rc<BoundVar>>,
    commit_target: Option<Rc<BoundVar>>,
}

impl BoundedNumeric {
    pub fn new(spec: NumericSpec) -> Self {
        Self {
            text: String::new(),
            state: ValidationState::new(),
            spec,
            min_source: None,
            max_source: None,
            commit_target: None,
        }
    }

    /// Take the live minimum from another field's committed value
    pub fn with_min_source(mut self, source: &Rc<BoundVar>) -> Self {
        self.min_source = Some(Rc::clone(source));
        self
    }

    /// Take the live maximum from another field's committed value
    pub fn with_max_source(mut self, source: &Rc<BoundVar>) -> Self {
        self.max_source = Some(Rc::clone(source));
        self
    }

    /// Propagate the value to `target` after a valid real focus-out
    pub fn with_commit_target(mut self, target: &Rc<BoundVar>) -> Self {
        self.commit_target = Some(Rc::clone(target));
        self
    }

    /// Subscribe `field` to `source`: a committed change to the source
    /// re-applies the bound and revalidates the field. Delivery is skipped
    /// while the field is already borrowed; a field never needs to react to
    /// its own commit.
    pub fn watch(source: &Rc<BoundVar>, field: &Rc<RefCell<BoundedNumeric>>) {
        let weak: Weak<RefCell<BoundedNumeric>> = Rc::downgrade(field);
        source.on_change(Box::new(move || {
            if let Some(cell) = weak.upgrade() {
                if let Ok(mut f) = cell.try_borrow_mut() {
                    f.apply_bound_change();
                }
            }
        }));
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

    pub fn spec(&self) -> &NumericSpec {
        &self.spec
    }

    /// The current text parsed as a number, when it holds one
    pub fn value(&self) -> Option<f64> {
        self.text.parse().ok()
    }

    /// The minimum actually enforced: the live source once it holds a
    /// value, the static configuration otherwise
    pub fn effective_min(&self) -> f64 {
        self.min_source
            .as_ref()
            .and_then(|v| v.get())
            .unwrap_or(self.spec.min)
    }

    /// The maximum actually enforced
    pub fn effective_max(&self) -> f64 {
        self.max_source
            .as_ref()
            .and_then(|v| v.get())
            .unwrap_or(self.spec.max)
    }

    /// Re-apply the effective bounds after a source change
    ///
    /// The text stays as typed (an empty field stays empty); the verdict is
    /// refreshed immediately so the displayed error tracks the new bound.
    pub fn apply_bound_change(&mut self) {
        validation::force_focus_out_validation(self);
    }

    /// Push the field's value to the commit target after a real focus-out
    ///
    /// Runs only when the field holds a parseable value and no error is
    /// displayed. Forced validation passes never commit; that is what keeps
    /// two fields that feed each other's bounds from ping-ponging.
    pub fn commit_focus_value(&mut self) {
        if self.state.error().is_some() {
            return;
        }
        if let (Some(target), Some(value)) = (self.commit_target.as_ref(), self.value()) {
            target.set(value);
        }
    }

    /// Arrow-step the value by `direction` increments, clamped to the
    /// effective range, then revalidate
    pub fn step_by(&mut self, direction: f64) {
        let min = self.effective_min();
        let max = self.effective_max();
        let next = match self.value() {
            Some(base) => base + direction * self.spec.step,
            // First arrow press on an empty field lands on the low bound
            None => {
                if min.is_finite() {
                    min
                } else {
                    0.0
                }
            }
        };
        let next = if min.is_finite() { next.max(min) } else { next };
        let next = if max.is_finite() { next.min(max) } else { next };
        self.text = format!("{:.*}", self.spec.precision as usize, next);
        validation::force_focus_out_validation(self);
    }
}

impl FieldValidator for BoundedNumeric {
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

        let no_negative = self.effective_min() >= 0.0;
        let no_decimal = self.spec.precision == 0;

        for (offset, ch) in edit.change.chars().enumerate() {
            if !matches!(ch, '0'..='9' | '-' | '.') {
                return false;
            }
            if ch == '-' && (no_negative || edit.index + offset != 0) {
                return false;
            }
            if ch == '.' && (no_decimal || edit.current.contains('.')) {
                return false;
            }
        }

        // Not yet a number, but a legitimate way station while typing
        if matches!(edit.proposed.as_str(), "-" | "." | "-.") {
            return true;
        }

        let value: f64 = match edit.proposed.parse() {
            Ok(v) => v,
            Err(_) => return false,
        };

        if value > self.effective_max() {
            return false;
        }
        if fractional_digits(&edit.proposed) > self.spec.precision {
            return false;
        }
        true
    }

    fn validate_focus_out(&mut self) -> bool {
        let value: f64 = match self.text.parse() {
            Ok(v) => v,
            Err(_) => {
                self.state.set_error(ValidationError::InvalidNumber {
                    input: self.text.clone(),
                });
                return false;
            }
        };

        let min = self.effective_min();
        if value < min {
            self.state.set_error(ValidationError::BelowMinimum { min });
            return false;
        }

        let max = self.effective_max();
        if value > max {
            self.state.set_error(ValidationError::AboveMaximum { max });
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

    fn type_into(field: &mut BoundedNumeric, proposed: &str) -> bool {
        let edit = derive_key_edit(&field.text().to_string(), proposed);
        run_validation(field, &ValidationEvent::Key(edit))
    }

    fn percent_field() -> BoundedNumeric {
        BoundedNumeric::new(NumericSpec::new(0.0, 100.0, "0.01"))
    }

    #[test]
    fn test_spec_precision_from_step_string() {
        assert_eq!(NumericSpec::new(0.0, 1.0, "0.01").precision, 2);
        assert_eq!(NumericSpec::new(0.0, 1.0, "0.5").precision, 1);
        assert_eq!(NumericSpec::new(0.0, 1.0, "1").precision, 0);
        assert_eq!(NumericSpec::new(0.0, 1.0, "0.10").precision, 1);
    }

    #[test]
    fn test_key_rejects_minus_when_min_not_negative() {
        let mut field = percent_field();
        assert!(!type_into(&mut field, "-"));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_key_accepts_leading_minus_when_negative_allowed() {
        let mut field = BoundedNumeric::new(NumericSpec::new(-40.0, 40.0, "0.1"));
        assert!(type_into(&mut field, "-"));
        assert_eq!(field.text(), "-");
        assert!(type_into(&mut field, "-5"));
        assert_eq!(field.text(), "-5");
    }

    #[test]
    fn test_key_rejects_minus_past_first_position() {
        let mut field = BoundedNumeric::new(NumericSpec::new(-40.0, 40.0, "0.1"));
        assert!(type_into(&mut field, "4"));
        assert!(!type_into(&mut field, "4-"));
    }

    #[test]
    fn test_key_rejects_decimal_point_in_integer_field() {
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 20.0, "1"));
        assert!(type_into(&mut field, "5"));
        assert!(!type_into(&mut field, "5."));
    }

    #[test]
    fn test_key_rejects_second_decimal_point() {
        let mut field = percent_field();
        assert!(type_into(&mut field, "5"));
        assert!(type_into(&mut field, "5."));
        assert!(!type_into(&mut field, "5.."));
    }

    #[test]
    fn test_key_accepts_bare_decimal_point_as_intermediate() {
        let mut field = percent_field();
        assert!(type_into(&mut field, "."));
        assert_eq!(field.text(), ".");
    }

    #[test]
    fn test_key_rejects_letters() {
        let mut field = percent_field();
        assert!(!type_into(&mut field, "a"));
        assert!(!type_into(&mut field, "1e5"));
    }

    #[test]
    fn test_key_rejects_value_above_max() {
        let mut field = percent_field();
        assert!(type_into(&mut field, "1"));
        assert!(type_into(&mut field, "15"));
        assert!(!type_into(&mut field, "150"));
        assert_eq!(field.text(), "15");
    }

    #[test]
    fn test_key_rejects_digits_finer_than_step() {
        let mut field = percent_field();
        assert!(type_into(&mut field, "50"));
        assert!(type_into(&mut field, "50.5"));
        assert!(type_into(&mut field, "50.55"));
        assert!(!type_into(&mut field, "50.555"));
    }

    #[test]
    fn test_key_always_accepts_deletions() {
        let mut field = percent_field();
        assert!(type_into(&mut field, "50"));
        assert!(type_into(&mut field, "5"));
        assert!(type_into(&mut field, ""));
    }

    #[test]
    fn test_focus_out_unparsable_is_invalid_number() {
        let mut field = percent_field();
        field.set_text("-.");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(
            field.validation_state().message(),
            "Invalid number string: -."
        );
    }

    #[test]
    fn test_focus_out_empty_is_invalid_number() {
        let mut field = percent_field();
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "Invalid number string: ");
    }

    #[test]
    fn test_focus_out_below_min_fails() {
        let mut field = BoundedNumeric::new(NumericSpec::new(4.0, 40.0, "0.01"));
        field.set_text("2");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "Value is too low (min 4)");
    }

    // Exceeding the high bound both sets the message and fails the pass; see
    // DESIGN.md for the recorded decision on this check.
    #[test]
    fn test_focus_out_above_max_fails() {
        let mut field = percent_field();
        field.set_text("150");
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(
            field.validation_state().message(),
            "Value is too high (max 100)"
        );
    }

    #[test]
    fn test_focus_out_in_range_passes() {
        let mut field = percent_field();
        field.set_text("50.5");
        assert!(force_focus_out_validation(&mut field));
        assert_eq!(field.validation_state().message(), "");
    }

    #[test]
    fn test_commit_propagates_value_to_target() {
        let target = BoundVar::new();
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_commit_target(&target);
        field.set_text("50");
        assert!(force_focus_out_validation(&mut field));
        field.commit_focus_value();
        assert_eq!(target.get(), Some(50.0));
    }

    #[test]
    fn test_commit_skipped_while_error_displayed() {
        let target = BoundVar::new();
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 100.0, "0.01"))
            .with_commit_target(&target);
        field.set_text("150");
        assert!(!force_focus_out_validation(&mut field));
        field.commit_focus_value();
        assert_eq!(target.get(), None);
    }

    #[test]
    fn test_bound_source_overrides_static_min() {
        let min_var = BoundVar::new();
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_min_source(&min_var);
        field.set_text("40");
        assert!(force_focus_out_validation(&mut field));

        min_var.set(50.0);
        assert_eq!(field.effective_min(), 50.0);
        assert!(!force_focus_out_validation(&mut field));
        assert_eq!(
            field.validation_state().message(),
            "Value is too low (min 50)"
        );
    }

    #[test]
    fn test_bound_source_reset_restores_static_bound() {
        let min_var = BoundVar::new();
        let field = BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_min_source(&min_var);
        min_var.set(50.0);
        assert_eq!(field.effective_min(), 50.0);
        min_var.reset();
        assert_eq!(field.effective_min(), 0.0);
    }

    #[test]
    fn test_watch_revalidates_dependent_on_commit() {
        let min_var = BoundVar::new();
        let dependent = Rc::new(RefCell::new(
            BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01")).with_min_source(&min_var),
        ));
        BoundedNumeric::watch(&min_var, &dependent);

        dependent.borrow_mut().set_text("40");
        assert!(force_focus_out_validation(&mut *dependent.borrow_mut()));

        let mut source = BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_commit_target(&min_var);
        source.set_text("50");
        assert!(force_focus_out_validation(&mut source));
        source.commit_focus_value();

        // The dependent was revalidated by the notification alone
        assert_eq!(
            dependent.borrow().validation_state().message(),
            "Value is too low (min 50)"
        );
    }

    #[test]
    fn test_key_validation_respects_live_max() {
        let max_var = BoundVar::new();
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_max_source(&max_var);
        max_var.set(30.0);
        assert!(type_into(&mut field, "2"));
        assert!(type_into(&mut field, "25"));
        assert!(!type_into(&mut field, "255"));
    }

    #[test]
    fn test_negative_allowed_tracks_live_min() {
        let min_var = BoundVar::new();
        let mut field = BoundedNumeric::new(NumericSpec::new(-10.0, 10.0, "0.1"))
            .with_min_source(&min_var);
        assert!(type_into(&mut field, "-"));

        let mut field = BoundedNumeric::new(NumericSpec::new(-10.0, 10.0, "0.1"))
            .with_min_source(&min_var);
        min_var.set(0.0);
        assert!(!type_into(&mut field, "-"));
    }

    #[test]
    fn test_step_by_from_empty_lands_on_min() {
        let mut field = BoundedNumeric::new(NumericSpec::new(0.5, 52.0, "0.01"));
        field.step_by(1.0);
        assert_eq!(field.text(), "0.50");
        assert!(field.validation_state().message().is_empty());
    }

    #[test]
    fn test_step_by_clamps_at_bounds() {
        let mut field = BoundedNumeric::new(NumericSpec::new(0.0, 1.0, "0.5"));
        field.set_text("1.0");
        field.step_by(1.0);
        assert_eq!(field.text(), "1.0");
        field.step_by(-1.0);
        assert_eq!(field.text(), "0.5");
    }
}
