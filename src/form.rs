//! Form-level aggregation over field bindings
//!
//! The controller owns the bindings in declaration order and exposes the
//! three operations the host uses: read all values, reset everything, and
//! collect the error report after forcing a final validation pass.

use std::rc::Rc;

use crate::field_binding::{FieldBinding, FieldValue};
use crate::validators::BoundVar;

/// Aggregates a form's fields
#[derive(Debug, Default)]
pub struct FormController {
    fields: Vec<FieldBinding>,
    bound_vars: Vec<Rc<BoundVar>>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; declaration order fixes snapshot and report order
    pub fn add_field(&mut self, binding: FieldBinding) {
        self.fields.push(binding);
    }

    /// Register a shared bound variable so reset can clear it
    pub fn register_bound_var(&mut self, var: Rc<BoundVar>) {
        self.bound_vars.push(var);
    }

    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|b| b.name() == name)
    }

    /// Snapshot of every field's current value, in declaration order,
    /// without triggering validation
    pub fn get(&self) -> Vec<(String, FieldValue)> {
        self.fields
            .iter()
            .map(|b| (b.name().to_string(), b.value()))
            .collect()
    }

    /// Clear every field to its empty/default value and drop the shared
    /// bound values. Reports no errors.
    pub fn reset(&mut self) {
        for var in &self.bound_vars {
            var.reset();
        }
        for binding in &self.fields {
            binding.reset();
        }
    }

    /// Error report after a forced final validation pass
    ///
    /// Every field with forced-validation capability is validated first so
    /// untouched required fields are caught; fields without the capability
    /// are skipped for that step. The report lists, in declaration order,
    /// every field whose error message is non-empty.
    pub fn get_errors(&mut self) -> Vec<(String, String)> {
        for binding in &self.fields {
            let _ = binding.force_validation();
        }
        self.fields
            .iter()
            .filter_map(|b| {
                let message = b.error_message();
                if message.is_empty() {
                    None
                } else {
                    Some((b.name().to_string(), message))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_binding::{BooleanFlag, FormInput, MultilineText};
    use crate::validators::RequiredText;
    use std::cell::RefCell;

    fn sample_form() -> FormController {
        let mut form = FormController::new();
        form.add_field(FieldBinding::new(
            "Technician",
            Rc::new(RefCell::new(RequiredText::new())) as Rc<RefCell<dyn FormInput>>,
        ));
        form.add_field(FieldBinding::new(
            "Equipment Fault",
            Rc::new(RefCell::new(BooleanFlag::new())) as Rc<RefCell<dyn FormInput>>,
        ));
        form.add_field(FieldBinding::new(
            "Notes",
            Rc::new(RefCell::new(MultilineText::new())) as Rc<RefCell<dyn FormInput>>,
        ));
        form
    }

    #[test]
    fn test_get_preserves_declaration_order() {
        let form = sample_form();
        let names: Vec<String> = form.get().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Technician", "Equipment Fault", "Notes"]);
    }

    #[test]
    fn test_get_errors_forces_validation_on_untouched_fields() {
        let mut form = sample_form();
        let errors = form.get_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "Technician");
        assert_eq!(errors[0].1, "A value is required");
    }

    #[test]
    fn test_get_errors_empty_after_valid_fill() {
        let mut form = sample_form();
        form.field("Technician")
            .unwrap()
            .set_value(&FieldValue::Text("J. Simms".into()));
        assert!(form.get_errors().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults_without_reporting() {
        let mut form = sample_form();
        form.field("Technician")
            .unwrap()
            .set_value(&FieldValue::Text("J. Simms".into()));
        form.field("Equipment Fault")
            .unwrap()
            .set_value(&FieldValue::Boolean(true));

        form.reset();

        assert_eq!(
            form.field("Technician").unwrap().value(),
            FieldValue::Text(String::new())
        );
        assert_eq!(
            form.field("Equipment Fault").unwrap().value(),
            FieldValue::Boolean(false)
        );
        // No errors surfaced by the reset itself
        for binding in form.fields() {
            assert_eq!(binding.error_message(), "");
        }
    }

    #[test]
    fn test_get_errors_after_reset_matches_initial_report() {
        let mut form = sample_form();
        let initial = form.get_errors();
        form.field("Technician")
            .unwrap()
            .set_value(&FieldValue::Text("J. Simms".into()));
        assert!(form.get_errors().is_empty());

        form.reset();
        assert_eq!(form.get_errors(), initial);
    }
}
