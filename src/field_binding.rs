//! Field bindings: pairing a field name with an input widget and its value
//!
//! A [`FieldBinding`] delegates get/set/reset to its input and surfaces the
//! input's current error text; it performs no validation of its own. Inputs
//! are dispatched through the [`FieldValue`] tag rather than by widget type:
//! validated inputs come from [`crate::validators`], the plain inputs here
//! (free choice, notes, checkbox) carry no validator and are skipped when
//! the form forces validation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::validation::{self, FieldValidator};
use crate::validators::{BoundedNumeric, ConstrainedChoice, DateText, RequiredText};

/// The value held by a form input, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Numeric(Option<f64>),
    Boolean(bool),
    Multiline(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Boolean(true))
    }
}

impl fmt::Display for FieldValue {
    /// Plain-text rendering, also used for CSV cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Multiline(s) => write!(f, "{s}"),
            FieldValue::Numeric(Some(v)) => write!(f, "{v}"),
            FieldValue::Numeric(None) => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Behavior contract every form input satisfies
pub trait FormInput {
    /// Current value; never triggers validation
    fn value(&self) -> FieldValue;

    /// Overwrite the value programmatically
    fn set_value(&mut self, value: &FieldValue);

    /// Restore the empty/default value and drop any error state
    fn reset(&mut self);

    /// Current error message; empty when the field is in a good state
    fn error_message(&self) -> String;

    /// Forced focus-out validation for inputs that validate. Plain inputs
    /// return None and are skipped when the form collects errors.
    fn force_validation(&mut self) -> Option<bool>;
}

impl FormInput for RequiredText {
    fn value(&self) -> FieldValue {
        FieldValue::Text(self.text().to_string())
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.set_text(&value.to_string());
    }

    fn reset(&mut self) {
        self.clear();
        self.validation_state_mut().clear();
    }

    fn error_message(&self) -> String {
        self.validation_state().message()
    }

    fn force_validation(&mut self) -> Option<bool> {
        Some(validation::force_focus_out_validation(self))
    }
}

impl FormInput for DateText {
    fn value(&self) -> FieldValue {
        FieldValue::Text(self.text().to_string())
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.set_text(&value.to_string());
    }

    fn reset(&mut self) {
        self.clear();
        self.validation_state_mut().clear();
    }

    fn error_message(&self) -> String {
        self.validation_state().message()
    }

    fn force_validation(&mut self) -> Option<bool> {
        Some(validation::force_focus_out_validation(self))
    }
}

impl FormInput for ConstrainedChoice {
    fn value(&self) -> FieldValue {
        FieldValue::Text(self.text().to_string())
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.set_text(&value.to_string());
    }

    fn reset(&mut self) {
        self.clear();
        self.validation_state_mut().clear();
    }

    fn error_message(&self) -> String {
        self.validation_state().message()
    }

    fn force_validation(&mut self) -> Option<bool> {
        Some(validation::force_focus_out_validation(self))
    }
}

impl FormInput for BoundedNumeric {
    fn value(&self) -> FieldValue {
        FieldValue::Numeric(BoundedNumeric::value(self))
    }

    fn set_value(&mut self, value: &FieldValue) {
        match value {
            FieldValue::Numeric(Some(v)) => self.set_text(&v.to_string()),
            FieldValue::Numeric(None) => self.clear(),
            other => self.set_text(&other.to_string()),
        }
    }

    fn reset(&mut self) {
        self.clear();
        self.validation_state_mut().clear();
    }

    fn error_message(&self) -> String {
        self.validation_state().message()
    }

    fn force_validation(&mut self) -> Option<bool> {
        Some(validation::force_focus_out_validation(self))
    }
}

/// Unvalidated single-line choice input; the list is advisory only
#[derive(Debug, Default)]
pub struct PlainChoice {
    choices: Vec<String>,
    text: String,
}

impl PlainChoice {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            text: String::new(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl FormInput for PlainChoice {
    fn value(&self) -> FieldValue {
        FieldValue::Text(self.text.clone())
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.text = value.to_string();
    }

    fn reset(&mut self) {
        self.text.clear();
    }

    fn error_message(&self) -> String {
        String::new()
    }

    fn force_validation(&mut self) -> Option<bool> {
        None
    }
}

/// Unvalidated multiline notes input
#[derive(Debug, Default)]
pub struct MultilineText {
    text: String,
}

impl MultilineText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl FormInput for MultilineText {
    fn value(&self) -> FieldValue {
        FieldValue::Multiline(self.text.clone())
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.text = value.to_string();
    }

    fn reset(&mut self) {
        self.text.clear();
    }

    fn error_message(&self) -> String {
        String::new()
    }

    fn force_validation(&mut self) -> Option<bool> {
        None
    }
}

/// Boolean flag input (checkbox)
#[derive(Debug, Default)]
pub struct BooleanFlag {
    checked: bool,
}

impl BooleanFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn checked_mut(&mut self) -> &mut bool {
        &mut self.checked
    }
}

impl FormInput for BooleanFlag {
    fn value(&self) -> FieldValue {
        FieldValue::Boolean(self.checked)
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.checked = value.as_bool();
    }

    fn reset(&mut self) {
        self.checked = false;
    }

    fn error_message(&self) -> String {
        String::new()
    }

    fn force_validation(&mut self) -> Option<bool> {
        None
    }
}

/// Pairs a field name with its input widget
#[derive(Clone)]
pub struct FieldBinding {
    name: String,
    input: Rc<RefCell<dyn FormInput>>,
}

impl FieldBinding {
    pub fn new(name: impl Into<String>, input: Rc<RefCell<dyn FormInput>>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> FieldValue {
        self.input.borrow().value()
    }

    pub fn set_value(&self, value: &FieldValue) {
        self.input.borrow_mut().set_value(value);
    }

    pub fn reset(&self) {
        self.input.borrow_mut().reset();
    }

    pub fn error_message(&self) -> String {
        self.input.borrow().error_message()
    }

    /// Forced validation, None for inputs without the capability
    pub fn force_validation(&self) -> Option<bool> {
        self.input.borrow_mut().force_validation()
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("value", &self.value())
            .finish()
    }
}
