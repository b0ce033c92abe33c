//! Concrete field validators
//!
//! Each validator composes [`crate::validation::ValidationState`] with the
//! [`crate::validation::FieldValidator`] contract: `RequiredText` and
//! `DateText` for single-line entries, `ConstrainedChoice` for
//! restrict-and-autocomplete selection, `BoundedNumeric` for spinner-style
//! numeric input with range, step precision, and cross-field bounds.

pub mod choice;
pub mod numeric;
pub mod text;

pub use choice::ConstrainedChoice;
pub use numeric::{BoundVar, BoundedNumeric, NumericSpec};
pub use text::{DateText, RequiredText};
