/// VALIDATION CORE: Keystroke and focus-out validation plumbing
/// Shared validation state, events, the field validator contract, and dispatch
pub mod validation;

/// Concrete field validators: required text, date, constrained choice,
/// bounded numeric with cross-field bounds
pub mod validators;

/// Field bindings: tagged field values, the form input contract, plain inputs
pub mod field_binding;

/// Form-level aggregation: get / reset / get_errors
pub mod form;

/// Error types
pub mod error;

/// Daily CSV record persistence
pub mod storage;

/// Application configuration persistence
pub mod config;

/// Application state management
pub mod app_state;

/// Main application loop
pub mod app;

/// UI components
pub mod ui {
    pub mod dialogs;
    pub mod form_view;
}
