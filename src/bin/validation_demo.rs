//! Field Validation Walkthrough Demo
//!
//! This program demonstrates the validation layer without the GUI: it types
//! realistic keystroke sequences into each field kind, shows which edits are
//! accepted or rejected, and finishes with a forced validation pass over a
//! complete form the way the save action runs one.

use agrilog::app_state::build_form;
use agrilog::field_binding::FieldValue;
use agrilog::validation::{derive_key_edit, force_focus_out_validation, run_validation, FieldValidator, ValidationEvent};
use agrilog::validators::{BoundedNumeric, ConstrainedChoice, DateText, NumericSpec};

/// Type a whole string one character at a time, reporting each verdict
fn type_string<F: FieldValidator>(field: &mut F, input: &str) {
    for ch in input.chars() {
        let current = field.current_text().to_string();
        let proposed = format!("{current}{ch}");
        let edit = derive_key_edit(&current, &proposed);
        let accepted = run_validation(field, &ValidationEvent::Key(edit));
        println!(
            "    '{ch}' -> {} (field now '{}')",
            if accepted { "accepted" } else { "rejected" },
            field.current_text()
        );
    }
}

fn main() -> anyhow::Result<()> {
    println!("=== Date entry ===");
    let mut date = DateText::new();
    println!("  typing '2024-02-2x9':");
    type_string(&mut date, "2024-02-2x9");
    let ok = force_focus_out_validation(&mut date);
    println!(
        "  focus-out on '{}': {} {}",
        date.text(),
        ok,
        date.validation_state().message()
    );

    println!();
    println!("=== Time choice (8:00 / 12:00 / 16:00 / 20:00) ===");
    let mut time = ConstrainedChoice::new(["8:00", "12:00", "16:00", "20:00"]);
    println!("  typing '16':");
    type_string(&mut time, "16");
    println!("  autocompleted to '{}'", time.text());

    println!();
    println!("=== Humidity (0.5 to 52.0, step 0.01) ===");
    let mut humidity = BoundedNumeric::new(NumericSpec::new(0.5, 52.0, "0.01"));
    println!("  typing '-24.5556':");
    type_string(&mut humidity, "-24.5556");
    let ok = force_focus_out_validation(&mut humidity);
    println!(
        "  focus-out on '{}': {} {}",
        humidity.text(),
        ok,
        humidity.validation_state().message()
    );

    println!();
    println!("=== Full form forced validation ===");
    let (mut form, handles) = build_form();
    handles.date.borrow_mut().set_text("2024-02-29");
    handles.technician.borrow_mut().set_text("J. Simms");

    let errors = form.get_errors();
    println!("  {} fields still in error after forcing:", errors.len());
    for (name, message) in &errors {
        println!("    {name}: {message}");
    }

    form.reset();
    let snapshot = form.get();
    println!();
    println!("  snapshot after reset:");
    for (name, value) in &snapshot {
        if matches!(value, FieldValue::Boolean(_)) || !value.to_string().is_empty() {
            println!("    {name} = {value}");
        }
    }

    Ok(())
}
