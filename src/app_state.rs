//! Application state management for AgriLog
//!
//! This module contains the main application state structure, the concrete
//! plot-record form wiring, and the save/reset workflow.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::{self, AppConfig};
use crate::field_binding::{BooleanFlag, FieldBinding, FormInput, MultilineText, PlainChoice};
use crate::form::FormController;
use crate::storage;
use crate::validators::{BoundVar, BoundedNumeric, ConstrainedChoice, DateText, NumericSpec, RequiredText};

/// Typed handles to the form's inputs, used by the widget layer
///
/// The same inputs are registered with the [`FormController`] as trait
/// objects; these handles keep the concrete types around so each one can be
/// rendered with the right widget.
pub struct FormHandles {
    pub date: Rc<RefCell<DateText>>,
    pub time: Rc<RefCell<ConstrainedChoice>>,
    pub technician: Rc<RefCell<RequiredText>>,
    pub lab: Rc<RefCell<PlainChoice>>,
    pub plot: Rc<RefCell<ConstrainedChoice>>,
    pub seed_sample: Rc<RefCell<RequiredText>>,
    pub humidity: Rc<RefCell<BoundedNumeric>>,
    pub light: Rc<RefCell<BoundedNumeric>>,
    pub temperature: Rc<RefCell<BoundedNumeric>>,
    pub equipment_fault: Rc<RefCell<BooleanFlag>>,
    pub plants: Rc<RefCell<BoundedNumeric>>,
    pub blossoms: Rc<RefCell<BoundedNumeric>>,
    pub fruit: Rc<RefCell<BoundedNumeric>>,
    pub min_height: Rc<RefCell<BoundedNumeric>>,
    pub max_height: Rc<RefCell<BoundedNumeric>>,
    pub median_height: Rc<RefCell<BoundedNumeric>>,
    pub notes: Rc<RefCell<MultilineText>>,
}

/// Build the plot-record form: every input, the cross-field height bounds,
/// and the controller with the bindings in declaration order
pub fn build_form() -> (FormController, FormHandles) {
    let min_height_var = BoundVar::new();
    let max_height_var = BoundVar::new();

    let date = Rc::new(RefCell::new(DateText::new()));
    let time = Rc::new(RefCell::new(ConstrainedChoice::new([
        "8:00", "12:00", "16:00", "20:00",
    ])));
    let technician = Rc::new(RefCell::new(RequiredText::new()));
    let lab = Rc::new(RefCell::new(PlainChoice::new(["A", "B", "C", "D", "E"])));
    let plot = Rc::new(RefCell::new(ConstrainedChoice::new(
        (1..=20).map(|n| n.to_string()),
    )));
    let seed_sample = Rc::new(RefCell::new(RequiredText::new()));

    let humidity = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        0.5, 52.0, "0.01",
    ))));
    let light = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        0.0, 100.0, "0.01",
    ))));
    let temperature = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        4.0, 40.0, "0.01",
    ))));
    let equipment_fault = Rc::new(RefCell::new(BooleanFlag::new()));

    let plants = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        0.0, 20.0, "1",
    ))));
    let blossoms = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        0.0, 1000.0, "1",
    ))));
    let fruit = Rc::new(RefCell::new(BoundedNumeric::new(NumericSpec::new(
        0.0, 1000.0, "1",
    ))));

    // Min and Max Height feed each other's range; Median sits between both
    let min_height = Rc::new(RefCell::new(
        BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_max_source(&max_height_var)
            .with_commit_target(&min_height_var),
    ));
    let max_height = Rc::new(RefCell::new(
        BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_min_source(&min_height_var)
            .with_commit_target(&max_height_var),
    ));
    let median_height = Rc::new(RefCell::new(
        BoundedNumeric::new(NumericSpec::new(0.0, 1000.0, "0.01"))
            .with_min_source(&min_height_var)
            .with_max_source(&max_height_var),
    ));

    BoundedNumeric::watch(&max_height_var, &min_height);
    BoundedNumeric::watch(&min_height_var, &max_height);
    BoundedNumeric::watch(&min_height_var, &median_height);
    BoundedNumeric::watch(&max_height_var, &median_height);

    let notes = Rc::new(RefCell::new(MultilineText::new()));

    let mut form = FormController::new();
    form.add_field(FieldBinding::new("Date", date.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Time", time.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Technician", technician.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Lab", lab.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Plot", plot.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Seed Sample", seed_sample.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Humidity", humidity.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Light", light.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Temperature", temperature.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Equipment Fault", equipment_fault.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Plants", plants.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Blossoms", blossoms.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Fruit", fruit.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Min Height", min_height.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Max Height", max_height.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Median Height", median_height.clone() as Rc<RefCell<dyn FormInput>>));
    form.add_field(FieldBinding::new("Notes", notes.clone() as Rc<RefCell<dyn FormInput>>));

    form.register_bound_var(min_height_var);
    form.register_bound_var(max_height_var);

    let handles = FormHandles {
        date,
        time,
        technician,
        lab,
        plot,
        seed_sample,
        humidity,
        light,
        temperature,
        equipment_fault,
        plants,
        blossoms,
        fruit,
        min_height,
        max_height,
        median_height,
        notes,
    };

    (form, handles)
}

/// Main application structure
pub struct AgriLogApp {
    pub form: FormController,
    pub fields: FormHandles,

    // Configuration and persistence
    pub config: AppConfig,
    pub data_dir: PathBuf,

    // UI state
    pub status: String,
    pub records_saved: u32,
    pub show_settings_dialog: bool,
    pub settings_data_dir: String,
    pub settings_technician: String,
}

impl AgriLogApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let (form, fields) = build_form();
        let data_dir = config.effective_data_dir();
        Self {
            form,
            fields,
            settings_data_dir: data_dir.display().to_string(),
            settings_technician: config.default_technician.clone(),
            config,
            data_dir,
            status: "Ready".to_string(),
            records_saved: 0,
            show_settings_dialog: false,
        }
    }

    /// Save the current record: force a final validation pass, refuse with a
    /// status message when any field is in error, otherwise append the
    /// record to today's CSV file and reset the form
    pub fn on_save(&mut self) {
        let errors = self.form.get_errors();
        if !errors.is_empty() {
            let names: Vec<&str> = errors.iter().map(|(name, _)| name.as_str()).collect();
            self.status = format!("Cannot save, error in fields: {}", names.join(", "));
            return;
        }

        let record = self.form.get();
        let today = chrono::Local::now().date_naive();
        match storage::append_record(&self.data_dir, today, &record) {
            Ok(_path) => {
                self.records_saved += 1;
                self.status = format!("{} records saved this session", self.records_saved);
                self.form.reset();
            }
            Err(err) => {
                eprintln!("Record save failed: {err}");
                self.status = format!("Save failed: {err}");
            }
        }
    }

    /// Clear the form without saving
    pub fn on_reset(&mut self) {
        self.form.reset();
        self.status = "Form reset".to_string();
    }

    /// Apply and persist the settings dialog's edits
    pub fn apply_settings(&mut self) {
        let trimmed = self.settings_data_dir.trim();
        self.config.data_dir = if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        };
        self.config.default_technician = self.settings_technician.trim().to_string();
        self.data_dir = self.config.effective_data_dir();

        if let Err(err) = config::save(&self.config) {
            eprintln!("Warning: {err}");
            self.status = format!("Settings not saved: {err}");
        } else {
            self.status = "Settings saved".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::force_focus_out_validation;
    use crate::validation::FieldValidator;

    #[test]
    fn test_form_declaration_order_matches_record_layout() {
        let (form, _handles) = build_form();
        let names: Vec<String> = form.get().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            [
                "Date", "Time", "Technician", "Lab", "Plot", "Seed Sample",
                "Humidity", "Light", "Temperature", "Equipment Fault",
                "Plants", "Blossoms", "Fruit",
                "Min Height", "Max Height", "Median Height", "Notes",
            ]
        );
    }

    #[test]
    fn test_fresh_form_reports_every_validated_field() {
        let (mut form, _handles) = build_form();
        let errors = form.get_errors();
        let names: Vec<&str> = errors.iter().map(|(n, _)| n.as_str()).collect();

        // Every validated field starts empty and fails its forced pass
        assert!(names.contains(&"Date"));
        assert!(names.contains(&"Technician"));
        assert!(names.contains(&"Humidity"));
        // Unvalidated inputs never appear
        assert!(!names.contains(&"Lab"));
        assert!(!names.contains(&"Equipment Fault"));
        assert!(!names.contains(&"Notes"));
    }

    #[test]
    fn test_min_height_commit_constrains_max_height() {
        let (_form, handles) = build_form();

        handles.min_height.borrow_mut().set_text("50");
        assert!(force_focus_out_validation(&mut *handles.min_height.borrow_mut()));
        handles.min_height.borrow_mut().commit_focus_value();

        let mut max_height = handles.max_height.borrow_mut();
        max_height.set_text("40");
        assert!(!force_focus_out_validation(&mut *max_height));
        assert_eq!(
            max_height.validation_state().message(),
            "Value is too low (min 50)"
        );
    }

    #[test]
    fn test_median_height_tracks_both_bounds() {
        let (_form, handles) = build_form();

        handles.min_height.borrow_mut().set_text("10");
        force_focus_out_validation(&mut *handles.min_height.borrow_mut());
        handles.min_height.borrow_mut().commit_focus_value();

        handles.max_height.borrow_mut().set_text("20");
        force_focus_out_validation(&mut *handles.max_height.borrow_mut());
        handles.max_height.borrow_mut().commit_focus_value();

        let median = handles.median_height.borrow();
        assert_eq!(median.effective_min(), 10.0);
        assert_eq!(median.effective_max(), 20.0);
    }

    #[test]
    fn test_reset_clears_cross_field_bounds() {
        let (mut form, handles) = build_form();

        handles.min_height.borrow_mut().set_text("50");
        force_focus_out_validation(&mut *handles.min_height.borrow_mut());
        handles.min_height.borrow_mut().commit_focus_value();
        assert_eq!(handles.max_height.borrow().effective_min(), 50.0);

        form.reset();
        assert_eq!(handles.max_height.borrow().effective_min(), 0.0);
        assert_eq!(handles.min_height.borrow().text(), "");
    }
}
