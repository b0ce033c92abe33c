//! Form rendering for AgriLog
//!
//! Renders the plot-record form and routes widget events into the
//! validation layer: every text change is diffed into a key edit and
//! dispatched before it is kept (a rejected edit reverts on the next
//! frame), and losing focus dispatches the final-value check.

use eframe::egui;

use crate::app_state::AgriLogApp;
use crate::validation::{derive_key_edit, run_validation, FieldValidator, ValidationEvent};
use crate::validators::{BoundedNumeric, ConstrainedChoice, DateText, RequiredText};

/// Drive a single-line text widget through key and focus-out validation
///
/// Returns the text edit output so callers can reposition the cursor.
fn validated_singleline<F: FieldValidator>(
    ui: &mut egui::Ui,
    field: &mut F,
    hint: &str,
    width: f32,
) -> egui::text_edit::TextEditOutput {
    let before = field.current_text().to_string();
    let mut buf = before.clone();

    let mut edit = egui::TextEdit::singleline(&mut buf)
        .hint_text(hint)
        .desired_width(width);
    if field.validation_state().is_error_displayed() {
        edit = edit.text_color(egui::Color32::RED);
    }
    let output = edit.show(ui);

    if output.response.changed() && buf != before {
        let key = derive_key_edit(&before, &buf);
        run_validation(field, &ValidationEvent::Key(key));
    }
    if output.response.lost_focus() {
        run_validation(field, &ValidationEvent::FocusOut);
    }
    output
}

fn required_entry(ui: &mut egui::Ui, field: &mut RequiredText, hint: &str) -> String {
    validated_singleline(ui, field, hint, 140.0);
    field.validation_state().message()
}

fn date_entry(ui: &mut egui::Ui, field: &mut DateText) -> String {
    validated_singleline(ui, field, "YYYY-MM-DD", 110.0);
    field.validation_state().message()
}

fn choice_entry(ui: &mut egui::Ui, field: &mut ConstrainedChoice) -> String {
    let mut output = validated_singleline(ui, field, "", 110.0);
    // After an autocomplete the cursor belongs at the end of the text
    if field.take_cursor_to_end() {
        let end = egui::text::CCursor::new(field.text().chars().count());
        output
            .state
            .cursor
            .set_char_range(Some(egui::text::CCursorRange::one(end)));
        output.state.store(ui.ctx(), output.response.id);
    }
    field.validation_state().message()
}

fn numeric_entry(ui: &mut egui::Ui, field: &mut BoundedNumeric) -> String {
    ui.horizontal(|ui| {
        let output = validated_singleline(ui, field, "", 76.0);
        if output.response.lost_focus() {
            field.commit_focus_value();
        }
        if ui.small_button("−").clicked() {
            field.step_by(-1.0);
        }
        if ui.small_button("+").clicked() {
            field.step_by(1.0);
        }
    });
    field.validation_state().message()
}

/// One labeled form cell: label on top, widget below, error text underneath
fn field_cell(ui: &mut egui::Ui, label: &str, add_widget: impl FnOnce(&mut egui::Ui) -> String) {
    ui.vertical(|ui| {
        ui.label(label);
        let error = add_widget(ui);
        if !error.is_empty() {
            ui.colored_label(egui::Color32::RED, error);
        }
    });
}

impl AgriLogApp {
    /// Render the whole form
    pub fn show_form(&mut self, ui: &mut egui::Ui) {
        let technician_hint = self.config.default_technician.clone();

        ui.group(|ui| {
            ui.strong("Record Information");
            egui::Grid::new("record_information")
                .num_columns(3)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    field_cell(ui, "Date", |ui| {
                        date_entry(ui, &mut self.fields.date.borrow_mut())
                    });
                    field_cell(ui, "Time", |ui| {
                        choice_entry(ui, &mut self.fields.time.borrow_mut())
                    });
                    field_cell(ui, "Technician", |ui| {
                        required_entry(ui, &mut self.fields.technician.borrow_mut(), &technician_hint)
                    });
                    ui.end_row();

                    field_cell(ui, "Lab", |ui| {
                        let mut lab = self.fields.lab.borrow_mut();
                        let choices = lab.choices().to_vec();
                        let text = lab.text_mut();
                        egui::ComboBox::from_id_salt("lab")
                            .selected_text(text.clone())
                            .width(110.0)
                            .show_ui(ui, |ui| {
                                for choice in &choices {
                                    ui.selectable_value(text, choice.clone(), choice);
                                }
                            });
                        String::new()
                    });
                    field_cell(ui, "Plot", |ui| {
                        choice_entry(ui, &mut self.fields.plot.borrow_mut())
                    });
                    field_cell(ui, "Seed Sample", |ui| {
                        required_entry(ui, &mut self.fields.seed_sample.borrow_mut(), "")
                    });
                    ui.end_row();
                });
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Environment Data");
            egui::Grid::new("environment_data")
                .num_columns(3)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    field_cell(ui, "Humidity (g/m³)", |ui| {
                        numeric_entry(ui, &mut self.fields.humidity.borrow_mut())
                    });
                    field_cell(ui, "Light (klx)", |ui| {
                        numeric_entry(ui, &mut self.fields.light.borrow_mut())
                    });
                    field_cell(ui, "Temperature (°C)", |ui| {
                        numeric_entry(ui, &mut self.fields.temperature.borrow_mut())
                    });
                    ui.end_row();
                });
            ui.checkbox(
                self.fields.equipment_fault.borrow_mut().checked_mut(),
                "Equipment Fault",
            );
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Plant Data");
            egui::Grid::new("plant_data")
                .num_columns(3)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    field_cell(ui, "Plants", |ui| {
                        numeric_entry(ui, &mut self.fields.plants.borrow_mut())
                    });
                    field_cell(ui, "Blossoms", |ui| {
                        numeric_entry(ui, &mut self.fields.blossoms.borrow_mut())
                    });
                    field_cell(ui, "Fruit", |ui| {
                        numeric_entry(ui, &mut self.fields.fruit.borrow_mut())
                    });
                    ui.end_row();

                    field_cell(ui, "Min Height (cm)", |ui| {
                        numeric_entry(ui, &mut self.fields.min_height.borrow_mut())
                    });
                    field_cell(ui, "Max Height (cm)", |ui| {
                        numeric_entry(ui, &mut self.fields.max_height.borrow_mut())
                    });
                    field_cell(ui, "Median Height (cm)", |ui| {
                        numeric_entry(ui, &mut self.fields.median_height.borrow_mut())
                    });
                    ui.end_row();
                });
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Notes");
            ui.add(
                egui::TextEdit::multiline(self.fields.notes.borrow_mut().text_mut())
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
        });
    }
}
