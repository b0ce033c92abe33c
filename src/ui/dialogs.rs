//! Dialog UI components for AgriLog

use eframe::egui;

use crate::app_state::AgriLogApp;

impl AgriLogApp {
    /// Preferences window: data directory and default technician
    pub fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_dialog;
        egui::Window::new("Preferences")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("preferences")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Data directory:");
                        ui.text_edit_singleline(&mut self.settings_data_dir);
                        ui.end_row();

                        ui.label("Default technician:");
                        ui.text_edit_singleline(&mut self.settings_technician);
                        ui.end_row();
                    });

                ui.separator();
                if ui.button("Apply").clicked() {
                    self.apply_settings();
                }
            });
        self.show_settings_dialog = open;
    }
}
