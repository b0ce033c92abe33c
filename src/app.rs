//! Main application loop for AgriLog
//!
//! This module contains the eframe::App implementation and the main UI
//! update loop: menu bar, form panel, save/reset actions, and status bar.

use eframe::egui;

use crate::app_state::AgriLogApp;

impl eframe::App for AgriLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save Record").clicked() {
                        self.on_save();
                        ui.close();
                    }
                    if ui.button("Reset Form").clicked() {
                        self.on_reset();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Preferences").clicked() {
                        self.show_settings_dialog = true;
                        ui.close();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Records this session: {}", self.records_saved));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("AgriLog Data Entry");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_form(ui);

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        self.on_save();
                    }
                    if ui.button("Reset").clicked() {
                        self.on_reset();
                    }
                });
            });
        });

        if self.show_settings_dialog {
            self.show_settings_window(ctx);
        }
    }
}
