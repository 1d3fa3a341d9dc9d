use eframe::egui;

use crate::sql::ValidationError;

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    /// Left side: the latest status message. Right side: row count of the
    /// current result and the read-only verdict for the current candidate.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        status_message: &str,
        row_count: Option<usize>,
        validation: Option<&Result<(), ValidationError>>,
    ) {
        ui.horizontal(|ui| {
            ui.label(status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(count) = row_count {
                    ui.label(format!("{} rows", count));
                    ui.separator();
                }
                match validation {
                    Some(Ok(())) => {
                        ui.label(
                            egui::RichText::new("read-only ✔")
                                .color(egui::Color32::from_rgb(100, 180, 100)),
                        );
                    }
                    Some(Err(_)) => {
                        ui.label(
                            egui::RichText::new("blocked ✖")
                                .color(egui::Color32::from_rgb(220, 100, 100)),
                        );
                    }
                    None => {}
                }
            });
        });
    }
}
