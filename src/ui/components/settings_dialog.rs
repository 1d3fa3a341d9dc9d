use eframe::egui;

use crate::config::Config;

#[derive(Debug)]
pub enum SettingsDialogEvent {
    Save,
    Cancel,
}

pub struct SettingsDialog;

impl SettingsDialog {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, config: &mut Config) -> Option<SettingsDialogEvent> {
        let mut event = None;

        egui::Window::new("Settings")
            .default_width(500.0)
            .show(ctx, |ui| {
                ui.heading("Inference Endpoint");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Endpoint base:");
                    ui.text_edit_singleline(&mut config.endpoint_base);
                });

                ui.horizontal(|ui| {
                    ui.label("SQL model:");
                    ui.text_edit_singleline(&mut config.text_model);
                });

                ui.horizontal(|ui| {
                    ui.label("Vision model:");
                    ui.text_edit_singleline(&mut config.vision_model);
                });

                ui.horizontal(|ui| {
                    ui.label("API token:");
                    ui.add(egui::TextEdit::singleline(&mut config.api_token).password(true));
                });
                ui.label(
                    egui::RichText::new(
                        "Without a token, requests share the anonymous rate limit. \
                         HUGGINGFACE_TOKEN from the environment is used as a fallback.",
                    )
                    .size(9.0)
                    .color(egui::Color32::GRAY),
                );

                ui.horizontal(|ui| {
                    ui.label("Timeout (seconds):");
                    ui.add(egui::DragValue::new(&mut config.timeout_secs).clamp_range(1..=120));
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        event = Some(SettingsDialogEvent::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        event = Some(SettingsDialogEvent::Cancel);
                    }
                });
            });

        event
    }
}
