use eframe::egui;

use crate::sql::ValidationError;

#[derive(Debug)]
pub enum SqlViewEvent {
    Execute,
    Copy,
}

pub struct SqlView;

impl SqlView {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        sql: &str,
        validation: Option<&Result<(), ValidationError>>,
        can_execute: bool,
    ) -> Option<SqlViewEvent> {
        let mut event = None;

        ui.label("Generated SQL:");
        egui::Frame::none()
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(sql).family(egui::FontFamily::Monospace),
                    )
                    .selectable(true),
                );
            });

        match validation {
            Some(Ok(())) => {
                ui.label(
                    egui::RichText::new("✔ read-only query")
                        .color(egui::Color32::from_rgb(100, 180, 100)),
                );
            }
            Some(Err(e)) => {
                ui.label(
                    egui::RichText::new(format!("✖ {}", e))
                        .color(egui::Color32::from_rgb(220, 100, 100)),
                );
            }
            None => {}
        }

        ui.horizontal(|ui| {
            let executable = can_execute && matches!(validation, Some(Ok(())));
            if ui
                .add_enabled(executable, egui::Button::new("▶ Run on Sample DB"))
                .clicked()
            {
                event = Some(SqlViewEvent::Execute);
            }

            if ui.button("📋 Copy SQL").clicked() {
                event = Some(SqlViewEvent::Copy);
            }

            if !can_execute {
                ui.separator();
                ui.label(
                    egui::RichText::new("Execution only available in Sample DB mode")
                        .size(9.0)
                        .color(egui::Color32::GRAY),
                );
            }
        });

        event
    }
}
