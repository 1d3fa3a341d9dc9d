use eframe::egui;

use crate::models::{SchemaMode, TableData};
use crate::schema::{example_schemas, Schema};

#[derive(Debug)]
pub enum SchemaPanelEvent {
    ModeChanged(SchemaMode),
    ApplyManualSchema,
    LoadExample(String),
    ExtractFromImage(String),
    ConfirmExtracted,
}

pub struct SchemaPanel {
    image_path_input: String,
}

impl SchemaPanel {
    pub fn new() -> Self {
        Self {
            image_path_input: String::new(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        mode: SchemaMode,
        schema: Option<&Schema>,
        manual_schema_text: &mut String,
        previews: &[TableData],
        extracting: bool,
    ) -> Option<SchemaPanelEvent> {
        let mut event = None;

        ui.heading("Schema");
        ui.separator();

        ui.horizontal(|ui| {
            for (label, value) in [
                ("Sample DB", SchemaMode::Sample),
                ("Manual", SchemaMode::Manual),
                ("From Image", SchemaMode::Image),
            ] {
                if ui.selectable_label(mode == value, label).clicked() && mode != value {
                    event = Some(SchemaPanelEvent::ModeChanged(value));
                }
            }
        });

        ui.separator();

        match mode {
            SchemaMode::Sample => self.show_sample(ui, schema, previews),
            SchemaMode::Manual => {
                if let Some(e) = self.show_manual(ui, manual_schema_text) {
                    event = Some(e);
                }
            }
            SchemaMode::Image => {
                if let Some(e) = self.show_image(ui, schema, manual_schema_text, extracting) {
                    event = Some(e);
                }
            }
        }

        event
    }

    fn show_sample(&self, ui: &mut egui::Ui, schema: Option<&Schema>, previews: &[TableData]) {
        ui.label("Bundled demo database (read-only):");
        ui.add_space(4.0);
        egui::ScrollArea::vertical()
            .id_source("sample_schema")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if let Some(schema) = schema {
                    for table in &schema.tables {
                        ui.strong(format!("▦ {}", table.name));
                        for column in &table.columns {
                            ui.label(format!("    {}: {}", column.name, column.data_type));
                        }
                        if let Some(preview) = previews.iter().find(|p| p.name == table.name) {
                            egui::CollapsingHeader::new("sample rows")
                                .id_source(format!("preview_{}", table.name))
                                .show(ui, |ui| {
                                    egui::Grid::new(format!("preview_grid_{}", table.name))
                                        .striped(true)
                                        .show(ui, |ui| {
                                            for column in &preview.columns {
                                                ui.small(
                                                    egui::RichText::new(&column.name).strong(),
                                                );
                                            }
                                            ui.end_row();
                                            for row in &preview.rows {
                                                for cell in row {
                                                    ui.small(cell);
                                                }
                                                ui.end_row();
                                            }
                                        });
                                });
                        }
                        ui.add_space(4.0);
                    }
                } else {
                    ui.label("Demo database unavailable");
                }
            });
    }

    fn show_manual(
        &self,
        ui: &mut egui::Ui,
        manual_schema_text: &mut String,
    ) -> Option<SchemaPanelEvent> {
        let mut event = None;

        ui.label("Paste CREATE TABLE statements or a table outline:");
        egui::ScrollArea::vertical()
            .id_source("manual_schema")
            .max_height(ui.available_height() - 80.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(manual_schema_text)
                        .desired_rows(12)
                        .desired_width(f32::INFINITY)
                        .code_editor(),
                );
            });

        ui.horizontal(|ui| {
            if ui.button("Apply Schema").clicked() {
                event = Some(SchemaPanelEvent::ApplyManualSchema);
            }

            ui.menu_button("Load Example", |ui| {
                for (name, text) in example_schemas() {
                    if ui.button(name).clicked() {
                        event = Some(SchemaPanelEvent::LoadExample(text.to_string()));
                        ui.close_menu();
                    }
                }
            });
        });

        event
    }

    fn show_image(
        &mut self,
        ui: &mut egui::Ui,
        schema: Option<&Schema>,
        manual_schema_text: &mut String,
        extracting: bool,
    ) -> Option<SchemaPanelEvent> {
        let mut event = None;

        ui.label("Path to a schema diagram or screenshot:");
        ui.add(
            egui::TextEdit::singleline(&mut self.image_path_input)
                .desired_width(f32::INFINITY)
                .hint_text("/path/to/schema.png"),
        );

        ui.horizontal(|ui| {
            let extract = ui.add_enabled(
                !extracting && !self.image_path_input.trim().is_empty(),
                egui::Button::new(if extracting { "Extracting..." } else { "📷 Extract Schema" }),
            );
            if extract.clicked() {
                event = Some(SchemaPanelEvent::ExtractFromImage(
                    self.image_path_input.trim().to_string(),
                ));
            }
        });

        ui.separator();

        let unverified = schema.map(|s| !s.is_verified()).unwrap_or(false);
        if unverified {
            ui.label(
                egui::RichText::new("⚠ Extracted schema is unverified. Review, edit, and confirm.")
                    .color(egui::Color32::from_rgb(200, 150, 50)),
            );
        } else {
            ui.label("Extracted schema (editable):");
        }

        egui::ScrollArea::vertical()
            .id_source("image_schema")
            .max_height(ui.available_height() - 40.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(manual_schema_text)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY)
                        .code_editor(),
                );
            });

        if confirm_available(schema, manual_schema_text)
            && ui.button("✔ Confirm Schema").clicked()
        {
            event = Some(SchemaPanelEvent::ConfirmExtracted);
        }

        event
    }
}

/// Confirming is possible while an unverified extraction is pending, and also
/// when only the edited text buffer survives (e.g. after a mode round-trip);
/// the buffer is re-parsed on confirm either way.
fn confirm_available(schema: Option<&Schema>, buffer: &str) -> bool {
    schema.map(|s| !s.is_verified()).unwrap_or(false) || !buffer.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_schema_text, SchemaOrigin};

    #[test]
    fn test_confirm_available_for_unverified_extraction() {
        let schema = parse_schema_text(
            "Table: t\n  - id: INTEGER",
            SchemaOrigin::Image { verified: false },
        )
        .unwrap();
        assert!(confirm_available(Some(&schema), ""));
    }

    #[test]
    fn test_confirm_available_for_retained_buffer_after_mode_switch() {
        // Schema was dropped on the mode switch but the extraction text
        // survives; the user must still be able to confirm it.
        assert!(confirm_available(None, "Table: t\n  - id: INTEGER"));
    }

    #[test]
    fn test_confirm_unavailable_with_nothing_to_confirm() {
        assert!(!confirm_available(None, ""));
        assert!(!confirm_available(None, "   \n  "));
    }
}
