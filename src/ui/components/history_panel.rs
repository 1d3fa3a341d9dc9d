use eframe::egui;

use crate::models::QueryCandidate;

#[derive(Debug)]
pub enum HistoryPanelEvent {
    Load(usize),
    Delete(usize),
    Close,
}

pub struct HistoryPanel;

impl HistoryPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        history: &[QueryCandidate],
    ) -> Option<HistoryPanelEvent> {
        let mut event = None;
        let mut is_open = true;

        egui::Window::new("🕒 Query History")
            .open(&mut is_open)
            .resizable(true)
            .default_width(600.0)
            .default_height(400.0)
            .show(ctx, |ui| {
                if history.is_empty() {
                    ui.label("No queries generated yet.");
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(340.0)
                        .show(ui, |ui| {
                            for (index, candidate) in history.iter().enumerate() {
                                ui.group(|ui| {
                                    ui.horizontal(|ui| {
                                        ui.vertical(|ui| {
                                            ui.strong(&candidate.question);
                                            ui.label(
                                                egui::RichText::new(&candidate.created_at)
                                                    .size(10.0)
                                                    .color(egui::Color32::GRAY),
                                            );
                                        });

                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                if ui.button("🗑 Delete").clicked() {
                                                    event = Some(HistoryPanelEvent::Delete(index));
                                                }
                                                if ui.button("📥 Load").clicked() {
                                                    event = Some(HistoryPanelEvent::Load(index));
                                                }
                                            },
                                        );
                                    });

                                    ui.add_space(5.0);
                                    let preview = match candidate.sql.char_indices().nth(150) {
                                        Some((idx, _)) => format!("{}...", &candidate.sql[..idx]),
                                        None => candidate.sql.clone(),
                                    };
                                    ui.label(
                                        egui::RichText::new(preview)
                                            .size(10.0)
                                            .color(egui::Color32::DARK_GRAY)
                                            .family(egui::FontFamily::Monospace),
                                    );
                                });
                                ui.add_space(5.0);
                            }
                        });
                }

                ui.add_space(10.0);
                ui.separator();

                if ui.button("Close").clicked() {
                    event = Some(HistoryPanelEvent::Close);
                }
            });

        if !is_open {
            event = Some(HistoryPanelEvent::Close);
        }

        event
    }
}
