use eframe::egui;

use crate::schema::example_questions;

#[derive(Debug)]
pub enum QuestionPanelEvent {
    Generate,
    Clear,
}

pub struct QuestionPanel {
    show_examples: bool,
}

impl QuestionPanel {
    pub fn new() -> Self {
        Self { show_examples: false }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        question_input: &mut String,
        sample_mode: bool,
        can_generate: bool,
        busy: bool,
    ) -> Option<QuestionPanelEvent> {
        let mut event = None;

        ui.vertical(|ui| {
            ui.label("Ask a question about your data:");
            let response = ui.add(
                egui::TextEdit::multiline(question_input)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY)
                    .hint_text("e.g. Show all employees in the Engineering department"),
            );

            ui.horizontal(|ui| {
                let generate = ui.add_enabled(
                    can_generate && !busy && !question_input.trim().is_empty(),
                    egui::Button::new(if busy { "Generating..." } else { "▶ Generate SQL" }),
                );
                if generate.clicked()
                    || (response.has_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command))
                {
                    event = Some(QuestionPanelEvent::Generate);
                }

                if ui.button("Clear").clicked() {
                    event = Some(QuestionPanelEvent::Clear);
                }

                ui.separator();

                if ui
                    .selectable_label(self.show_examples, "💡 Examples")
                    .clicked()
                {
                    self.show_examples = !self.show_examples;
                }

                if !can_generate {
                    ui.separator();
                    ui.label(
                        egui::RichText::new("Define and confirm a schema first")
                            .color(egui::Color32::from_rgb(200, 150, 50)),
                    );
                }
            });

            if self.show_examples {
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    for example in example_questions(sample_mode) {
                        if ui.small_button(*example).clicked() {
                            *question_input = example.to_string();
                        }
                    }
                });
            }
        });

        event
    }
}
