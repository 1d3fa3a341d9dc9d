use eframe::egui;

#[derive(Debug)]
pub enum MenuBarEvent {
    ShowSettings,
    Quit,
    ToggleHistory,
    ClearSession,
}

pub struct MenuBar;

impl MenuBar {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, endpoint_status: &str) -> Option<MenuBarEvent> {
        let mut event = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Settings...").clicked() {
                    event = Some(MenuBarEvent::ShowSettings);
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    event = Some(MenuBarEvent::Quit);
                }
            });

            ui.menu_button("Session", |ui| {
                if ui.button("Query History").clicked() {
                    event = Some(MenuBarEvent::ToggleHistory);
                    ui.close_menu();
                }
                if ui.button("Clear Session").clicked() {
                    event = Some(MenuBarEvent::ClearSession);
                    ui.close_menu();
                }
            });

            ui.separator();

            if ui.button("🕒 History").clicked() {
                event = Some(MenuBarEvent::ToggleHistory);
            }

            ui.separator();
            ui.label(endpoint_status);
        });

        event
    }
}
