mod history_panel;
mod menu_bar;
mod question_panel;
mod results_grid;
mod schema_panel;
mod settings_dialog;
mod sql_view;
mod status_bar;

pub use history_panel::{HistoryPanel, HistoryPanelEvent};
pub use menu_bar::{MenuBar, MenuBarEvent};
pub use question_panel::{QuestionPanel, QuestionPanelEvent};
pub use results_grid::{ResultsGrid, ResultsGridEvent};
pub use schema_panel::{SchemaPanel, SchemaPanelEvent};
pub use settings_dialog::{SettingsDialog, SettingsDialogEvent};
pub use sql_view::{SqlView, SqlViewEvent};
pub use status_bar::StatusBar;
