use eframe::egui;
use poll_promise::Promise;

use crate::config::Config;
use crate::db::DemoDatabase;
use crate::inference::{AsyncOperation, HostedEndpoint, InferenceClient, InferenceError};
use crate::models::{AppState, QueryCandidate, SchemaMode, Session, TableData};
use crate::schema::{parse_schema_text, Schema, SchemaOrigin};
use crate::sql::{validate_read_only, ValidationError};
use crate::ui::components::*;
use crate::ui::setup_styles;

pub struct SqlScribeApp {
    // Configuration and demo data
    pub config: Config,
    pub demo_db: Option<DemoDatabase>,
    pub table_previews: Vec<TableData>,

    // Session state (schema + history), explicit rather than ambient
    pub session: Session,
    pub schema_mode: SchemaMode,

    // Editor buffers
    pub question_input: String,
    pub manual_schema_text: String,
    pub extracted_schema_text: String,

    // Latest candidate and its execution result
    pub current_sql: Option<String>,
    pub current_validation: Option<Result<(), ValidationError>>,
    pub result: Option<TableData>,
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,

    // Async operations
    pub pending_operation: Option<AsyncOperation>,

    // Status
    pub status_message: String,

    // Dialogs
    pub show_history: bool,
    pub edit_config: Option<Config>,

    // UI components
    menu_bar: MenuBar,
    status_bar: StatusBar,
    question_panel: QuestionPanel,
    schema_panel: SchemaPanel,
    sql_view: SqlView,
    results_grid: ResultsGrid,
    history_panel: HistoryPanel,
    settings_dialog: SettingsDialog,
}

impl SqlScribeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        setup_styles(&cc.egui_ctx);

        let config = Config::load().unwrap_or_else(|_| Config::new());

        let demo_db = match DemoDatabase::open() {
            Ok(db) => Some(db),
            Err(e) => {
                log::error!("failed to open demo database: {}", e);
                None
            }
        };

        // Restore history and editor contents from the previous run
        let (history, schema_mode, manual_schema_text) = match AppState::load() {
            Ok(state) => (state.history, state.schema_mode, state.manual_schema_text),
            Err(_) => (Vec::new(), SchemaMode::Sample, String::new()),
        };

        let mut app = Self {
            config,
            demo_db,
            table_previews: Vec::new(),
            session: Session { schema: None, history },
            schema_mode,
            question_input: String::new(),
            manual_schema_text,
            extracted_schema_text: String::new(),
            current_sql: None,
            current_validation: None,
            result: None,
            sort_column: None,
            sort_ascending: true,
            pending_operation: None,
            status_message: "Ready".to_string(),
            show_history: false,
            edit_config: None,
            menu_bar: MenuBar::new(),
            status_bar: StatusBar::new(),
            question_panel: QuestionPanel::new(),
            schema_panel: SchemaPanel::new(),
            sql_view: SqlView::new(),
            results_grid: ResultsGrid::new(),
            history_panel: HistoryPanel::new(),
            settings_dialog: SettingsDialog::new(),
        };

        app.rebuild_schema_for_mode();
        app.load_table_previews();
        app
    }

    /// Seed data never changes at runtime, so the sidebar previews are read
    /// once at startup.
    fn load_table_previews(&mut self) {
        self.table_previews.clear();
        let Some(db) = &self.demo_db else { return };
        let Ok(schema) = db.schema() else { return };
        for table in &schema.tables {
            match db.preview(&table.name, 5) {
                Ok((columns, rows)) => self.table_previews.push(TableData {
                    name: table.name.clone(),
                    columns,
                    rows,
                }),
                Err(e) => log::warn!("preview for {} failed: {}", table.name, e),
            }
        }
    }

    pub fn save_state(&self) {
        let state = AppState {
            history: self.session.history.clone(),
            schema_mode: self.schema_mode,
            manual_schema_text: self.manual_schema_text.clone(),
        };
        let _ = state.save(); // Ignore errors when saving state
    }

    fn make_client(&self) -> InferenceClient {
        let endpoint = HostedEndpoint::new(
            &self.config.endpoint_base,
            &self.config.text_model,
            &self.config.vision_model,
            self.config.resolved_token(),
            self.config.timeout(),
        );
        InferenceClient::new(Box::new(endpoint))
    }

    fn endpoint_status(&self) -> String {
        let auth = if self.config.resolved_token().is_some() {
            "token"
        } else {
            "anonymous"
        };
        format!("{} ({})", self.config.text_model, auth)
    }

    /// Schemas are recreated on every mode switch; nothing leaks from one
    /// intake path into another.
    fn rebuild_schema_for_mode(&mut self) {
        self.session.schema = match self.schema_mode {
            SchemaMode::Sample => match &self.demo_db {
                Some(db) => match db.schema() {
                    Ok(schema) => Some(schema),
                    Err(e) => {
                        self.status_message = format!("Could not read demo schema: {}", e);
                        None
                    }
                },
                None => None,
            },
            SchemaMode::Manual => {
                if self.manual_schema_text.trim().is_empty() {
                    None
                } else {
                    match parse_schema_text(&self.manual_schema_text, SchemaOrigin::Manual) {
                        Ok(schema) => Some(schema),
                        Err(e) => {
                            self.status_message = format!("Schema not applied: {}", e);
                            None
                        }
                    }
                }
            }
            // Image mode starts empty; the user extracts, edits, confirms.
            SchemaMode::Image => None,
        };
    }

    fn apply_manual_schema(&mut self) {
        match parse_schema_text(&self.manual_schema_text, SchemaOrigin::Manual) {
            Ok(schema) => {
                self.status_message = format!(
                    "Schema applied: {} table(s)",
                    schema.tables.len()
                );
                self.session.schema = Some(schema);
                self.save_state();
            }
            Err(e) => {
                self.status_message = format!("Schema not applied: {}", e);
                self.session.schema = None;
            }
        }
    }

    fn confirm_extracted_schema(&mut self) {
        // Re-parse the buffer: the user may have edited the extraction.
        match parse_schema_text(
            &self.extracted_schema_text,
            SchemaOrigin::Image { verified: true },
        ) {
            Ok(schema) => {
                self.status_message = format!(
                    "Extracted schema confirmed: {} table(s)",
                    schema.tables.len()
                );
                self.session.schema = Some(schema);
            }
            Err(e) => {
                self.status_message = format!("Cannot confirm schema: {}", e);
            }
        }
    }

    pub fn generate_sql(&mut self) {
        if self.pending_operation.is_some() || !self.session.can_generate() {
            return;
        }
        let Some(schema) = self.session.schema.clone() else {
            return;
        };
        let question = self.question_input.trim().to_string();
        if question.is_empty() {
            return;
        }

        self.status_message = "Generating SQL...".to_string();
        log::info!("generating SQL for question: {}", question);

        let client = self.make_client();
        let schema_text = schema.to_prompt_text();
        let question_clone = question.clone();

        self.pending_operation = Some(AsyncOperation::GenerateSql {
            question,
            schema_text,
            promise: Promise::spawn_thread("generate_sql", move || {
                client.generate_sql(&schema, &question_clone)
            }),
        });
    }

    pub fn extract_schema_from_image(&mut self, path: String) {
        if self.pending_operation.is_some() {
            return;
        }

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.status_message = format!("Could not read image {}: {}", path, e);
                return;
            }
        };
        let mime = mime_for_path(&path);

        self.status_message = "Extracting schema from image...".to_string();
        log::info!("extracting schema from {} ({})", path, mime);

        let client = self.make_client();
        let mime_owned = mime.to_string();
        self.pending_operation = Some(AsyncOperation::ExtractSchema {
            promise: Promise::spawn_thread("extract_schema", move || {
                client.extract_schema_from_image(&bytes, &mime_owned)
            }),
        });
    }

    /// Run the current candidate against the demo database. The read-only
    /// check is re-applied here so a rejected candidate can never reach the
    /// engine, whatever path led here.
    pub fn execute_current(&mut self) {
        let Some(sql) = self.current_sql.clone() else {
            return;
        };
        self.run_query(&sql);
    }

    fn run_query(&mut self, sql: &str) {
        if let Err(e) = validate_read_only(sql) {
            self.status_message = format!("Not executed: {}", e);
            return;
        }
        if self.schema_mode != SchemaMode::Sample {
            self.status_message = "Execution is only available in Sample DB mode".to_string();
            return;
        }
        let Some(db) = &self.demo_db else {
            self.status_message = "Demo database unavailable".to_string();
            return;
        };

        match db.execute_query(sql) {
            Ok((columns, rows)) => {
                self.status_message = format!("Query returned {} rows", rows.len());
                self.result = Some(TableData {
                    name: "Query Result".to_string(),
                    columns,
                    rows,
                });
                self.sort_column = None;
                self.sort_ascending = true;
            }
            Err(e) => {
                log::warn!("execution error: {}", e);
                self.status_message = format!("Execution error: {}", e);
                self.result = None;
            }
        }
    }

    pub fn load_candidate(&mut self, index: usize) {
        if let Some(candidate) = self.session.history.get(index) {
            self.question_input = candidate.question.clone();
            self.current_sql = Some(candidate.sql.clone());
            self.current_validation = Some(validate_read_only(&candidate.sql));
            self.result = None;
            self.status_message = "Loaded candidate from history".to_string();
        }
    }

    pub fn sort_result(&mut self, column_index: usize) {
        if self.sort_column == Some(column_index) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = Some(column_index);
            self.sort_ascending = true;
        }

        if let Some(data) = &mut self.result {
            let ascending = self.sort_ascending;
            data.rows.sort_by(|a, b| {
                let a_val = a.get(column_index).map(|s| s.as_str()).unwrap_or("");
                let b_val = b.get(column_index).map(|s| s.as_str()).unwrap_or("");

                // Numeric-aware ordering where both cells parse as numbers
                let cmp = match (a_val.parse::<f64>(), b_val.parse::<f64>()) {
                    (Ok(a_num), Ok(b_num)) => {
                        a_num.partial_cmp(&b_num).unwrap_or(std::cmp::Ordering::Equal)
                    }
                    _ => a_val.cmp(b_val),
                };

                if ascending { cmp } else { cmp.reverse() }
            });
        }
    }

    fn clear_session(&mut self) {
        self.session = Session::default();
        self.current_sql = None;
        self.current_validation = None;
        self.result = None;
        self.question_input.clear();
        self.rebuild_schema_for_mode();
        self.status_message = "Session cleared".to_string();
        self.save_state();
    }
}

fn mime_for_path(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

impl eframe::App for SqlScribeApp {
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.save_state();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_async_operations();

        let busy = matches!(
            self.pending_operation,
            Some(AsyncOperation::GenerateSql { .. })
        );
        let extracting = matches!(
            self.pending_operation,
            Some(AsyncOperation::ExtractSchema { .. })
        );

        // Top menu bar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            if let Some(event) = self.menu_bar.show(ui, &self.endpoint_status()) {
                match event {
                    MenuBarEvent::ShowSettings => {
                        self.edit_config = Some(self.config.clone());
                    }
                    MenuBarEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                    MenuBarEvent::ToggleHistory => self.show_history = !self.show_history,
                    MenuBarEvent::ClearSession => self.clear_session(),
                }
            }
        });

        // Status bar
        let row_count = self.result.as_ref().map(|data| data.rows.len());
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar.show(
                ui,
                &self.status_message,
                row_count,
                self.current_validation.as_ref(),
            );
        });

        // Settings dialog
        let mut settings_event = None;
        if let Some(config) = self.edit_config.as_mut() {
            settings_event = self.settings_dialog.show(ctx, config);
        }
        match settings_event {
            Some(SettingsDialogEvent::Save) => {
                if let Some(config) = self.edit_config.take() {
                    self.config = config;
                    let _ = self.config.save();
                    self.status_message = "Settings saved".to_string();
                }
            }
            Some(SettingsDialogEvent::Cancel) => {
                self.edit_config = None;
            }
            None => {}
        }

        // History window
        if self.show_history {
            if let Some(event) = self.history_panel.show(ctx, &self.session.history) {
                match event {
                    HistoryPanelEvent::Load(index) => {
                        self.load_candidate(index);
                        self.show_history = false;
                    }
                    HistoryPanelEvent::Delete(index) => {
                        if index < self.session.history.len() {
                            self.session.history.remove(index);
                            self.save_state();
                        }
                    }
                    HistoryPanelEvent::Close => self.show_history = false,
                }
            }
        }

        // Left sidebar - schema intake
        egui::SidePanel::left("schema_panel")
            .resizable(true)
            .default_width(320.0)
            .min_width(240.0)
            .max_width(600.0)
            .show(ctx, |ui| {
                let buffer = match self.schema_mode {
                    SchemaMode::Image => &mut self.extracted_schema_text,
                    _ => &mut self.manual_schema_text,
                };
                if let Some(event) = self.schema_panel.show(
                    ui,
                    self.schema_mode,
                    self.session.schema.as_ref(),
                    buffer,
                    &self.table_previews,
                    extracting,
                ) {
                    match event {
                        SchemaPanelEvent::ModeChanged(mode) => {
                            self.schema_mode = mode;
                            self.rebuild_schema_for_mode();
                            self.result = None;
                            self.save_state();
                        }
                        SchemaPanelEvent::ApplyManualSchema => self.apply_manual_schema(),
                        SchemaPanelEvent::LoadExample(text) => {
                            self.manual_schema_text = text;
                            self.apply_manual_schema();
                        }
                        SchemaPanelEvent::ExtractFromImage(path) => {
                            self.extract_schema_from_image(path);
                        }
                        SchemaPanelEvent::ConfirmExtracted => self.confirm_extracted_schema(),
                    }
                }
            });

        // Main content - question, SQL, results
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(event) = self.question_panel.show(
                ui,
                &mut self.question_input,
                self.schema_mode == SchemaMode::Sample,
                self.session.can_generate(),
                busy,
            ) {
                match event {
                    QuestionPanelEvent::Generate => self.generate_sql(),
                    QuestionPanelEvent::Clear => self.question_input.clear(),
                }
            }

            ui.separator();

            if let Some(sql) = self.current_sql.clone() {
                if let Some(event) = self.sql_view.show(
                    ui,
                    &sql,
                    self.current_validation.as_ref(),
                    self.schema_mode == SchemaMode::Sample && self.demo_db.is_some(),
                ) {
                    match event {
                        SqlViewEvent::Execute => self.execute_current(),
                        SqlViewEvent::Copy => {
                            ctx.output_mut(|o| o.copied_text = sql.clone());
                            self.status_message = "SQL copied to clipboard".to_string();
                        }
                    }
                }

                ui.separator();
            }

            if let Some(data) = &self.result {
                let data = data.clone();
                if let Some(event) = self.results_grid.show(
                    ui,
                    &data,
                    self.sort_column,
                    self.sort_ascending,
                ) {
                    match event {
                        ResultsGridEvent::ColumnSorted(col_index) => self.sort_result(col_index),
                    }
                }
            } else if busy {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            } else if self.current_sql.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Ask a question to generate SQL");
                });
            }
        });

        // Request repaint while waiting for the endpoint
        if self.pending_operation.is_some() {
            ctx.request_repaint();
        }
    }
}

impl SqlScribeApp {
    fn handle_async_operations(&mut self) {
        let mut should_clear_operation = false;
        let mut new_candidate: Option<QueryCandidate> = None;
        let mut new_schema: Option<Schema> = None;
        let mut new_status: Option<String> = None;

        if let Some(operation) = &self.pending_operation {
            match operation {
                AsyncOperation::GenerateSql {
                    question,
                    schema_text,
                    promise,
                } => {
                    if let Some(result) = promise.ready() {
                        match result {
                            Ok(sql) => {
                                new_candidate = Some(QueryCandidate::new(
                                    question.clone(),
                                    sql.clone(),
                                    schema_text.clone(),
                                ));
                            }
                            Err(e) => {
                                log::warn!("generation failed: {}", e);
                                new_status = Some(describe_inference_error(e));
                            }
                        }
                        should_clear_operation = true;
                    }
                }
                AsyncOperation::ExtractSchema { promise } => {
                    if let Some(result) = promise.ready() {
                        match result {
                            Ok(schema) => {
                                new_schema = Some(schema.clone());
                            }
                            Err(e) => {
                                log::warn!("extraction failed: {}", e);
                                new_status = Some(describe_inference_error(e));
                            }
                        }
                        should_clear_operation = true;
                    }
                }
            }
        }

        if should_clear_operation {
            self.pending_operation = None;
        }
        if let Some(candidate) = new_candidate {
            let validation = validate_read_only(&candidate.sql);
            self.current_sql = Some(candidate.sql.clone());
            self.current_validation = Some(validation.clone());
            self.session.push_candidate(candidate.clone());
            self.save_state();

            match validation {
                Ok(()) if self.schema_mode == SchemaMode::Sample => {
                    // Auto-run read-only candidates against the demo data
                    self.run_query(&candidate.sql);
                }
                Ok(()) => {
                    self.status_message = "SQL generated".to_string();
                }
                Err(e) => {
                    self.status_message = format!("SQL generated but not executed: {}", e);
                }
            }
        }
        if let Some(schema) = new_schema {
            self.extracted_schema_text = schema.to_prompt_text();
            self.status_message = format!(
                "Extracted {} table(s) — review and confirm before use",
                schema.tables.len()
            );
            self.session.schema = Some(schema);
        }
        if let Some(status) = new_status {
            self.status_message = status;
        }
    }
}

/// One distinct, actionable message per failure kind; never a generic error.
fn describe_inference_error(e: &InferenceError) -> String {
    match e {
        InferenceError::Network(_) => format!("Endpoint unreachable: {}", e),
        InferenceError::ModelLoading => format!("Gave up after retries: {}", e),
        InferenceError::RateLimited => format!("Slow down: {}", e),
        InferenceError::MalformedResponse(_) => format!("Bad model output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path("/tmp/schema.png"), "image/png");
        assert_eq!(mime_for_path("diagram.JPG"), "image/jpeg");
        assert_eq!(mime_for_path("noext"), "application/octet-stream");
    }

    #[test]
    fn test_describe_inference_error_is_distinct_per_kind() {
        let messages: Vec<String> = [
            InferenceError::Network("x".to_string()),
            InferenceError::ModelLoading,
            InferenceError::RateLimited,
            InferenceError::MalformedResponse("y".to_string()),
        ]
        .iter()
        .map(describe_inference_error)
        .collect();

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
