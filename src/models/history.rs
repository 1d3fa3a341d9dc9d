use serde::{Deserialize, Serialize};

/// One generated SQL statement together with the question and the exact
/// schema text the prompt was built from. Never mutated after creation, so a
/// candidate can be re-validated or re-run later even if the user has since
/// switched schema mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryCandidate {
    pub question: String,
    pub sql: String,
    pub schema_text: String,
    pub created_at: String,
}

impl QueryCandidate {
    pub fn new(question: String, sql: String, schema_text: String) -> Self {
        Self {
            question,
            sql,
            schema_text,
            created_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
