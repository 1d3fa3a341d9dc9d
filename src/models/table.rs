use serde::{Deserialize, Serialize};

use crate::db::ColumnInfo;

/// One tabular result set, already rendered to display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<String>>,
}
