use serde::{Deserialize, Serialize};

/// Where a schema came from. Image-derived schemas stay unverified until the
/// user confirms them, since extraction is heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaOrigin {
    Sample,
    Manual,
    Image { verified: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// In-memory description of the database the user wants to query. Table and
/// column types are free text; nothing here is checked against a type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub origin: SchemaOrigin,
}

impl Schema {
    pub fn new(tables: Vec<Table>, origin: SchemaOrigin) -> Self {
        Self { tables, origin }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// An image-derived schema must be confirmed by the user before it is
    /// used for generation.
    pub fn is_verified(&self) -> bool {
        !matches!(self.origin, SchemaOrigin::Image { verified: false })
    }

    pub fn mark_verified(&mut self) {
        if let SchemaOrigin::Image { verified } = &mut self.origin {
            *verified = true;
        }
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Canonical text form used in prompts and stored with each generated
    /// candidate. Deterministic: same schema always serializes the same way.
    /// Round-trips through `parse_schema_text`.
    pub fn to_prompt_text(&self) -> String {
        let mut out = String::new();
        for table in &self.tables {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("Table: {}\n", table.name));
            for column in &table.columns {
                out.push_str(&format!("  - {}: {}\n", column.name, column.data_type));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employees_schema() -> Schema {
        Schema::new(
            vec![Table {
                name: "employees".to_string(),
                columns: vec![
                    Column { name: "id".to_string(), data_type: "INTEGER".to_string() },
                    Column { name: "name".to_string(), data_type: "TEXT".to_string() },
                ],
            }],
            SchemaOrigin::Manual,
        )
    }

    #[test]
    fn test_prompt_text_lists_tables_and_columns() {
        let text = employees_schema().to_prompt_text();
        assert!(text.contains("Table: employees"));
        assert!(text.contains("  - id: INTEGER"));
        assert!(text.contains("  - name: TEXT"));
    }

    #[test]
    fn test_prompt_text_is_deterministic() {
        let schema = employees_schema();
        assert_eq!(schema.to_prompt_text(), schema.to_prompt_text());
    }

    #[test]
    fn test_image_schema_needs_confirmation() {
        let mut schema = Schema::new(vec![], SchemaOrigin::Image { verified: false });
        assert!(!schema.is_verified());
        schema.mark_verified();
        assert!(schema.is_verified());
    }

    #[test]
    fn test_sample_and_manual_schemas_are_verified() {
        assert!(Schema::new(vec![], SchemaOrigin::Sample).is_verified());
        assert!(Schema::new(vec![], SchemaOrigin::Manual).is_verified());
    }
}
