use crate::schema::{Column, Schema, SchemaOrigin, Table};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("no tables found in schema text")]
    NoTables,
}

const CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY", "FOREIGN", "UNIQUE", "CONSTRAINT", "CHECK", "KEY", "INDEX", "REFERENCES",
];

/// Parse user-supplied or model-emitted schema text into a `Schema`.
///
/// Two formats are accepted: SQL DDL (`CREATE TABLE ...`) and the outline
/// form this app itself emits (`Table: name` followed by `  - col: TYPE`
/// lines). Matching is loose keyword scanning, not a grammar; anything that
/// does not yield at least one table with one column is an error.
pub fn parse_schema_text(text: &str, origin: SchemaOrigin) -> Result<Schema, ParseError> {
    let tables = if text.to_uppercase().contains("CREATE TABLE") {
        parse_ddl(text)
    } else {
        parse_outline(text)
    };

    let tables: Vec<Table> = tables.into_iter().filter(|t| !t.columns.is_empty()).collect();
    if tables.is_empty() {
        return Err(ParseError::NoTables);
    }
    Ok(Schema::new(tables, origin))
}

fn parse_ddl(text: &str) -> Vec<Table> {
    let mut tables: Vec<Table> = Vec::new();
    let mut current: Option<Table> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }

        let upper = line.to_uppercase();
        if upper.starts_with("CREATE TABLE") {
            if let Some(table) = current.take() {
                tables.push(table);
            }
            if let Some(name) = ddl_table_name(line) {
                current = Some(Table { name, columns: Vec::new() });
            }
            continue;
        }

        if line.starts_with(')') {
            if let Some(table) = current.take() {
                tables.push(table);
            }
            continue;
        }
        if let Some(table) = &mut current {
            if let Some(column) = ddl_column(line) {
                table.columns.push(column);
            }
        }
    }

    if let Some(table) = current {
        tables.push(table);
    }
    tables
}

/// Table name is the first identifier after `CREATE TABLE`, with an optional
/// `IF NOT EXISTS` in between and optional quoting.
fn ddl_table_name(line: &str) -> Option<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let mut idx = 2;
    if words.len() > idx + 2 && words[idx].eq_ignore_ascii_case("if") {
        idx += 3; // IF NOT EXISTS
    }
    let raw = words.get(idx)?;
    let name: String = raw
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn ddl_column(line: &str) -> Option<Column> {
    let trimmed = line.trim_start_matches('(').trim();
    let mut words = trimmed.split_whitespace();
    let name = words.next()?.trim_matches(|c| c == '`' || c == '"');
    let data_type = words.next()?.trim_end_matches(',');

    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    if CONSTRAINT_KEYWORDS.contains(&name.to_uppercase().as_str()) {
        return None;
    }
    Some(Column {
        name: name.to_string(),
        data_type: data_type.trim_end_matches(',').to_string(),
    })
}

fn parse_outline(text: &str) -> Vec<Table> {
    let mut tables: Vec<Table> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("table")) {
            // "Table: users", "table users"
            let rest = line[5..].trim_start().trim_start_matches(':').trim_start();
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                tables.push(Table { name, columns: Vec::new() });
            }
            continue;
        }

        // "  - id: INTEGER (PRIMARY KEY)" or "id: INTEGER"
        if let Some(table) = tables.last_mut() {
            let body = line.trim_start_matches('-').trim();
            if let Some((name, data_type)) = body.split_once(':') {
                let name = name.trim();
                let data_type = data_type.trim();
                // Drop trailing constraint annotations: "INTEGER (PRIMARY KEY)"
                let data_type = data_type.split('(').next().unwrap_or(data_type).trim();
                if !name.is_empty()
                    && name.chars().all(|c| c.is_alphanumeric() || c == '_')
                    && !data_type.is_empty()
                {
                    table.columns.push(Column {
                        name: name.to_string(),
                        data_type: data_type.to_string(),
                    });
                }
            }
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outline_format() {
        let text = "Table: employees\n  - id: INTEGER\n  - name: TEXT\n\nTable: sales\n  - id: INTEGER\n  - total: DECIMAL";
        let schema = parse_schema_text(text, SchemaOrigin::Manual).unwrap();
        assert_eq!(schema.table_names(), vec!["employees", "sales"]);
        assert_eq!(schema.tables[0].columns.len(), 2);
        assert_eq!(schema.tables[1].columns[1].name, "total");
    }

    #[test]
    fn test_parse_outline_drops_constraint_annotations() {
        let text = "Table: users\n  - user_id: INTEGER (PRIMARY KEY)\n  - email: VARCHAR(100) (NOT NULL)";
        let schema = parse_schema_text(text, SchemaOrigin::Manual).unwrap();
        assert_eq!(schema.tables[0].columns[0].data_type, "INTEGER");
        assert_eq!(schema.tables[0].columns[1].name, "email");
    }

    #[test]
    fn test_parse_ddl() {
        let ddl = "CREATE TABLE employees (\n  id INTEGER PRIMARY KEY,\n  name TEXT NOT NULL,\n  salary INTEGER,\n  FOREIGN KEY (dept_id) REFERENCES departments(id)\n);";
        let schema = parse_schema_text(ddl, SchemaOrigin::Manual).unwrap();
        assert_eq!(schema.table_names(), vec!["employees"]);
        let names: Vec<&str> = schema.tables[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "salary"]);
    }

    #[test]
    fn test_parse_ddl_if_not_exists_and_multiple_tables() {
        let ddl = "CREATE TABLE IF NOT EXISTS a (\n x INTEGER\n);\nCREATE TABLE b (\n y TEXT\n);";
        let schema = parse_schema_text(ddl, SchemaOrigin::Manual).unwrap();
        assert_eq!(schema.table_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_rejects_text_with_no_tables() {
        assert!(parse_schema_text("just some prose", SchemaOrigin::Manual).is_err());
        assert!(parse_schema_text("", SchemaOrigin::Manual).is_err());
    }

    #[test]
    fn test_parse_rejects_table_without_columns() {
        let err = parse_schema_text("Table: empty", SchemaOrigin::Manual);
        assert!(err.is_err());
    }

    #[test]
    fn test_prompt_text_round_trip() {
        let text = "Table: products\n  - id: INTEGER\n  - price: DECIMAL\n";
        let schema = parse_schema_text(text, SchemaOrigin::Manual).unwrap();
        let reparsed = parse_schema_text(&schema.to_prompt_text(), SchemaOrigin::Manual).unwrap();
        assert_eq!(schema.tables, reparsed.tables);
    }
}
