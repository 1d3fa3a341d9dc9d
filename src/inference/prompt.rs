use crate::schema::Schema;

/// Compose the text sent to the inference endpoint for SQL generation.
///
/// Deterministic: the same schema and question always produce the same
/// prompt. Every table name, column name, and the literal question appear
/// exactly once. Callers must not pass an empty schema; the result would be
/// a degenerate prompt the model cannot ground.
pub fn build_sql_prompt(schema: &Schema, question: &str) -> String {
    format!(
        "### Task\n\
         Convert the following natural language question to a SQL query.\n\n\
         ### Database Schema\n\
         {}\n\
         ### Question\n\
         {}\n\n\
         ### Instructions\n\
         - Use the exact table and column names from the schema\n\
         - Generate syntactically correct SQL\n\
         - Use appropriate JOINs when querying multiple tables\n\
         - Include WHERE clauses for filtering when needed\n\n\
         ### SQL Query\n",
        schema.to_prompt_text(),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_schema_text, SchemaOrigin};

    fn demo_schema() -> Schema {
        parse_schema_text(
            "Table: employees\n  - empno: INTEGER\n  - deptcode: TEXT\n\nTable: payroll\n  - empno: INTEGER\n  - gross: DECIMAL",
            SchemaOrigin::Manual,
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_contains_question_exactly_once() {
        let question = "who earns the most in accounting?";
        let prompt = build_sql_prompt(&demo_schema(), question);
        assert_eq!(prompt.matches(question).count(), 1);
    }

    #[test]
    fn test_prompt_contains_every_table_and_column_once() {
        let schema = demo_schema();
        let prompt = build_sql_prompt(&schema, "a question");
        for table in &schema.tables {
            assert_eq!(prompt.matches(&format!("Table: {}", table.name)).count(), 1);
        }
        // empno appears in two tables, once per listing
        assert_eq!(prompt.matches("empno").count(), 2);
        assert_eq!(prompt.matches("deptcode").count(), 1);
        assert_eq!(prompt.matches("gross").count(), 1);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let schema = demo_schema();
        assert_eq!(
            build_sql_prompt(&schema, "q"),
            build_sql_prompt(&schema, "q")
        );
    }
}
