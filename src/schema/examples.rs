/// Predefined schema examples for the manual editor, selectable as starting
/// points instead of typing a schema from scratch.
pub fn example_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "E-commerce",
            "Table: users\n  - user_id: INTEGER\n  - username: VARCHAR\n  - email: VARCHAR\n  - created_at: TIMESTAMP\n  - status: VARCHAR\n\nTable: products\n  - product_id: INTEGER\n  - name: VARCHAR\n  - description: TEXT\n  - price: DECIMAL\n  - category_id: INTEGER\n  - stock_quantity: INTEGER\n\nTable: orders\n  - order_id: INTEGER\n  - user_id: INTEGER\n  - order_date: TIMESTAMP\n  - total_amount: DECIMAL\n  - status: VARCHAR\n\nTable: order_items\n  - item_id: INTEGER\n  - order_id: INTEGER\n  - product_id: INTEGER\n  - quantity: INTEGER\n  - unit_price: DECIMAL\n",
        ),
        (
            "HR Management",
            "Table: employees\n  - employee_id: INTEGER\n  - first_name: VARCHAR\n  - last_name: VARCHAR\n  - email: VARCHAR\n  - department_id: INTEGER\n  - position: VARCHAR\n  - salary: DECIMAL\n  - hire_date: DATE\n  - manager_id: INTEGER\n\nTable: departments\n  - department_id: INTEGER\n  - department_name: VARCHAR\n  - location: VARCHAR\n  - budget: DECIMAL\n\nTable: projects\n  - project_id: INTEGER\n  - project_name: VARCHAR\n  - start_date: DATE\n  - end_date: DATE\n  - budget: DECIMAL\n  - status: VARCHAR\n\nTable: employee_projects\n  - assignment_id: INTEGER\n  - employee_id: INTEGER\n  - project_id: INTEGER\n  - role: VARCHAR\n  - hours_allocated: INTEGER\n",
        ),
        (
            "Financial System",
            "Table: accounts\n  - account_id: INTEGER\n  - account_number: VARCHAR\n  - account_type: VARCHAR\n  - balance: DECIMAL\n  - customer_id: INTEGER\n  - created_at: TIMESTAMP\n\nTable: customers\n  - customer_id: INTEGER\n  - first_name: VARCHAR\n  - last_name: VARCHAR\n  - email: VARCHAR\n  - phone: VARCHAR\n  - address: TEXT\n  - date_of_birth: DATE\n\nTable: transactions\n  - transaction_id: INTEGER\n  - from_account_id: INTEGER\n  - to_account_id: INTEGER\n  - amount: DECIMAL\n  - transaction_type: VARCHAR\n  - description: TEXT\n  - transaction_date: TIMESTAMP\n  - status: VARCHAR\n",
        ),
    ]
}

/// Example questions shown under the question input. The first set assumes
/// the bundled sample database; the second is generic for custom schemas.
pub fn example_questions(sample_mode: bool) -> &'static [&'static str] {
    if sample_mode {
        &[
            "Show all employees in the Engineering department",
            "What is the average salary by department?",
            "List the top 5 products by price",
            "Show total sales by employee",
            "Find products with stock quantity less than 50",
            "Show employees hired after 2022",
            "List all products in the Electronics category",
        ]
    } else {
        &[
            "Show all records from the main table",
            "Count total number of records",
            "Show top 10 records by value",
            "Group data by category or type",
            "Calculate average values",
            "Find records with specific conditions",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_schema_text, SchemaOrigin};

    #[test]
    fn test_example_schemas_all_parse() {
        for (name, text) in example_schemas() {
            let schema = parse_schema_text(text, SchemaOrigin::Manual)
                .unwrap_or_else(|e| panic!("{} failed to parse: {}", name, e));
            assert!(!schema.is_empty());
        }
    }
}
