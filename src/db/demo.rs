use anyhow::Result;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::db::ColumnInfo;
use crate::schema::{Column, Schema, SchemaOrigin, Table};

/// Bundled demo dataset: a small in-memory SQLite database seeded once at
/// startup. All access after seeding is read-only SELECTs; engine errors
/// (bad syntax, unknown table or column) surface verbatim to the caller.
pub struct DemoDatabase {
    conn: Connection,
}

// Convert a single SQLite value to display text.
fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "(NULL)".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl DemoDatabase {
    pub fn open() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = DemoDatabase { conn };
        db.seed()?;
        Ok(db)
    }

    fn seed(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE employees (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                department TEXT,
                salary INTEGER,
                hire_date DATE,
                age INTEGER
            );
            CREATE TABLE products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT,
                price REAL,
                stock_quantity INTEGER,
                supplier_id INTEGER
            );
            CREATE TABLE sales (
                id INTEGER PRIMARY KEY,
                product_id INTEGER,
                employee_id INTEGER,
                quantity INTEGER,
                sale_date DATE,
                total_amount REAL,
                FOREIGN KEY (product_id) REFERENCES products(id),
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            );

            INSERT INTO employees (id, name, department, salary, hire_date, age) VALUES
                (1, 'John Doe', 'Engineering', 75000, '2022-01-15', 30),
                (2, 'Jane Smith', 'Marketing', 65000, '2021-03-20', 28),
                (3, 'Bob Johnson', 'Sales', 55000, '2023-06-10', 35),
                (4, 'Alice Brown', 'Engineering', 80000, '2020-11-05', 32),
                (5, 'Charlie Wilson', 'HR', 60000, '2022-08-15', 29),
                (6, 'Diana Davis', 'Sales', 58000, '2021-12-01', 31),
                (7, 'Eva Garcia', 'Engineering', 85000, '2019-04-12', 34),
                (8, 'Frank Miller', 'Marketing', 62000, '2023-01-30', 27);

            INSERT INTO products (id, name, category, price, stock_quantity, supplier_id) VALUES
                (1, 'Laptop Pro', 'Electronics', 1299.99, 50, 1),
                (2, 'Wireless Mouse', 'Electronics', 29.99, 200, 1),
                (3, 'Office Chair', 'Furniture', 249.99, 30, 2),
                (4, 'Standing Desk', 'Furniture', 399.99, 15, 2),
                (5, 'Monitor 27\"', 'Electronics', 299.99, 75, 1),
                (6, 'Keyboard Mechanical', 'Electronics', 89.99, 100, 1),
                (7, 'Desk Lamp', 'Furniture', 49.99, 80, 2),
                (8, 'Webcam HD', 'Electronics', 79.99, 60, 1);

            INSERT INTO sales (id, product_id, employee_id, quantity, sale_date, total_amount) VALUES
                (1, 1, 3, 2, '2024-01-15', 2599.98),
                (2, 2, 3, 5, '2024-01-16', 149.95),
                (3, 3, 6, 1, '2024-01-20', 249.99),
                (4, 5, 3, 3, '2024-02-01', 899.97),
                (5, 6, 6, 2, '2024-02-05', 179.98),
                (6, 1, 3, 1, '2024-02-10', 1299.99),
                (7, 7, 6, 4, '2024-02-15', 199.96),
                (8, 8, 3, 2, '2024-02-20', 159.98);",
        )?;
        Ok(())
    }

    /// Run a query and collect the full result set as display strings.
    pub fn execute_query(
        &self,
        sql: &str,
    ) -> Result<(Vec<ColumnInfo>, Vec<Vec<String>>), rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;

        let columns: Vec<ColumnInfo> = stmt
            .columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                data_type: col.decl_type().unwrap_or("").to_string(),
            })
            .collect();
        let column_count = columns.len();

        let mut data = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut out = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                out.push(value_to_string(row.get_ref(idx)?));
            }
            data.push(out);
        }

        Ok((columns, data))
    }

    /// First few rows of a seeded table, for the sidebar preview.
    pub fn preview(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<(Vec<ColumnInfo>, Vec<Vec<String>>), rusqlite::Error> {
        self.execute_query(&format!("SELECT * FROM {} LIMIT {}", table, limit))
    }

    /// Introspect the seeded tables into a `Schema` for prompt grounding.
    pub fn schema(&self) -> Result<Schema> {
        let mut tables = Vec::new();

        let mut table_stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names: Vec<String> = table_stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;

        for name in names {
            let mut col_stmt = self
                .conn
                .prepare(&format!("PRAGMA table_info({})", name))?;
            let columns: Vec<Column> = col_stmt
                .query_map([], |row| {
                    Ok(Column {
                        name: row.get(1)?,
                        data_type: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<_, _>>()?;
            tables.push(Table { name, columns });
        }

        Ok(Schema::new(tables, SchemaOrigin::Sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_seeded_tables() {
        let db = DemoDatabase::open().unwrap();
        let schema = db.schema().unwrap();
        assert_eq!(schema.table_names(), vec!["employees", "products", "sales"]);
        let employees = &schema.tables[0];
        let cols: Vec<&str> = employees.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cols, vec!["id", "name", "department", "salary", "hire_date", "age"]);
    }

    #[test]
    fn test_engineering_department_scenario() {
        let db = DemoDatabase::open().unwrap();
        let (columns, rows) = db
            .execute_query("SELECT * FROM employees WHERE department = 'Engineering'")
            .unwrap();
        assert_eq!(columns[2].name, "department");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row[2] == "Engineering"));
    }

    #[test]
    fn test_aggregate_query() {
        let db = DemoDatabase::open().unwrap();
        let (columns, rows) = db
            .execute_query("SELECT COUNT(*) AS n FROM products WHERE category = 'Electronics'")
            .unwrap();
        assert_eq!(columns[0].name, "n");
        assert_eq!(rows, vec![vec!["5".to_string()]]);
    }

    #[test]
    fn test_unknown_table_error_surfaces() {
        let db = DemoDatabase::open().unwrap();
        let err = db.execute_query("SELECT * FROM missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_unknown_column_error_surfaces() {
        let db = DemoDatabase::open().unwrap();
        let err = db.execute_query("SELECT nonexistent FROM employees").unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_preview_is_limited() {
        let db = DemoDatabase::open().unwrap();
        let (columns, rows) = db.preview("employees", 5).unwrap();
        assert_eq!(columns[0].name, "id");
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_null_and_blob_rendering() {
        let db = DemoDatabase::open().unwrap();
        let (_, rows) = db
            .execute_query("SELECT NULL, x'0102', 1.5, 'text'")
            .unwrap();
        assert_eq!(rows[0], vec!["(NULL)", "<2 bytes>", "1.5", "text"]);
    }
}
