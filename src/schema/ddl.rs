//! SQLite DDL generation for the destination schema.

use super::types::{ColumnType, TableDef};

fn sql_type(col_type: ColumnType) -> &'static str {
    match col_type {
        ColumnType::Integer => "INTEGER",
        ColumnType::Real => "REAL",
        ColumnType::Text => "TEXT",
        ColumnType::Boolean => "INTEGER",
    }
}

/// Generate CREATE TABLE SQL for a destination table.
pub fn generate_create_table(table: &TableDef) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", table.name);

    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|col| {
            let pk = if table.key == Some(col.name) {
                " PRIMARY KEY"
            } else {
                ""
            };
            format!("    {} {}{}", col.name, sql_type(col.col_type), pk)
        })
        .collect();

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");
    sql
}

/// Generate CREATE INDEX statements for a destination table.
pub fn generate_indexes(table: &TableDef) -> Vec<String> {
    table
        .indexes
        .iter()
        .map(|col| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                table.name, col, table.name, col
            )
        })
        .collect()
}
