//! The destination storage sink.
//!
//! The pipeline only needs three primitives: truncate, batch insert, and
//! batch upsert. `SqliteSink` is the production implementation; `MemorySink`
//! records the operation stream for tests and dry runs.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::mapping::{Row, SqlValue};
use crate::schema::ddl::{generate_create_table, generate_indexes};
use crate::schema::{get_table, TableDef, DEST_TABLES};

/// Atomic write primitives the orchestrator drives in a fixed order.
pub trait Sink {
    fn truncate(&mut self, table: &str) -> Result<()>;
    fn insert_batch(&mut self, table: &str, rows: &[Row]) -> Result<()>;
    fn upsert_batch(&mut self, table: &str, rows: &[Row], key: &str) -> Result<()>;
}

fn sink_err(table: &str) -> impl Fn(rusqlite::Error) -> Error + '_ {
    move |e| Error::SinkWrite {
        table: table.to_string(),
        message: e.to_string(),
    }
}

fn bind(value: &SqlValue, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
    match value {
        SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null),
        SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i),
        SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f),
        SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str()),
        SqlValue::Boolean(b) => stmt.raw_bind_parameter(idx, b),
    }
}

/// SQLite-backed sink. Creates the full destination schema on open and keeps
/// the installed-version token in a one-row `sde_version` table.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(sink_err("database"))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(sink_err("database"))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )
        .map_err(sink_err("database"))?;

        for table in DEST_TABLES {
            conn.execute(&generate_create_table(table), [])
                .map_err(sink_err(table.name))?;
            for index_sql in generate_indexes(table) {
                conn.execute(&index_sql, []).map_err(sink_err(table.name))?;
            }
        }

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sde_version (version TEXT NOT NULL)",
            [],
        )
        .map_err(sink_err("sde_version"))?;

        Ok(Self { conn })
    }

    /// The installed-version token, e.g. `sde-3142455`, if any import has
    /// completed against this database.
    pub fn installed_version(&self) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT version FROM sde_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(sink_err("sde_version")(other)),
            })
    }

    pub fn set_installed_version(&self, version: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM sde_version", [])
            .and_then(|_| {
                self.conn
                    .execute("INSERT INTO sde_version (version) VALUES (?1)", [version])
            })
            .map(|_| ())
            .map_err(sink_err("sde_version"))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn table_def(table: &str) -> Result<&'static TableDef> {
        get_table(table).ok_or_else(|| Error::SinkWrite {
            table: table.to_string(),
            message: "unknown destination table".to_string(),
        })
    }

    fn write_batch(&mut self, table: &str, rows: &[Row], sql: &str) -> Result<()> {
        let def = Self::table_def(table)?;
        let tx = self.conn.transaction().map_err(sink_err(table))?;
        {
            let mut stmt = tx.prepare_cached(sql).map_err(sink_err(table))?;
            for row in rows {
                for (idx, col) in def.columns.iter().enumerate() {
                    let value = row.get(col.name).unwrap_or(&SqlValue::Null);
                    bind(value, idx + 1, &mut stmt).map_err(sink_err(table))?;
                }
                stmt.raw_execute().map_err(sink_err(table))?;
            }
        }
        tx.commit().map_err(sink_err(table))
    }

    fn insert_sql(def: &TableDef) -> String {
        let columns = def.column_names();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            def.name,
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    fn upsert_sql(def: &TableDef, key: &str) -> String {
        // COALESCE keeps a column's existing value when the incoming row has
        // null there, so later merge contributors never erase fields written
        // by earlier ones for the same key.
        let updates: Vec<String> = def
            .column_names()
            .into_iter()
            .filter(|col| *col != key)
            .map(|col| format!("{} = COALESCE(excluded.{}, {})", col, col, col))
            .collect();
        format!(
            "{} ON CONFLICT({}) DO UPDATE SET {}",
            Self::insert_sql(def),
            key,
            updates.join(", ")
        )
    }
}

impl Sink for SqliteSink {
    fn truncate(&mut self, table: &str) -> Result<()> {
        Self::table_def(table)?;
        self.conn
            .execute(&format!("DELETE FROM {}", table), [])
            .map(|_| ())
            .map_err(sink_err(table))
    }

    fn insert_batch(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        let sql = Self::insert_sql(Self::table_def(table)?);
        self.write_batch(table, rows, &sql)
    }

    fn upsert_batch(&mut self, table: &str, rows: &[Row], key: &str) -> Result<()> {
        let sql = Self::upsert_sql(Self::table_def(table)?, key);
        self.write_batch(table, rows, &sql)
    }
}

/// One recorded sink operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    Truncate(String),
    Insert { table: String, rows: usize },
    Upsert {
        table: String,
        rows: usize,
        key: String,
    },
}

/// Recording sink: keeps every row in memory and logs the operation stream.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub ops: Vec<SinkOp>,
    pub rows: Vec<(String, Row)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_for(&self, table: &str) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, row)| row)
            .collect()
    }
}

impl Sink for MemorySink {
    fn truncate(&mut self, table: &str) -> Result<()> {
        self.ops.push(SinkOp::Truncate(table.to_string()));
        self.rows.retain(|(t, _)| t != table);
        Ok(())
    }

    fn insert_batch(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        self.ops.push(SinkOp::Insert {
            table: table.to_string(),
            rows: rows.len(),
        });
        self.rows
            .extend(rows.iter().map(|row| (table.to_string(), row.clone())));
        Ok(())
    }

    fn upsert_batch(&mut self, table: &str, rows: &[Row], key: &str) -> Result<()> {
        self.ops.push(SinkOp::Upsert {
            table: table.to_string(),
            rows: rows.len(),
            key: key.to_string(),
        });
        for row in rows {
            let id = row.get(key).cloned();
            self.rows
                .retain(|(t, existing)| t != table || existing.get(key).cloned() != id);
            self.rows.push((table.to_string(), row.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_row(item_id: i64, name: Option<&str>, x: Option<f64>) -> Row {
        Row::new()
            .with("itemID", SqlValue::Integer(item_id))
            .with(
                "itemName",
                name.map(|n| SqlValue::Text(n.to_string()))
                    .unwrap_or(SqlValue::Null),
            )
            .with(
                "x",
                x.map(SqlValue::Real).unwrap_or(SqlValue::Null),
            )
    }

    #[test]
    fn test_insert_and_truncate() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        sink.insert_batch("mapDenormalize", &[region_row(1, Some("A"), None)])
            .unwrap();

        let count: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM mapDenormalize", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);

        sink.truncate("mapDenormalize").unwrap();
        let count: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM mapDenormalize", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_upsert_keeps_earlier_fields_on_null() {
        let mut sink = SqliteSink::open_in_memory().unwrap();

        sink.upsert_batch(
            "mapDenormalize",
            &[region_row(1, Some("The Forge"), None)],
            "itemID",
        )
        .unwrap();

        // Second pass for the same key: name absent, coordinate present.
        sink.upsert_batch(
            "mapDenormalize",
            &[region_row(1, None, Some(4.5))],
            "itemID",
        )
        .unwrap();

        let (name, x): (String, f64) = sink
            .connection()
            .query_row(
                "SELECT itemName, x FROM mapDenormalize WHERE itemID = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(name, "The Forge");
        assert_eq!(x, 4.5);

        let count: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM mapDenormalize", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_unknown_table_is_a_sink_error() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        assert!(matches!(
            sink.truncate("noSuchTable"),
            Err(Error::SinkWrite { .. })
        ));
    }

    #[test]
    fn test_installed_version_round_trip() {
        let sink = SqliteSink::open_in_memory().unwrap();
        assert_eq!(sink.installed_version().unwrap(), None);

        sink.set_installed_version("sde-3142455").unwrap();
        assert_eq!(
            sink.installed_version().unwrap(),
            Some("sde-3142455".to_string())
        );

        sink.set_installed_version("sde-3142456").unwrap();
        assert_eq!(
            sink.installed_version().unwrap(),
            Some("sde-3142456".to_string())
        );
    }
}
