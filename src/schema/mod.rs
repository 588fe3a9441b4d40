pub mod ddl;
pub mod tables;
pub mod types;

pub use tables::{get_table, table_names, DEST_TABLES};
pub use types::{ColumnDef, ColumnType, TableDef};
