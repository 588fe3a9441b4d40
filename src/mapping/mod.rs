pub mod engine;
pub mod source;
pub mod value;

pub use engine::{map_default, map_record};
pub use source::{LoadMode, SourceFile};
pub use value::{Row, SqlValue};
