pub mod orchestrator;
pub mod plan;
pub mod sink;

pub use orchestrator::{RunReport, SdeImporter};
pub use plan::{ImportPlan, PlannedFile};
pub use sink::{MemorySink, Sink, SinkOp, SqliteSink};
