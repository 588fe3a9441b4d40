pub mod jsonl;
pub mod version;

pub use jsonl::{JsonlReader, Record};
pub use version::{read_version, SdeVersion, VersionStatus};
