pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod import;
pub mod mapping;
pub mod parser;
pub mod schema;
pub mod ui;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
