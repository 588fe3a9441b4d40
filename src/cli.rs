use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eve-sde-import")]
#[command(version, about = "Import the EVE Online SDE into a SeAT-compatible database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the latest SDE version against the installed one
    Check {
        /// SQLite database path
        db: PathBuf,
    },

    /// Download an SDE archive into the data directory
    Download {
        /// Specific build number (defaults to latest)
        #[arg(long)]
        build: Option<u64>,

        /// Re-download even if the archive is already cached
        #[arg(short, long)]
        force: bool,

        /// Custom data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Import SDE data from a downloaded archive into the database
    Install {
        /// SQLite database path
        db: PathBuf,

        /// Specific build number to install (defaults to the first archive
        /// found in the data directory)
        #[arg(long)]
        build: Option<u64>,

        /// Direct path to an SDE archive or a directory holding one
        #[arg(long)]
        path: Option<PathBuf>,

        /// Reinstall even if this version is already installed
        #[arg(short, long)]
        force: bool,

        /// Destination rows per batch write
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Custom data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Check, download, and install in one step
    Update {
        /// SQLite database path
        db: PathBuf,

        /// Update even if already up to date, or downgrade
        #[arg(short, long)]
        force: bool,

        /// Destination rows per batch write
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Custom data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List all supported source files and their destination tables
    ListFiles,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
