use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the import pipeline.
///
/// Discovery errors (`ArchiveUnreadable`, `NoArchiveFound`, `VersionUnreadable`)
/// occur before any destination table is touched. `MalformedRecord` and
/// `SinkWrite` abort the run mid-file; chunks flushed before the failure stay
/// committed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unreadable archive {path}: {message}")]
    ArchiveUnreadable { path: PathBuf, message: String },

    #[error("member not found in archive: {0}")]
    MemberNotFound(String),

    #[error("malformed record in {file} line {line}: {message}")]
    MalformedRecord {
        file: String,
        line: u64,
        message: String,
    },

    #[error("unreadable SDE version metadata: {0}")]
    VersionUnreadable(String),

    #[error("no SDE archive found at {0}")]
    NoArchiveFound(PathBuf),

    #[error("sink write failed on {table}: {message}")]
    SinkWrite { table: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
