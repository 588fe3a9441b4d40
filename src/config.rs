//! Import configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::import::orchestrator::DEFAULT_CHUNK_SIZE;

/// Runtime configuration for the import pipeline.
///
/// Resolution order for each setting: CLI flag, environment variable,
/// built-in default.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Directory holding downloaded SDE archives, or a direct archive path.
    pub data_path: PathBuf,
    /// Destination rows per batch write.
    pub chunk_size: usize,
}

impl ImportConfig {
    pub fn resolve(data_path: Option<PathBuf>, chunk_size: Option<usize>) -> Result<Self> {
        let data_path = match data_path.or_else(env_data_path) {
            Some(path) => path,
            None => default_data_dir()?,
        };

        let chunk_size = chunk_size
            .or_else(env_chunk_size)
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        Ok(Self {
            data_path,
            chunk_size,
        })
    }
}

fn env_data_path() -> Option<PathBuf> {
    std::env::var_os("EVE_SDE_DATA_PATH").map(PathBuf::from)
}

fn env_chunk_size() -> Option<usize> {
    std::env::var("EVE_SDE_CHUNK_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "eve-sde-import")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("sde"))
}
