//! SDE version metadata.
//!
//! The archive carries one well-known member, `_sde.jsonl`, holding a single
//! JSON line with at least `buildNumber` and `releaseDate`. The synthesized
//! `sde-<build>` token is the canonical installed-version string; build
//! comparison against the remote metadata endpoint goes through it.

use std::path::Path;

use serde_json::Value;

use crate::archive::{find_archive, SdeArchive};
use crate::error::{Error, Result};

/// Name of the metadata member inside the archive.
pub const VERSION_MEMBER: &str = "_sde.jsonl";

const VERSION_PREFIX: &str = "sde-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdeVersion {
    /// Canonical token, e.g. `sde-3142455`.
    pub version: String,
    pub build_number: u64,
    /// Date portion only, e.g. `2024-12-10`.
    pub release_date: String,
}

/// Read the dataset version from an archive path or a directory holding one.
pub fn read_version(data_path: &Path) -> Result<SdeVersion> {
    let archive_path = find_archive(data_path)?;
    let mut archive = SdeArchive::open(&archive_path)?;

    let contents = archive.read_member_string(VERSION_MEMBER).map_err(|e| match e {
        Error::MemberNotFound(name) => {
            Error::VersionUnreadable(format!("{} missing from archive", name))
        }
        other => other,
    })?;

    let line = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::VersionUnreadable(format!("{} is empty", VERSION_MEMBER)))?;

    parse_version_line(line)
}

fn parse_version_line(line: &str) -> Result<SdeVersion> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| Error::VersionUnreadable(format!("invalid JSON in {}: {}", VERSION_MEMBER, e)))?;

    let build_number = value
        .get("buildNumber")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::VersionUnreadable("missing buildNumber field".to_string()))?;

    let release_date = value
        .get("releaseDate")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(SdeVersion {
        version: format!("{}{}", VERSION_PREFIX, build_number),
        build_number,
        release_date,
    })
}

/// Parse a build number out of an installed-version token like `sde-3142455`.
pub fn extract_build_number(version: &str) -> Option<u64> {
    version.strip_prefix(VERSION_PREFIX)?.parse().ok()
}

/// Relation of the installed version to the latest published build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    NotInstalled,
    UpToDate,
    UpdateAvailable,
    NewerThanLatest,
}

impl VersionStatus {
    pub fn compare(installed: Option<&str>, latest_build: u64) -> Self {
        match installed.and_then(extract_build_number) {
            None => VersionStatus::NotInstalled,
            Some(build) if build == latest_build => VersionStatus::UpToDate,
            Some(build) if build < latest_build => VersionStatus::UpdateAvailable,
            Some(_) => VersionStatus::NewerThanLatest,
        }
    }

    pub fn update_available(self) -> bool {
        matches!(
            self,
            VersionStatus::NotInstalled | VersionStatus::UpdateAvailable
        )
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VersionStatus::NotInstalled => "not_installed",
            VersionStatus::UpToDate => "up_to_date",
            VersionStatus::UpdateAvailable => "update_available",
            VersionStatus::NewerThanLatest => "newer_than_latest",
        };
        f.write_str(s)
    }
}
