//! Random access to the SDE zip container.
//!
//! Members are staged to scoped temporary files before streaming; the temp
//! file is removed when the handle drops, on every exit path. Virtual member
//! names of the form `base:suffix.jsonl` are an orchestrator convention and
//! never reach this module.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Open handle on an SDE archive.
pub struct SdeArchive {
    archive: ZipArchive<BufReader<File>>,
    path: PathBuf,
}

impl SdeArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| Error::ArchiveUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            archive,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List member names ending with the given suffix, in archive order.
    pub fn list_members(&self, suffix: &str) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| name.ends_with(suffix))
            .map(|name| name.to_string())
            .collect()
    }

    /// Read a whole member into a string. Intended for the small metadata
    /// member; data members go through `stage_member` instead.
    pub fn read_member_string(&mut self, name: &str) -> Result<String> {
        let mut member = self.member(name)?;
        let mut contents = String::new();
        member.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Extract a member to a scoped temporary file and return the handle.
    /// The file is deleted when the returned handle is dropped.
    pub fn stage_member(&mut self, name: &str) -> Result<NamedTempFile> {
        let mut staged = NamedTempFile::new()?;
        {
            let mut member = self.member(name)?;
            io::copy(&mut member, &mut staged)?;
        }
        staged.as_file_mut().seek(SeekFrom::Start(0))?;
        Ok(staged)
    }

    fn member(&mut self, name: &str) -> Result<zip::read::ZipFile<'_>> {
        let path = self.path.clone();
        self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::MemberNotFound(name.to_string()),
            other => Error::ArchiveUnreadable {
                path,
                message: other.to_string(),
            },
        })
    }
}

/// Resolve the archive to import from: a direct `.zip` path, or the first
/// `.zip` file (sorted by name) inside a directory.
pub fn find_archive(data_path: &Path) -> Result<PathBuf> {
    if data_path.is_dir() {
        let mut zips: Vec<PathBuf> = fs::read_dir(data_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "zip"))
            .collect();
        zips.sort();

        return zips
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoArchiveFound(data_path.to_path_buf()));
    }

    if data_path.is_file() {
        Ok(data_path.to_path_buf())
    } else {
        Err(Error::NoArchiveFound(data_path.to_path_buf()))
    }
}
