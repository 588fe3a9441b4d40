use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Manages downloaded archives in the data directory, one zip per build.
pub struct CacheManager {
    data_dir: PathBuf,
}

impl CacheManager {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the archive for a given build.
    pub fn zip_path(&self, build_number: u64) -> PathBuf {
        self.data_dir
            .join(format!("eve-online-static-data-{}-jsonl.zip", build_number))
    }

    /// Whether the archive for a build is already on disk.
    pub fn is_cached(&self, build_number: u64) -> bool {
        self.zip_path(build_number).is_file()
    }

    /// Remove archives of other builds, keeping only the given one.
    pub fn cleanup_old_builds(&self, keep_build: u64) -> Result<()> {
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if let Some(build) = parse_build_from_zip_name(&path) {
                if build != keep_build {
                    fs::remove_file(&path).ok();
                }
            }
        }
        Ok(())
    }
}

fn parse_build_from_zip_name(path: &Path) -> Option<u64> {
    path.file_name()
        .and_then(|n| n.to_str())?
        .strip_prefix("eve-online-static-data-")?
        .strip_suffix("-jsonl.zip")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_path_naming() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        let path = cache.zip_path(3142455);
        assert_eq!(
            path.file_name().unwrap(),
            "eve-online-static-data-3142455-jsonl.zip"
        );
        assert!(!cache.is_cached(3142455));
    }

    #[test]
    fn test_cleanup_keeps_current_build() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        fs::write(cache.zip_path(100), b"old").unwrap();
        fs::write(cache.zip_path(200), b"current").unwrap();
        fs::write(dir.path().join("unrelated.txt"), b"keep").unwrap();

        cache.cleanup_old_builds(200).unwrap();

        assert!(!cache.is_cached(100));
        assert!(cache.is_cached(200));
        assert!(dir.path().join("unrelated.txt").exists());
    }
}
