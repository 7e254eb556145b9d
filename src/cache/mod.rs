//! Filesystem-backed artifact cache
//!
//! The cache directory holds one executable per distinct absolute source path,
//! named after its [`CacheKey`]. There is no index: the slot for a source file
//! is found again by recomputing its key. Fresh builds are written into a
//! scratch directory inside the cache and renamed onto the slot, so a
//! concurrent reader never observes a half-written artifact.

pub mod key;
pub mod staleness;

pub use key::{derive_key, CacheKey};
pub use staleness::{is_stale, Staleness};

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::GrunError;

/// Prefix of scratch directories used while a build runs
pub const SCRATCH_PREFIX: &str = ".grun-build-";

#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    /// Open the cache at `root`, creating it (and its parents) if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, GrunError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| GrunError::CacheDir {
            path: root.clone(),
            source: e,
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Slot path of the artifact for `key`
    pub fn artifact_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Create a scratch directory for a build; removed when dropped
    pub fn scratch(&self) -> Result<TempDir, GrunError> {
        tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(&self.root)
            .map_err(|e| GrunError::CacheDir {
                path: self.root.clone(),
                source: e,
            })
    }

    /// Move a freshly built artifact onto its slot, replacing any previous one
    pub fn install(&self, built: &Path, key: &CacheKey) -> Result<PathBuf, GrunError> {
        let target = self.artifact_path(key);
        fs::rename(built, &target).map_err(|e| GrunError::Install {
            path: target.clone(),
            source: e,
        })?;

        debug!(operation = "cache.install", key = %key, path = %target.display(), "artifact installed");
        Ok(target)
    }
}
