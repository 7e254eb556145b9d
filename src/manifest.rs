//! Dependency manifest detection
//!
//! A Go source file may live next to a module descriptor (`go.mod`) and its
//! checksum file (`go.sum`). Their modification times take part in staleness
//! decisions and the descriptor switches the build to module-aware mode. They
//! are never part of the cache key.
use std::path::{Path, PathBuf};

/// Module descriptor file name
pub const MODULE_DESCRIPTOR: &str = "go.mod";

/// Module checksum (lock) file name
pub const MODULE_LOCK: &str = "go.sum";

/// Manifest files colocated with a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyManifest {
    descriptor: PathBuf,
    lock: PathBuf,
}

impl DependencyManifest {
    /// Manifest locations for sources living in `dir`
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            descriptor: dir.join(MODULE_DESCRIPTOR),
            lock: dir.join(MODULE_LOCK),
        }
    }

    pub fn descriptor(&self) -> &Path {
        &self.descriptor
    }

    pub fn lock(&self) -> &Path {
        &self.lock
    }

    /// All manifest paths whose timestamps matter, present or not
    pub fn files(&self) -> [&Path; 2] {
        [&self.descriptor, &self.lock]
    }

    /// Whether the module descriptor exists, which selects module-aware builds
    pub fn is_present(&self) -> bool {
        self.descriptor.exists()
    }
}
