/// Staleness decisions for cached artifacts
///
/// An artifact is stale when it is missing, or when the source file or one of
/// its dependency manifests was modified strictly after it. Equal timestamps
/// count as fresh.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::GrunError;
use crate::manifest::DependencyManifest;

/// Why an artifact must (or need not) be rebuilt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    /// No artifact in the cache slot
    Missing,
    /// Source file is newer than the artifact
    SourceModified,
    /// A manifest file is newer than the artifact
    ManifestModified(PathBuf),
    Fresh,
}

impl Staleness {
    pub fn is_stale(&self) -> bool {
        !matches!(self, Staleness::Fresh)
    }

    /// Short label used in logs
    pub fn reason(&self) -> &'static str {
        match self {
            Staleness::Missing => "missing",
            Staleness::SourceModified => "source_modified",
            Staleness::ManifestModified(_) => "manifest_modified",
            Staleness::Fresh => "fresh",
        }
    }
}

/// Decide whether `artifact` still reflects `source`
pub fn check(source: &Path, artifact: &Path) -> Result<Staleness, GrunError> {
    let artifact_time = match modified_if_exists(artifact)? {
        Some(time) => time,
        None => return Ok(Staleness::Missing),
    };

    let source_time = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| stat_error(source, e))?;

    if source_time > artifact_time {
        return Ok(Staleness::SourceModified);
    }

    let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let manifest = DependencyManifest::for_dir(source_dir);

    for file in manifest.files() {
        if let Some(time) = modified_if_exists(file)? {
            if time > artifact_time {
                return Ok(Staleness::ManifestModified(file.to_path_buf()));
            }
        }
    }

    Ok(Staleness::Fresh)
}

/// Whether `artifact` needs to be rebuilt from `source`
pub fn is_stale(source: &Path, artifact: &Path) -> Result<bool, GrunError> {
    check(source, artifact).map(|s| s.is_stale())
}

/// Modification time of `path`, or `None` when it does not exist
fn modified_if_exists(path: &Path) -> Result<Option<SystemTime>, GrunError> {
    match fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some).map_err(|e| stat_error(path, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(stat_error(path, e)),
    }
}

fn stat_error(path: &Path, source: io::Error) -> GrunError {
    GrunError::StalenessCheck {
        path: path.to_path_buf(),
        source,
    }
}
