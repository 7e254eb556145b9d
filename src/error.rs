//! Error taxonomy for a single grun invocation.
//!
//! Every variant is fatal to the invocation and maps to exit code 1. A nonzero
//! exit from the compiled program itself is not an error: it is returned as the
//! program's exit code by the runner.
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Exit code used for every internal failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum GrunError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot resolve '{}': {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create cache directory '{}': {source}", .path.display())]
    CacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot check modification time of '{}': {source}", .path.display())]
    StalenessCheck {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot prepare '{}' for compilation: {source}", .path.display())]
    Directive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot run toolchain '{program}': {source}")]
    Toolchain {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Build(BuildFailure),

    #[error("cannot install artifact at '{}': {source}", .path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot execute '{}': {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl GrunError {
    /// Exit code the invocation terminates with when this error surfaces.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

/// A compiler run that completed with a failure status.
///
/// Carries the raw diagnostics and enough context for the presentation layer
/// to decide whether a remediation hint applies.
#[derive(Debug, Clone)]
pub struct BuildFailure {
    pub status: ExitStatus,
    /// Raw compiler stderr, unmodified.
    pub diagnostics: String,
    /// Whether a module descriptor sat next to the source file.
    pub manifest_present: bool,
    /// Directory containing the source file.
    pub source_dir: PathBuf,
}

impl std::fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "build failed: {}", self.status)?;
        let diagnostics = self.diagnostics.trim_end();
        if !diagnostics.is_empty() {
            write!(f, "\n{}", diagnostics)?;
        }
        Ok(())
    }
}
