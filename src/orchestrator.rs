//! Invocation sequencing
//!
//! One invocation walks `Start → KeyDerived → StalenessChecked → [Built] →
//! Ran`. Any failure ends the invocation with the error of the step that
//! failed; nothing is retried.
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::build::{Builder, Toolchain};
use crate::cache::{staleness, CacheDir, CacheKey, Staleness};
use crate::config::Settings;
use crate::error::GrunError;
use crate::runner;

/// Step of an invocation, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    KeyDerived,
    StalenessChecked,
    Built,
    Ran,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::KeyDerived => "key_derived",
            Stage::StalenessChecked => "staleness_checked",
            Stage::Built => "built",
            Stage::Ran => "ran",
        };
        f.write_str(name)
    }
}

/// Result of a completed invocation
#[derive(Debug, Clone)]
pub struct Outcome {
    pub key: CacheKey,
    pub artifact: PathBuf,
    pub staleness: Staleness,
    /// Exit code of the compiled program
    pub exit_code: i32,
}

impl Outcome {
    /// Whether the toolchain ran during this invocation
    pub fn rebuilt(&self) -> bool {
        self.staleness.is_stale()
    }
}

pub struct Orchestrator {
    cache: CacheDir,
    builder: Builder,
}

impl Orchestrator {
    /// Open the cache directory and prepare the toolchain
    pub fn new(cache_dir: &Path, toolchain: Toolchain) -> Result<Self, GrunError> {
        let cache = CacheDir::open(cache_dir)?;
        debug!(stage = %Stage::Start, cache_dir = %cache.root().display(), "cache directory ready");

        Ok(Self {
            cache,
            builder: Builder::new(toolchain),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GrunError> {
        Self::new(&settings.cache_dir, Toolchain::resolve(&settings.toolchain))
    }

    pub fn cache(&self) -> &CacheDir {
        &self.cache
    }

    /// Make sure an up-to-date artifact exists for `source`
    ///
    /// Returns the key, the artifact path and the staleness verdict that was
    /// acted upon.
    pub fn prepare(&self, source: &Path) -> Result<(CacheKey, PathBuf, Staleness), GrunError> {
        let key = CacheKey::derive(source)?;
        let artifact = self.cache.artifact_path(&key);
        debug!(stage = %Stage::KeyDerived, key = %key, artifact = %artifact.display(), "cache key derived");

        let verdict = staleness::check(key.source(), &artifact)?;
        debug!(stage = %Stage::StalenessChecked, key = %key, reason = verdict.reason(), "staleness checked");

        if verdict.is_stale() {
            info!(
                operation = "cache.get",
                status = "miss",
                key = %key,
                reason = verdict.reason(),
                "cache miss"
            );

            let scratch = self.cache.scratch()?;
            let output = scratch.path().join(key.file_name());
            self.builder.build(&key, &output)?;
            self.cache.install(&output, &key)?;

            debug!(stage = %Stage::Built, key = %key, "artifact rebuilt");
        } else {
            info!(operation = "cache.get", status = "hit", key = %key, "cache hit");
        }

        Ok((key, artifact, verdict))
    }

    /// Build if needed, then run the artifact with `args`
    pub fn execute(&self, source: &Path, args: &[OsString]) -> Result<Outcome, GrunError> {
        let (key, artifact, staleness) = self.prepare(source)?;

        let exit_code = runner::run(&artifact, args)?;
        debug!(stage = %Stage::Ran, key = %key, exit_code, "invocation finished");

        Ok(Outcome {
            key,
            artifact,
            staleness,
            exit_code,
        })
    }
}
