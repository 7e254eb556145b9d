//! Compilation strategy selection
//!
//! The builder decides *how* to compile a source file, then hands the work to
//! the external toolchain:
//!
//! | Directive | `go.mod` | Compiled unit                              |
//! |-----------|----------|--------------------------------------------|
//! | no        | no       | the source file                            |
//! | yes       | no       | a stripped temp copy                       |
//! | no        | yes      | the package in the source directory        |
//! | yes       | yes      | a stripped temp copy, from the source dir  |

pub mod directive;
pub mod toolchain;

pub use directive::{has_directive, strip_directive, StrippedSource};
pub use toolchain::{Toolchain, DEFAULT_TOOLCHAIN};

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cache::CacheKey;
use crate::error::{BuildFailure, GrunError};
use crate::manifest::DependencyManifest;

/// What gets passed to the toolchain
#[derive(Debug)]
pub enum CompilationUnit {
    /// The source file itself
    Source(PathBuf),
    /// A copy without the directive line, removed on drop
    Stripped(StrippedSource),
    /// The whole package in the working directory
    Package,
}

impl CompilationUnit {
    /// Path argument for the toolchain, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            CompilationUnit::Source(path) => Some(path),
            CompilationUnit::Stripped(stripped) => Some(stripped.path()),
            CompilationUnit::Package => None,
        }
    }
}

/// A resolved build strategy for one source file
#[derive(Debug)]
pub struct BuildPlan {
    pub unit: CompilationUnit,
    /// Working directory of the toolchain; set for module-aware builds
    pub working_dir: Option<PathBuf>,
    pub manifest_present: bool,
    pub source_dir: PathBuf,
}

pub struct Builder {
    toolchain: Toolchain,
}

impl Builder {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Choose the compilation unit and working directory for `key`'s source
    ///
    /// When the source has a directive line, the returned plan owns the
    /// stripped temp copy; dropping the plan removes it.
    pub fn plan(&self, key: &CacheKey) -> Result<BuildPlan, GrunError> {
        let source = key.source();
        let source_dir = key.source_dir().to_path_buf();
        let manifest_present = DependencyManifest::for_dir(&source_dir).is_present();

        let directive_error = |e| GrunError::Directive {
            path: source.to_path_buf(),
            source: e,
        };

        let unit = if has_directive(source).map_err(directive_error)? {
            CompilationUnit::Stripped(strip_directive(source).map_err(directive_error)?)
        } else if manifest_present {
            CompilationUnit::Package
        } else {
            CompilationUnit::Source(source.to_path_buf())
        };

        Ok(BuildPlan {
            unit,
            working_dir: manifest_present.then(|| source_dir.clone()),
            manifest_present,
            source_dir,
        })
    }

    /// Compile `key`'s source into `output`
    pub fn build(&self, key: &CacheKey, output: &Path) -> Result<(), GrunError> {
        let plan = self.plan(key)?;

        info!(
            operation = "build",
            key = %key,
            manifest = plan.manifest_present,
            stripped = matches!(plan.unit, CompilationUnit::Stripped(_)),
            "compiling {}",
            key.source().display()
        );

        let cmd = self
            .toolchain
            .build_command(output, plan.unit.path(), plan.working_dir.as_deref());
        let result = self.toolchain.run(cmd)?;

        if !result.status.success() {
            debug!(operation = "build", key = %key, status = %result.status, "build failed");
            return Err(GrunError::Build(BuildFailure {
                status: result.status,
                diagnostics: String::from_utf8_lossy(&result.stderr).into_owned(),
                manifest_present: plan.manifest_present,
                source_dir: plan.source_dir,
            }));
        }

        Ok(())
    }
}
