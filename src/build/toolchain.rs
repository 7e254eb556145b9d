/// External compiler invocation
///
/// grun never compiles anything itself: it runs `go build -o <output> [file]`
/// and only looks at the exit status and the raw stderr text.
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::{debug, warn};

use crate::error::GrunError;

/// Compiler program used when none is configured
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// A resolved compiler program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: String,
    path: PathBuf,
}

impl Toolchain {
    /// Resolve `program` from PATH, falling back to the name as given
    pub fn resolve(program: &str) -> Self {
        let path = which::which(program).unwrap_or_else(|e| {
            warn!(
                operation = "toolchain.resolve",
                program,
                error = %e,
                "toolchain not found in PATH, trying as-is"
            );
            PathBuf::from(program)
        });

        debug!(operation = "toolchain.resolve", program, path = %path.display(), "toolchain resolved");

        Self {
            program: program.to_string(),
            path,
        }
    }

    /// Configured program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolved executable path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the `build -o <output> [unit]` command
    ///
    /// Without a unit the toolchain compiles the package in `working_dir`.
    pub fn build_command(
        &self,
        output: &Path,
        unit: Option<&Path>,
        working_dir: Option<&Path>,
    ) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg("build").arg("-o").arg(output);

        if let Some(unit) = unit {
            cmd.arg(unit);
        }

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }

    /// Run a build command to completion
    ///
    /// Compiler stdout is sent to our stderr so the compiled program owns
    /// stdout. Stderr is captured and returned in the output; after a
    /// successful build it is also echoed to our stderr.
    pub fn run(&self, mut cmd: Command) -> Result<Output, GrunError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::piped());

        debug!(operation = "toolchain.run", command = ?cmd, "invoking toolchain");

        let output = cmd.output().map_err(|e| GrunError::Toolchain {
            program: self.program.clone(),
            source: e,
        })?;

        // Warnings printed by a successful build are passed through
        if output.status.success() && !output.stderr.is_empty() {
            let _ = io::stderr().write_all(&output.stderr);
        }

        Ok(output)
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::resolve(DEFAULT_TOOLCHAIN)
    }
}
