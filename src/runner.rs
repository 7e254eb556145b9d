/// Artifact execution
///
/// Runs the compiled program with the caller's arguments and inherited
/// standard streams, then reports its exit code unchanged.
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

use crate::error::GrunError;

/// Execute `artifact` with `args` and wait for it
pub fn run(artifact: &Path, args: &[OsString]) -> Result<i32, GrunError> {
    debug!(operation = "run", path = %artifact.display(), args = ?args, "executing artifact");

    let status = Command::new(artifact)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| GrunError::Spawn {
            path: artifact.to_path_buf(),
            source: e,
        })?;

    let code = exit_code(status);
    debug!(operation = "run", status = %status, exit_code = code, "artifact exited");

    Ok(code)
}

/// Exit code of a finished child
///
/// A child killed by a signal reports `128 + signal`, like a shell does.
#[cfg(unix)]
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
