/// CLI utilities for consistent output formatting
use std::io::IsTerminal;

use crate::error::{BuildFailure, GrunError};

/// Get a colored prefix
///
/// Returns bright cyan if stderr is a TTY, plain text otherwise.
pub fn grun_prefix() -> &'static str {
    if std::io::stderr().is_terminal() {
        "\x1b[96m[grun]\x1b[0m"
    } else {
        "[grun]"
    }
}

/// Guidance for builds that failed outside a Go module
pub fn module_hint(failure: &BuildFailure) -> Option<String> {
    if failure.manifest_present {
        return None;
    }

    Some(format!(
        "Hint: If your script uses external dependencies, initialize a Go module:\n  cd {}\n  go mod init <module-name>\n  go get <dependencies>",
        failure.source_dir.display()
    ))
}

/// User-facing text for an error
pub fn render_error(err: &GrunError) -> String {
    match err {
        GrunError::Build(failure) => match module_hint(failure) {
            Some(hint) => format!("{}\n\n{}", err, hint),
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}

/// Print an error to stderr
pub fn report(err: &GrunError) {
    eprintln!("{} Error: {}", grun_prefix(), render_error(err));
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;
    use std::process::ExitStatus;

    fn failure(manifest_present: bool) -> GrunError {
        GrunError::Build(BuildFailure {
            status: ExitStatus::from_raw(1 << 8),
            diagnostics: "./tool.go:5:2: package github.com/fatih/color is not in std".to_string(),
            manifest_present,
            source_dir: PathBuf::from("/home/me/scripts"),
        })
    }

    #[test]
    fn test_hint_added_without_manifest() {
        let text = render_error(&failure(false));
        assert!(text.contains("package github.com/fatih/color is not in std"));
        assert!(text.contains("go mod init <module-name>"));
        assert!(text.contains("cd /home/me/scripts"));
    }

    #[test]
    fn test_no_hint_with_manifest() {
        let text = render_error(&failure(true));
        assert!(text.contains("is not in std"));
        assert!(!text.contains("Hint:"));
    }

    #[test]
    fn test_other_errors_render_plainly() {
        let err = GrunError::Usage("no source file given".to_string());
        assert_eq!(render_error(&err), "no source file given");
    }
}
