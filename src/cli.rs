use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::GrunError;

/// grun - run Go source files like scripts
///
/// Compiles the given file once, caches the binary, and reuses it until the
/// source (or its go.mod/go.sum) changes. Put `#!/usr/bin/env grun` on the
/// first line to make a Go file directly executable.
#[derive(Parser, Debug)]
#[command(name = "grun")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run Go source files like scripts", long_about = None)]
#[command(after_help = "Examples:\n  grun script.go\n  grun script.go arg1 arg2")]
pub struct Cli {
    /// Directory to use for caching compiled binaries (default: ~/.cache/grun)
    #[arg(long, env = "GRUN_CACHE", value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Compiler program invoked as `<toolchain> build -o <output> [file]`
    #[arg(long, env = "GRUN_TOOLCHAIN", value_name = "PROGRAM")]
    pub toolchain: Option<String>,

    /// Config file path (default: ~/.config/grun/config.toml)
    #[arg(short = 'c', long, env = "GRUN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log cache decisions and toolchain invocations
    #[arg(short, long)]
    pub verbose: bool,

    /// Go source file to run, followed by the arguments passed to it
    ///
    /// Option parsing stops at the source file: everything after it belongs
    /// to the compiled program.
    #[arg(
        value_name = "GO_FILE [ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Split the positional arguments into the source file and program arguments
    ///
    /// A leading option-like word that clap did not recognise is a usage
    /// error, not a file name.
    pub fn invocation(&self) -> Result<(PathBuf, &[OsString]), GrunError> {
        let (source, args) = self
            .command
            .split_first()
            .ok_or_else(|| GrunError::Usage("no source file given".to_string()))?;

        if source.to_string_lossy().starts_with('-') {
            return Err(GrunError::Usage(format!(
                "unexpected argument '{}'",
                source.to_string_lossy()
            )));
        }

        Ok((PathBuf::from(source), args))
    }
}
