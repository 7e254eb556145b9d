//! Test helpers: a POSIX shell stand-in for `go build`
//!
//! The fake compiler treats every source as a shell snippet. It rejects a
//! leading `#!` line like the real compiler does, fails on sources containing
//! `import-missing`, prints a warning for sources containing `warn-me`, and
//! "compiles" by prefixing the concatenated sources with `#!/bin/sh`. Each
//! invocation appends `<cwd>|<args>` to a log file. The script itself is
//! shared with the acceptance tests.
use std::fs;
use std::path::{Path, PathBuf};

use crate::build::Toolchain;

const FAKE_GO: &str = include_str!("../tests/fixtures/fake-go.sh");

/// A fake compiler installed in a directory, with its invocation log
pub struct FakeGo {
    pub program: PathBuf,
    pub log: PathBuf,
}

impl FakeGo {
    pub fn install(dir: &Path) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let program = dir.join("fake-go");
        let log = dir.join("fake-go.log");
        fs::write(&program, FAKE_GO.replace("__LOG__", &log.to_string_lossy())).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        Self { program, log }
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain::resolve(&self.program.to_string_lossy())
    }

    /// Logged invocations as `(working_dir, args)`
    pub fn invocations(&self) -> Vec<(String, String)> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(cwd, args)| (cwd.to_string(), args.to_string()))
            .collect()
    }
}
