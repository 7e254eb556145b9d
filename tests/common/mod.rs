// Common test utilities shared across acceptance tests
//
// ## Test Isolation Strategy
//
// Each test gets its own workspace with NO GLOBAL STATE:
// - Scripts live in a per-test temp directory
// - The cache directory is a separate temp directory passed via GRUN_CACHE
// - The Go toolchain is replaced by a fake compiler (POSIX shell) installed in
//   the workspace and selected via GRUN_TOOLCHAIN
// - HOME and XDG_CONFIG_HOME point into the workspace so no user config is read
//
// The fake compiler treats sources as shell snippets: it rejects a leading
// `#!` line like `go build` does, fails on sources containing
// `import-missing`, prints a warning for sources containing `warn-me`, and
// writes `#!/bin/sh` + the concatenated sources as the binary. Each invocation is appended to a log file as `<cwd>|<args>`.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const FAKE_GO: &str = include_str!("../fixtures/fake-go.sh");

pub struct TestWorkspace {
    temp_dir: TempDir,
    cache_dir: TempDir,
    fake_go: PathBuf,
    build_log: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();

        let tools = temp_dir.path().join(".tools");
        fs::create_dir(&tools).unwrap();
        let fake_go = tools.join("go");
        let build_log = tools.join("builds.log");
        fs::write(
            &fake_go,
            FAKE_GO.replace("__LOG__", &build_log.to_string_lossy()),
        )
        .unwrap();
        fs::set_permissions(&fake_go, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            temp_dir,
            cache_dir,
            fake_go,
            build_log,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cache_path(&self) -> &Path {
        self.cache_dir.path()
    }

    /// grun command with isolated cache, toolchain and config locations
    pub fn grun(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_grun"));
        cmd.env("GRUN_CACHE", self.cache_path())
            .env("GRUN_TOOLCHAIN", &self.fake_go)
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("GRUN_CONFIG")
            .env_remove("RUST_LOG")
            .current_dir(self.path());
        cmd
    }

    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.temp_dir.path().join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&file_path, content).unwrap();
        file_path
    }

    /// Number of times the fake compiler ran
    pub fn build_count(&self) -> usize {
        self.builds().len()
    }

    /// Logged compiler invocations as `(working_dir, args)`
    pub fn builds(&self) -> Vec<(String, String)> {
        fs::read_to_string(&self.build_log)
            .unwrap_or_default()
            .lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(cwd, args)| (cwd.to_string(), args.to_string()))
            .collect()
    }

    /// Files in the cache directory
    pub fn cached_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.cache_path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Set the modification time of `path` to `offset` after the newest cache entry
    pub fn touch_after_cache(&self, path: &Path, offset: Duration) {
        let newest = fs::read_dir(self.cache_path())
            .unwrap()
            .map(|e| e.unwrap().metadata().unwrap().modified().unwrap())
            .max()
            .unwrap_or_else(SystemTime::now);

        set_mtime(path, newest + offset);
    }
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

pub fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}
