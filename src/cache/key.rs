/// Cache key derivation
///
/// A key identifies the cache slot of one source file. It is derived from the
/// file's absolute path, not its content: staleness is decided separately from
/// modification times. Format: "{stem}-{hex_hash}" where hex_hash is the first
/// 16 characters of the SHA256 of the absolute path.
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GrunError;

/// Number of hex characters of the path digest kept in the key
pub const DIGEST_PREFIX_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source: PathBuf,
    stem: String,
    digest: String,
}

impl CacheKey {
    /// Resolve `source` and derive its key
    ///
    /// Fails when the path cannot be resolved: missing file, permission
    /// denied, symlink loop.
    pub fn derive(source: &Path) -> Result<Self, GrunError> {
        let absolute = fs::canonicalize(source).map_err(|e| GrunError::PathResolution {
            path: source.to_path_buf(),
            source: e,
        })?;

        Ok(Self::from_absolute(absolute))
    }

    /// Derive the key of an already absolute path without touching the filesystem
    pub fn from_absolute(absolute: PathBuf) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(absolute.to_string_lossy().as_bytes());
        let hash = hex::encode(hasher.finalize());

        let stem = absolute
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            source: absolute,
            stem,
            digest: hash[..DIGEST_PREFIX_LEN].to_string(),
        }
    }

    /// Absolute path of the source file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory containing the source file
    pub fn source_dir(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new("/"))
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// File name of the cache slot
    pub fn file_name(&self) -> String {
        format!("{}-{}", self.stem, self.digest)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stem, self.digest)
    }
}

/// Compute the cache key for a source file
pub fn derive_key(source: &Path) -> Result<CacheKey, GrunError> {
    CacheKey::derive(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_key_format() {
        let key = CacheKey::from_absolute(PathBuf::from("/home/user/scripts/hello.go"));

        assert_eq!(key.stem(), "hello");
        assert_eq!(key.digest().len(), DIGEST_PREFIX_LEN);
        assert!(key.digest().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key.file_name(), format!("hello-{}", key.digest()));
        assert_eq!(key.to_string(), key.file_name());
        assert_eq!(key.source_dir(), Path::new("/home/user/scripts"));
    }

    #[test]
    fn test_digest_matches_sha256_of_path() {
        let key = CacheKey::from_absolute(PathBuf::from("/tmp/a.go"));
        let expected = hex::encode(Sha256::digest(b"/tmp/a.go"));
        assert_eq!(key.digest(), &expected[..16]);
    }

    #[test]
    fn test_key_is_stable() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("script.go");
        fs::write(&script, "package main\n").unwrap();

        let key1 = derive_key(&script).unwrap();
        let key2 = derive_key(&script).unwrap();
        assert_eq!(key1, key2);

        // Content does not participate in the key
        fs::write(&script, "package main\n\nfunc main() {}\n").unwrap();
        assert_eq!(derive_key(&script).unwrap(), key1);
    }

    #[test]
    fn test_relative_and_absolute_paths_agree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");
        fs::create_dir(&dir).unwrap();
        let script = dir.join("tool.go");
        fs::write(&script, "package main\n").unwrap();

        let dotted = temp.path().join("nested/../nested/tool.go");
        assert_eq!(derive_key(&script).unwrap(), derive_key(&dotted).unwrap());
    }

    #[test]
    fn test_same_name_in_different_directories() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        fs::write(a.join("main.go"), "").unwrap();
        fs::write(b.join("main.go"), "").unwrap();

        let key_a = derive_key(&a.join("main.go")).unwrap();
        let key_b = derive_key(&b.join("main.go")).unwrap();
        assert_eq!(key_a.stem(), key_b.stem());
        assert_ne!(key_a, key_b);
        assert_ne!(key_a.file_name(), key_b.file_name());
    }

    #[test]
    fn test_no_collisions_across_many_paths() {
        let mut seen = HashSet::new();
        for i in 0..10_000 {
            let key = CacheKey::from_absolute(PathBuf::from(format!("/src/dir{}/script.go", i)));
            assert!(seen.insert(key.file_name()), "collision at {}", i);
        }
    }

    #[test]
    fn test_missing_file_fails_resolution() {
        let temp = TempDir::new().unwrap();
        let err = derive_key(&temp.path().join("nope.go")).unwrap_err();
        assert!(matches!(err, GrunError::PathResolution { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_fails_resolution() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.go");
        let b = temp.path().join("b.go");
        std::os::unix::fs::symlink(&b, &a).unwrap();
        std::os::unix::fs::symlink(&a, &b).unwrap();

        let err = derive_key(&a).unwrap_err();
        assert!(matches!(err, GrunError::PathResolution { .. }));
    }
}
