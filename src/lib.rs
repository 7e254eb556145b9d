//! grun: run Go source files like scripts
//!
//! The library holds the build-cache decision engine (cache keys, staleness,
//! compilation strategy) and the glue that runs the cached binary. The `grun`
//! binary is a thin wrapper around [`Orchestrator`].

pub mod build;
pub mod cache;
pub mod cli;
pub mod cli_utils;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod runner;
pub mod xdg;

#[cfg(all(test, unix))]
mod test_support;

// Re-export commonly used types
pub use build::{Builder, Toolchain};
pub use cache::{derive_key, is_stale, CacheDir, CacheKey, Staleness};
pub use config::{GrunConfig, Settings};
pub use error::{BuildFailure, GrunError};
pub use orchestrator::{Orchestrator, Outcome};
