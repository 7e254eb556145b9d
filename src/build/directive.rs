/// Interpreter directive handling
///
/// A script may start with a `#!` line so it can be executed directly
/// (`#!/usr/bin/env grun`). The compiler rejects that line, so a copy without
/// it is written to the system temp directory and compiled instead.
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::TempPath;

/// Two-byte marker opening a directive line
pub const DIRECTIVE_MARKER: &[u8; 2] = b"#!";

/// Check whether `path` starts with a directive marker
///
/// Only the first two bytes are read. Files shorter than that have no directive.
pub fn has_directive(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(2);
    fs::File::open(path)?.take(2).read_to_end(&mut header)?;

    Ok(header.as_slice() == DIRECTIVE_MARKER)
}

/// Remove everything up to and including the first line terminator
///
/// Content without any terminator is entirely discarded.
pub fn strip_first_line(content: &[u8]) -> &[u8] {
    match content.iter().position(|&b| b == b'\n') {
        Some(idx) => &content[idx + 1..],
        None => &[],
    }
}

/// Temporary copy of a source file with its directive line removed
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct StrippedSource {
    path: TempPath,
}

impl StrippedSource {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write a copy of `path` without its first line to the system temp directory
pub fn strip_directive(path: &Path) -> io::Result<StrippedSource> {
    let content = fs::read(path)?;
    let body = strip_first_line(&content);

    // Keep the original name visible in compiler diagnostics
    let base_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix(&format!("grun_{}_", base_name))
        .suffix(".go")
        .tempfile()?;
    file.write_all(body)?;
    file.flush()?;

    Ok(StrippedSource {
        path: file.into_temp_path(),
    })
}
