//! File I/O primitives for target documents.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a whole document as UTF-8 text with `\n` line endings.
///
/// Access failures and invalid encodings are reported separately so callers
/// can tell a missing file from a binary one. `\r\n` and lone `\r` are
/// folded to `\n`, so line-based rules match regardless of platform.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::file_io(path, "read", &e))?;
    let text = String::from_utf8(bytes).map_err(|e| Error::file_invalid_encoding(path, e))?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Overwrite a document with new content, truncating whatever was there.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_io(path, "write", &e))
}
