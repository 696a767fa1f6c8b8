//! File access for NetLinx sources and generated output.
//!
//! NetLinx Studio stores source as ISO-8859-1. Every byte maps to the Unicode
//! scalar of the same value, so decoding cannot fail and encoding only has to
//! replace characters above U+00FF.

pub mod walker;

pub use walker::SourceWalker;

use crate::core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file as ISO-8859-1 text.
pub fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::file_system("Failed to read file", path, e),
    })?;
    Ok(decode_latin1(&bytes))
}

/// Replace `path` with `content` encoded as ISO-8859-1, creating parent
/// directories as needed.
pub fn write_latin1(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, encode_latin1(content))
        .map_err(|e| Error::file_system("Failed to write file", path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system("Failed to create directory", path, e))?;
    }
    Ok(())
}

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_latin1_round_trip_preserves_high_bytes() {
        let bytes = vec![b'c', 0xE9, b'/', 0xFF];
        let text = decode_latin1(&bytes);
        assert_eq!(text, "c\u{e9}/\u{ff}");
        assert_eq!(encode_latin1(&text), bytes);
    }

    #[test]
    fn test_encode_replaces_unrepresentable_characters() {
        assert_eq!(encode_latin1("a\u{2014}b"), b"a?b".to_vec());
    }

    #[test]
    fn test_missing_source_is_reported_as_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_latin1(&dir.path().join("missing.axi")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("include").join("rpc-functions.axi");
        write_latin1(&path, "caf\u{e9}\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\n".to_vec());
        assert_eq!(read_latin1(&path).unwrap(), "caf\u{e9}\n");
    }
}
