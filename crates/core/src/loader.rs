//! AST loader
//!
//! Reads a JSON syntax tree dump from disk and decodes it into a generic
//! `serde_json::Value` tree. No validation is done beyond well-formed JSON.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Loader errors; all of them end the run
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File too large: {} is {size} bytes (limit {limit})", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: usize },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A decoded syntax tree together with the name it is reported under
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// Path the tree was loaded from
    pub path: PathBuf,

    /// Logical module name, e.g. `overrides.card` for `overrides/card.json`
    pub module_name: String,

    /// Root of the syntax tree
    pub root: Value,
}

/// Load and decode a JSON syntax tree
pub fn load_module(path: &Path, max_file_size: usize) -> Result<LoadedModule, LoadError> {
    let unreadable = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let size = fs::metadata(path).map_err(unreadable)?.len();
    if size > max_file_size as u64 {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_file_size,
        });
    }

    let source = fs::read_to_string(path).map_err(unreadable)?;
    parse_module(path, &source)
}

/// Decode an already-read syntax tree
pub fn parse_module(path: &Path, source: &str) -> Result<LoadedModule, LoadError> {
    let root = serde_json::from_str(source).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedModule {
        path: path.to_path_buf(),
        module_name: module_name(path),
        root,
    })
}

/// Derive the module name: drop the extension, path separators become `.`
pub fn module_name(path: &Path) -> String {
    path.with_extension("")
        .to_string_lossy()
        .replace(['/', '\\'], ".")
}
