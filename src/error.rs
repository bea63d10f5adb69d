// src/error.rs

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures while loading or saving a persisted program.
#[derive(Debug)]
pub enum StoreError {
    Io(PathBuf, io::Error),
    Malformed(PathBuf, serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(path, err) => write!(f, "I/O error on '{}': {}", path.display(), err),
            StoreError::Malformed(path, err) => {
                write!(f, "Malformed program file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(_, err) => Some(err),
            StoreError::Malformed(_, err) => Some(err),
        }
    }
}
