// src/store.rs

use std::fs;
use std::io;
use std::path::PathBuf;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// On-disk layout: the program lives under a single named key.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    program: Vec<String>,
}

/// Persists an engine's `program` view as a JSON document.
pub struct ProgramStore {
    path: PathBuf,
}

impl ProgramStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProgramStore { path: path.into() }
    }

    /// Reads the stored program. A missing file is not an error, just nothing saved yet.
    pub fn load(&self) -> Result<Option<Vec<String>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        };
        let document: Document = serde_json::from_str(&content)
            .map_err(|e| StoreError::Malformed(self.path.clone(), e))?;
        info!("loaded {} program entries from {}", document.program.len(), self.path.display());
        Ok(Some(document.program))
    }

    pub fn save(&self, program: &[String]) -> Result<(), StoreError> {
        let document = Document { program: program.to_vec() };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StoreError::Malformed(self.path.clone(), e))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(self.path.clone(), e))?;
        info!("saved {} program entries to {}", program.len(), self.path.display());
        Ok(())
    }
}
