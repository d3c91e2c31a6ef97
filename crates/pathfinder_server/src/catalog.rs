use std::collections::HashSet;
use std::fs;
use std::path::Path;

use pathfinder_engine::{decode_catalog, CatalogEntry, DecodeError};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Invalid(#[from] DecodeError),
}

/// Lecture records served at `/api/lectures`, validated once at start-up.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Value>,
    entries: Vec<CatalogEntry>,
    titles: HashSet<String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = fs::read(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let entries = decode_catalog(bytes)?;
        // decode_catalog accepted the body, so it is an array.
        let records = match serde_json::from_slice(bytes) {
            Ok(Value::Array(records)) => records,
            _ => return Err(CatalogError::Invalid(DecodeError::NotAnArray)),
        };
        let titles = entries.iter().map(|e| e.title.clone()).collect();
        Ok(Self {
            records,
            entries,
            titles,
        })
    }

    /// Raw records, extra fields included.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
