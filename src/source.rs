//! Data-source contract and an in-memory implementation.
//!
//! The canvas never defines what a record looks like. It asks the source for
//! the names it knows about (to materialise tiles for a filter) and for the
//! record behind a single name (to fill a tile at construction time), and
//! keeps whatever comes back as an opaque JSON value.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use serde::Deserialize;

use crate::error::SourceError;

/// Opaque tile content supplied by a data source.
pub type Record = serde_json::Value;

/// External lookup used to materialise tile content.
pub trait DataSource {
    /// All entry names, in the source's natural order.
    fn names(&self) -> Vec<String>;

    /// Fetch the record for `name`. `Ok(None)` means no such entry.
    ///
    /// # Errors
    ///
    /// Any failure to produce the record; the canvas treats it as a
    /// construction failure of the tile being built.
    fn lookup(&self, name: &str) -> Result<Option<Record>, SourceError>;
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    name: String,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Insertion-ordered in-memory source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<(String, Record)>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of objects, each carrying a string `name` field.
    /// Every other field becomes part of that entry's record.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` if the document is not such an array.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let parsed: Vec<SourceEntry> = serde_json::from_str(json)?;
        let mut source = Self::new();
        for entry in parsed {
            source.insert(entry.name, serde_json::Value::Object(entry.fields));
        }
        Ok(source)
    }

    /// Insert or replace the record for `name`. Replacement keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, record: Record) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = record,
            None => self.entries.push((name, record)),
        }
    }

    /// Remove the entry for `name`, returning its record if present.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DataSource for MemorySource {
    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    fn lookup(&self, name: &str) -> Result<Option<Record>, SourceError> {
        Ok(self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.clone()))
    }
}
