//! The static record collection
//!
//! A `Collection` is validated once at load time and is read-only afterwards.
//! Loading fails fast: a duplicate id or a record that violates the data
//! model rejects the whole collection rather than indexing partial data.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::RecordId;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Validated, immutable set of records with O(1) id lookup
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Record>,
    /// id -> position in `records`
    positions: FxHashMap<RecordId, usize>,
}

impl Collection {
    /// Validate and wrap records
    ///
    /// # Errors
    ///
    /// - `DuplicateRecordId` if two records share an id
    /// - `InvalidRecord` if a record has a blank name
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let mut positions = FxHashMap::default();
        positions.reserve(records.len());

        for (pos, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(Error::InvalidRecord {
                    id: record.id,
                    reason: "name is empty".to_string(),
                });
            }
            if positions.insert(record.id, pos).is_some() {
                return Err(Error::DuplicateRecordId(record.id));
            }
        }

        tracing::info!(
            target: "pantry::collection",
            records = records.len(),
            "Record collection loaded"
        );

        Ok(Collection { records, positions })
    }

    /// Parse the source JSON data file contents
    ///
    /// Accepts either a bare array of records or an object holding the
    /// array under `recipes`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let array = match value {
            serde_json::Value::Object(mut map) => map.remove("recipes"),
            other => Some(other),
        };
        let Some(array) = array else {
            let reason = "expected a `recipes` array".to_string();
            return Err(Error::SerializationError(reason));
        };
        let records: Vec<Record> = serde_json::from_value(array)?;
        Self::new(records)
    }

    /// Read and parse a JSON data file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Records in source order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate records in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Record by id
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.positions.get(&id).map(|&pos| &self.records[pos])
    }

    /// Whether a record with this id exists
    pub fn contains(&self, id: RecordId) -> bool {
        self.positions.contains_key(&id)
    }

    /// All ids in source order
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
