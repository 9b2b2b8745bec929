//! Core identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identifier of a record in the collection
///
/// Identifiers come from the source data file and are never reassigned.
/// They are what the n-gram index stores in its posting sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    /// Wrap a raw identifier
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier value
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
