//! Error types for pantry
//!
//! Errors only arise at loading boundaries: reading the record collection,
//! reading an index artifact, reading configuration, or parsing user-supplied
//! keyword kinds. Search itself is total and never fails.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::RecordId;
use std::io;
use thiserror::Error;

/// Result type alias for pantry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pantry
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Two records in the source collection share an id
    #[error("Duplicate record id: {0}")]
    DuplicateRecordId(RecordId),

    /// A record violates the data model
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Offending record
        id: RecordId,
        /// What is wrong with it
        reason: String,
    },

    /// A persisted index artifact does not describe a valid n-gram index
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    /// Configuration could not be parsed or validated
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Keyword kind string is not one of the known kinds
    #[error("Unknown keyword kind: {0}")]
    UnknownKeywordKind(String),

    /// Field name string is not one of the filterable fields
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
