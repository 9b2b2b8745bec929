//! Core types for pantry
//!
//! This crate defines the foundational types used throughout the system:
//! - RecordId: Stable identifier of a record
//! - Record, Ingredient: The recipe data model
//! - Field: Structural fields that typed filters target
//! - Collection: Validated, immutable record set with id lookup
//! - Keyword, KeywordKind: Entries of a query's keyword list
//! - Error: Error type for loading boundaries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod error;
pub mod keyword;
pub mod record;
pub mod types;

pub use collection::Collection;
pub use error::{Error, Result};
pub use keyword::{Keyword, KeywordKind};
pub use record::{Field, Ingredient, Record};
pub use types::RecordId;
