//! Pantry - n-gram recipe search
//!
//! Pantry indexes a static recipe collection by character n-grams and answers
//! free-text queries combined with ingredient, appliance and tool filters.
//!
//! # Quick Start
//!
//! ```ignore
//! use pantry::{Collection, KeywordKind, QueryState, Searcher};
//!
//! let collection = Collection::from_path("data/recipes.json".as_ref())?;
//! let searcher = Searcher::new(collection);
//!
//! let state = QueryState::new()
//!     .with_main("tarte")
//!     .with_keyword("four", KeywordKind::Appliance);
//! for recipe in searcher.search(&state).records() {
//!     println!("{}", recipe.name);
//! }
//! ```
//!
//! # Architecture
//!
//! - `pantry-core`: data model, collection loading, keyword types, errors
//! - `pantry-search`: normalizer, index, query engine, filters, cache, searcher

pub use pantry_core::*;
pub use pantry_search::*;
