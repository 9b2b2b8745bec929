//! N-gram recipe search
//!
//! This crate provides:
//! - Token normalizer (lowercase, accent stripping, punctuation rules)
//! - NgramIndex: character n-gram inverted index, persistable as JSON
//! - Query engine: length-based routing, token intersection, scan fallback
//! - Filter pipeline: main query first, then typed filters left to right
//! - QueryState: the owned keyword list a search runs against
//! - ResultCache: main-keyword memo keyed by raw keyword
//! - Inventory: distinct field values for filter pickers
//! - Searcher: query API over an atomically swappable corpus
//! - PantryConfig: `pantry.toml` loading
//!
//! # Usage
//!
//! ```ignore
//! use pantry_search::{QueryState, Searcher};
//!
//! let searcher = Searcher::new(collection);
//! let outcome = searcher.search(&QueryState::new().with_main("tarte"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod filter;
pub mod index;
pub mod inventory;
pub mod normalize;
pub mod query;
pub mod searcher;
pub mod state;

// Re-export commonly used types
pub use cache::{CacheStats, ResultCache};
pub use config::{PantryConfig, CONFIG_FILE_NAME};
pub use filter::apply_filters;
pub use index::{NgramIndex, PostingSet, MAX_NGRAM_LEN, MIN_NGRAM_LEN};
pub use inventory::{distinct_values, narrow_inventory, value_count};
pub use normalize::{fold, normalize, tokenize};
pub use query::{intersect_tokens, lookup, scan_all, Candidates, MainQuery, Route};
pub use searcher::{Corpus, QueryStats, SearchHint, SearchOutcome, Searcher};
pub use state::QueryState;
