//! Searcher: the query API over a loaded corpus
//!
//! A `Searcher` owns one immutable [`Corpus`] snapshot (collection, n-gram
//! index and result cache) behind a lock that is only held long enough to
//! clone an `Arc`. Queries run against the snapshot they started with; a
//! rebuild constructs a complete new snapshot and swaps it in, so readers
//! never observe a half-built index and the old cache dies with the old
//! index.
//!
//! # Usage
//!
//! ```ignore
//! let searcher = Searcher::new(collection);
//! let state = QueryState::new()
//!     .with_main("tarte")
//!     .with_keyword("four", KeywordKind::Appliance);
//! let outcome = searcher.search(&state);
//! for record in outcome.records() {
//!     println!("{}", record.name);
//! }
//! ```

use crate::cache::{CacheStats, ResultCache};
use crate::config::PantryConfig;
use crate::filter::{apply_typed_filters, restrict};
use crate::index::{NgramIndex, MIN_NGRAM_LEN};
use crate::inventory::distinct_values;
use crate::query::{MainQuery, Route};
use crate::state::QueryState;
use pantry_core::{Collection, Field, Record, RecordId, Result};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// Corpus
// ============================================================================

/// One consistent generation of searchable data
#[derive(Debug)]
pub struct Corpus {
    collection: Collection,
    index: NgramIndex,
    cache: ResultCache,
}

impl Corpus {
    fn new(collection: Collection, index: NgramIndex) -> Self {
        Corpus {
            collection,
            index,
            cache: ResultCache::new(),
        }
    }

    /// Records of this generation
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Index of this generation
    pub fn index(&self) -> &NgramIndex {
        &self.index
    }

    /// Result cache of this generation
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Something the caller should tell the user instead of, or alongside, the
/// results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHint {
    /// Main keyword is non-empty but below the searchable length
    TooShort {
        /// Characters required before a main query runs
        min_chars: usize,
    },
    /// A main query ran and nothing survived the pipeline
    NoMatches,
}

impl fmt::Display for SearchHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchHint::TooShort { min_chars } => {
                write!(f, "Please enter at least {} characters", min_chars)
            }
            SearchHint::NoMatches => write!(
                f,
                "No recipe found, try searching for \"brownie\" or \"salade de riz\""
            ),
        }
    }
}

/// Per-query statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Route taken by the main keyword
    pub route: Route,
    /// Records left after the main query, before typed filters
    pub candidates: usize,
    /// Records left after every filter
    pub results: usize,
    /// Time spent in search (microseconds)
    pub elapsed_micros: u64,
    /// Whether the main query came from the cache
    pub cache_hit: bool,
}

/// Result of one search
///
/// Holds the corpus generation it was computed against, so its records stay
/// valid across a concurrent rebuild.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    corpus: Arc<Corpus>,
    /// Matching ids in collection order
    pub ids: Vec<RecordId>,
    /// Message for the caller, if any
    pub hint: Option<SearchHint>,
    /// Query statistics
    pub stats: QueryStats,
}

impl SearchOutcome {
    /// Matching records in collection order
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.ids
            .iter()
            .filter_map(|id| self.corpus.collection.get(*id))
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distinct values of `field` over the matching records
    pub fn inventory(&self, field: Field) -> BTreeSet<String> {
        distinct_values(self.records(), field)
    }
}

// ============================================================================
// Searcher
// ============================================================================

/// Query API over a swappable corpus
#[derive(Debug)]
pub struct Searcher {
    corpus: RwLock<Arc<Corpus>>,
    cache_enabled: bool,
}

impl Searcher {
    /// Build the index for `collection` and serve queries from it
    pub fn new(collection: Collection) -> Self {
        let index = NgramIndex::build(&collection);
        Self::from_parts(collection, index)
    }

    /// Serve queries from a preloaded index
    ///
    /// Fails if the index names a record the collection does not have.
    pub fn with_index(collection: Collection, index: NgramIndex) -> Result<Self> {
        index.validate_against(&collection)?;
        Ok(Self::from_parts(collection, index))
    }

    /// Load collection and optional index artifact as configured
    pub fn from_config(config: &PantryConfig) -> Result<Self> {
        let collection = Collection::from_path(&config.recipes)?;
        let searcher = match &config.index {
            Some(path) => Self::with_index(collection, NgramIndex::load(path)?)?,
            None => Self::new(collection),
        };
        Ok(searcher.with_cache(config.cache))
    }

    fn from_parts(collection: Collection, index: NgramIndex) -> Self {
        Searcher {
            corpus: RwLock::new(Arc::new(Corpus::new(collection, index))),
            cache_enabled: true,
        }
    }

    /// Builder: enable or disable the result cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Whether main-query results are memoized
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Current corpus generation
    pub fn corpus(&self) -> Arc<Corpus> {
        Arc::clone(&self.corpus.read())
    }

    /// Replace the collection with a freshly indexed one
    ///
    /// In-flight queries finish against the previous generation. The cache
    /// starts empty.
    pub fn rebuild(&self, collection: Collection) {
        let index = NgramIndex::build(&collection);
        self.swap(Corpus::new(collection, index));
    }

    /// Replace the collection and index with preloaded ones
    pub fn replace(&self, collection: Collection, index: NgramIndex) -> Result<()> {
        index.validate_against(&collection)?;
        self.swap(Corpus::new(collection, index));
        Ok(())
    }

    fn swap(&self, corpus: Corpus) {
        let records = corpus.collection.len();
        let ngrams = corpus.index.len();
        *self.corpus.write() = Arc::new(corpus);
        tracing::info!(
            target: "pantry::index",
            records,
            ngrams,
            "Corpus swapped"
        );
    }

    /// Cache counters for the current generation
    pub fn cache_stats(&self) -> CacheStats {
        self.corpus.read().cache.stats()
    }

    /// Run the filter pipeline for `state`
    ///
    /// The main keyword is resolved first (through the cache when enabled),
    /// then typed filters narrow the result in keyword-list order.
    pub fn search(&self, state: &QueryState) -> SearchOutcome {
        let corpus = self.corpus();
        let start = Instant::now();

        let main = state.main().unwrap_or("");
        let route = Route::for_keyword(main);
        let records = corpus.collection.records();

        let (main_ids, cache_hit) = if route.is_searching() && self.cache_enabled {
            let (ids, hit) = corpus.cache.get_or_compute(main, || {
                MainQuery::run(main, records, &corpus.index)
                    .ids
                    .unwrap_or_else(|| corpus.collection.ids().collect())
            });
            (Some(ids.to_vec()), hit)
        } else {
            (MainQuery::run(main, records, &corpus.index).ids, false)
        };

        let current = restrict(records, main_ids.as_deref());
        let candidates = current.len();
        let filtered = apply_typed_filters(current, state.keywords());
        let ids: Vec<RecordId> = filtered.iter().map(|r| r.id).collect();

        let hint = match route {
            Route::TooShort => Some(SearchHint::TooShort {
                min_chars: MIN_NGRAM_LEN,
            }),
            Route::Index | Route::Scan if ids.is_empty() => Some(SearchHint::NoMatches),
            _ => None,
        };

        let stats = QueryStats {
            route,
            candidates,
            results: ids.len(),
            elapsed_micros: start.elapsed().as_micros() as u64,
            cache_hit,
        };

        tracing::debug!(
            target: "pantry::search",
            keyword = main,
            route = ?stats.route,
            candidates = stats.candidates,
            results = stats.results,
            elapsed_micros = stats.elapsed_micros,
            cache_hit = stats.cache_hit,
            "Search completed"
        );

        SearchOutcome {
            corpus,
            ids,
            hint,
            stats,
        }
    }

    /// Distinct values of `field` over the records `state` currently selects
    pub fn inventory(&self, state: &QueryState, field: Field) -> BTreeSet<String> {
        self.search(state).inventory(field)
    }
}
