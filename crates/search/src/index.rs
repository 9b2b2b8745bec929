//! Character n-gram inverted index
//!
//! Every searchable word of every record is normalized, then every
//! contiguous substring of length `MIN_NGRAM_LEN..=MAX_NGRAM_LEN` is
//! mapped to the set of records that produced it.
//!
//! # Invariants
//!
//! - A key is present iff some normalized corpus token contains it as a
//!   contiguous substring of exactly that length.
//! - Posting sets are never empty.
//! - The index is built once and read-only afterwards; a changed
//!   collection means a full rebuild, never an in-place update.
//!
//! # Artifact
//!
//! The index can be persisted as a JSON object mapping each n-gram to its
//! sorted id list, generated offline and loaded verbatim at startup.

use crate::normalize::{char_len, normalize, MIN_TOKEN_LEN};
use pantry_core::{Collection, Error, Record, RecordId, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Shortest indexed n-gram
pub const MIN_NGRAM_LEN: usize = MIN_TOKEN_LEN;

/// Longest indexed n-gram
pub const MAX_NGRAM_LEN: usize = 13;

/// Set of records containing an n-gram
pub type PostingSet = FxHashSet<RecordId>;

/// Serialized form: n-gram -> ascending record ids
pub type IndexArtifact = BTreeMap<String, Vec<RecordId>>;

// ============================================================================
// NgramIndex
// ============================================================================

/// Inverted index from n-gram to record ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NgramIndex {
    postings: FxHashMap<String, PostingSet>,
}

impl NgramIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index over every record
    ///
    /// Idempotent and independent of record order.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let start = Instant::now();
        let mut index = Self::new();
        let mut record_count = 0usize;

        for record in records {
            index.index_record(record);
            record_count += 1;
        }

        tracing::info!(
            target: "pantry::index",
            records = record_count,
            ngrams = index.len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "N-gram index built"
        );

        index
    }

    fn index_record(&mut self, record: &Record) {
        for text in record.searchable_text() {
            for word in text.split_whitespace() {
                let token = normalize(word);
                for gram in ngrams(&token) {
                    self.insert(gram, record.id);
                }
            }
        }
    }

    fn insert(&mut self, gram: &str, id: RecordId) {
        // avoid allocating the key when the n-gram is already known
        if let Some(set) = self.postings.get_mut(gram) {
            set.insert(id);
            return;
        }
        let mut set = PostingSet::default();
        set.insert(id);
        self.postings.insert(gram.to_string(), set);
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Posting set stored under an already-normalized token
    ///
    /// `None` means the n-gram occurs nowhere in the corpus. A present set is
    /// never empty.
    pub fn lookup(&self, token: &str) -> Option<&PostingSet> {
        self.postings.get(token)
    }

    /// Whether an n-gram is indexed
    pub fn contains(&self, gram: &str) -> bool {
        self.postings.contains_key(gram)
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether the index has no keys
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterate indexed n-grams (unordered)
    pub fn ngrams(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    /// Check that every posted id belongs to `collection`
    ///
    /// Used when an artifact built offline is paired with a collection
    /// loaded at startup.
    pub fn validate_against(&self, collection: &Collection) -> Result<()> {
        for (gram, set) in &self.postings {
            if let Some(id) = set.iter().find(|id| !collection.contains(**id)) {
                let reason = format!("n-gram '{}' references unknown record {}", gram, id);
                return Err(Error::CorruptIndex(reason));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Artifact
    // ========================================================================

    /// Convert to the sorted, serializable artifact form
    pub fn to_artifact(&self) -> IndexArtifact {
        self.postings
            .iter()
            .map(|(gram, set)| {
                let mut ids: Vec<RecordId> = set.iter().copied().collect();
                ids.sort_unstable();
                (gram.clone(), ids)
            })
            .collect()
    }

    /// Rebuild an index from its artifact form
    ///
    /// # Errors
    ///
    /// `CorruptIndex` if a key has a length outside the indexed range or an
    /// id list is empty.
    pub fn from_artifact(artifact: IndexArtifact) -> Result<Self> {
        let mut postings = FxHashMap::default();
        postings.reserve(artifact.len());

        for (gram, ids) in artifact {
            let len = char_len(&gram);
            if !(MIN_NGRAM_LEN..=MAX_NGRAM_LEN).contains(&len) {
                let reason = format!(
                    "n-gram '{}' has length {}, expected {}..={}",
                    gram, len, MIN_NGRAM_LEN, MAX_NGRAM_LEN
                );
                return Err(Error::CorruptIndex(reason));
            }
            if ids.is_empty() {
                let reason = format!("n-gram '{}' has no records", gram);
                return Err(Error::CorruptIndex(reason));
            }
            postings.insert(gram, ids.into_iter().collect());
        }

        Ok(NgramIndex { postings })
    }

    /// Write the artifact as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(&self.to_artifact())?;
        std::fs::write(path, json)?;

        tracing::info!(
            target: "pantry::index",
            path = %path.display(),
            ngrams = self.len(),
            "N-gram index saved"
        );
        Ok(())
    }

    /// Read an artifact written by [`NgramIndex::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let artifact: IndexArtifact = serde_json::from_str(&content)?;
        let index = Self::from_artifact(artifact)?;

        tracing::info!(
            target: "pantry::index",
            path = %path.display(),
            ngrams = index.len(),
            "N-gram index loaded"
        );
        Ok(index)
    }
}

// ============================================================================
// N-gram extraction
// ============================================================================

/// Every n-gram of a token, for each length in the indexed range
///
/// Sliding window with step 1 over chars. Tokens shorter than
/// `MIN_NGRAM_LEN` yield nothing. The same substring may appear more than
/// once when the token repeats itself.
pub fn ngrams(token: &str) -> Vec<&str> {
    // byte offset of every char boundary, including the end
    let bounds: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(token.len()))
        .collect();
    let chars = bounds.len() - 1;

    let mut grams = Vec::new();
    for n in MIN_NGRAM_LEN..=MAX_NGRAM_LEN.min(chars) {
        for start in 0..=chars - n {
            grams.push(&token[bounds[start]..bounds[start + n]]);
        }
    }
    grams
}
