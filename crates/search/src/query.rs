//! Query engine
//!
//! Resolves a main free-text keyword to candidate records, either through
//! the n-gram index or, when the index cannot answer, through a full scan.
//!
//! # Routing
//!
//! | raw length | route |
//! |---|---|
//! | 0 | `Unfiltered`: no constraint |
//! | 1–2 | `TooShort`: caller prompts for more input, no constraint |
//! | 3–13 | `Index`: split on whitespace, intersect index lookups |
//! | ≥ 14 | `Scan`: substring scan of every searchable field |

use crate::index::{NgramIndex, PostingSet, MAX_NGRAM_LEN, MIN_NGRAM_LEN};
use crate::normalize::{char_len, fold, normalize, tokenize};
use pantry_core::{Record, RecordId};
use serde::Serialize;

// ============================================================================
// Route
// ============================================================================

/// How a main keyword is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Empty keyword, no filtering
    #[default]
    Unfiltered,
    /// Below the minimum length; not searched
    TooShort,
    /// Served by the n-gram index
    Index,
    /// Longer than any indexed n-gram; served by a full scan
    Scan,
}

impl Route {
    /// Pick the route for a raw (un-normalized) keyword
    pub fn for_keyword(raw: &str) -> Self {
        match char_len(raw) {
            0 => Route::Unfiltered,
            n if n < MIN_NGRAM_LEN => Route::TooShort,
            n if n <= MAX_NGRAM_LEN => Route::Index,
            _ => Route::Scan,
        }
    }

    /// Whether the route constrains the record set
    pub fn is_searching(&self) -> bool {
        matches!(self, Route::Index | Route::Scan)
    }
}

// ============================================================================
// Candidates
// ============================================================================

/// Outcome of intersecting token lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// No token qualified; the query imposes no constraint
    All,
    /// Records satisfying every qualifying token
    Ids(PostingSet),
}

impl Candidates {
    /// Whether a record survives
    pub fn contains(&self, id: RecordId) -> bool {
        match self {
            Candidates::All => true,
            Candidates::Ids(ids) => ids.contains(&id),
        }
    }

    /// Whether this is the "all identifiers" sentinel
    pub fn is_all(&self) -> bool {
        matches!(self, Candidates::All)
    }
}

// ============================================================================
// Index path
// ============================================================================

/// Normalize a raw word and look it up
///
/// `None` is "absent": the token occurs nowhere in the corpus.
pub fn lookup<'a>(word: &str, index: &'a NgramIndex) -> Option<&'a PostingSet> {
    index.lookup(&normalize(word))
}

/// Intersect the posting sets of normalized tokens
///
/// Tokens shorter than `MIN_NGRAM_LEN` impose no constraint. One absent
/// qualifying token empties the result. If no token qualifies the result is
/// [`Candidates::All`].
pub fn intersect_tokens<S: AsRef<str>>(tokens: &[S], index: &NgramIndex) -> Candidates {
    let mut sets: Vec<&PostingSet> = Vec::with_capacity(tokens.len());

    for token in tokens.iter().map(AsRef::as_ref) {
        if char_len(token) < MIN_NGRAM_LEN {
            continue;
        }
        match index.lookup(token) {
            Some(set) => sets.push(set),
            None => return Candidates::Ids(PostingSet::default()),
        }
    }

    // smallest set first keeps every intermediate result small
    sets.sort_unstable_by_key(|set| set.len());
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Candidates::All;
    };

    let mut acc: PostingSet = first.clone();
    for set in sets {
        acc.retain(|id| set.contains(id));
        if acc.is_empty() {
            break;
        }
    }
    Candidates::Ids(acc)
}

// ============================================================================
// Scan path
// ============================================================================

/// Whether a folded needle occurs in any searchable field of a record
pub fn record_contains(record: &Record, needle: &str) -> bool {
    record
        .searchable_text()
        .any(|text| fold(text).contains(needle))
}

/// Substring scan over every searchable field
///
/// The keyword is normalized; field text is compared case- and
/// diacritic-insensitively. Returns records in input order.
pub fn scan_all<'a, I>(keyword: &str, records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = normalize(keyword);
    records
        .into_iter()
        .filter(|record| record_contains(record, &needle))
        .collect()
}

// ============================================================================
// Main query
// ============================================================================

/// Result of evaluating a main keyword against the full record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainQuery {
    /// Route taken
    pub route: Route,
    /// Matching ids in record order; `None` means no constraint
    pub ids: Option<Vec<RecordId>>,
}

impl MainQuery {
    /// Evaluate a raw main keyword
    pub fn run(keyword: &str, records: &[Record], index: &NgramIndex) -> Self {
        let route = Route::for_keyword(keyword);
        let ids = match route {
            Route::Unfiltered | Route::TooShort => None,
            Route::Index => match intersect_tokens(&tokenize(keyword), index) {
                Candidates::All => None,
                Candidates::Ids(set) => {
                    let matching = records.iter().map(|r| r.id).filter(|id| set.contains(id));
                    Some(matching.collect())
                }
            },
            Route::Scan => Some(scan_all(keyword, records).iter().map(|r| r.id).collect()),
        };
        MainQuery { route, ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::Ingredient;

    fn records() -> Vec<Record> {
        vec![
            Record::new(1, "Tarte au thon")
                .with_appliance("Four")
                .with_ingredient(Ingredient::new("Crème fraîche"))
                .with_description("Recouvrir de crème pâtissière maison."),
            Record::new(2, "Tarte aux pommes")
                .with_appliance("Four")
                .with_ingredient(Ingredient::new("Pomme"))
                .with_description("Étaler la pâte."),
            Record::new(3, "Salade de riz")
                .with_appliance("Cuiseur de riz")
                .with_ingredient(Ingredient::new("Riz blanc"))
                .with_description("Faire cuire le riz."),
        ]
    }

    fn sorted(c: Candidates) -> Vec<u32> {
        match c {
            Candidates::All => panic!("expected ids"),
            Candidates::Ids(set) => {
                let mut v: Vec<u32> = set.into_iter().map(|id| id.as_u32()).collect();
                v.sort_unstable();
                v
            }
        }
    }

    #[test]
    fn test_route_boundaries() {
        assert_eq!(Route::for_keyword(""), Route::Unfiltered);
        assert_eq!(Route::for_keyword("t"), Route::TooShort);
        assert_eq!(Route::for_keyword("ta"), Route::TooShort);
        assert_eq!(Route::for_keyword("tar"), Route::Index);
        assert_eq!(Route::for_keyword("abcdefghijklm"), Route::Index);
        assert_eq!(Route::for_keyword("abcdefghijklmn"), Route::Scan);
    }

    #[test]
    fn test_route_counts_chars_not_bytes() {
        // 13 chars, 16 bytes
        assert_eq!(Route::for_keyword("crème brûlée!"), Route::Index);
        assert_eq!(Route::for_keyword("é"), Route::TooShort);
    }

    #[test]
    fn test_lookup_normalizes() {
        let index = NgramIndex::build(&records());
        assert!(lookup("TARTE,", &index).is_some());
        assert!(lookup("chocolat", &index).is_none());
    }

    #[test]
    fn test_intersect_single_token() {
        let index = NgramIndex::build(&records());
        assert_eq!(sorted(intersect_tokens(&["tarte"], &index)), vec![1, 2]);
    }

    #[test]
    fn test_intersect_multiple_tokens() {
        let index = NgramIndex::build(&records());
        let both = intersect_tokens(&["tarte", "pomme"], &index);
        assert_eq!(sorted(both), vec![2]);
        assert_eq!(sorted(intersect_tokens(&["four", "thon"], &index)), vec![1]);
    }

    #[test]
    fn test_intersect_short_tokens_ignored() {
        let index = NgramIndex::build(&records());
        assert_eq!(sorted(intersect_tokens(&["riz", "de"], &index)), vec![3]);
    }

    #[test]
    fn test_intersect_only_short_tokens_is_all() {
        let index = NgramIndex::build(&records());
        assert!(intersect_tokens(&["de", "a", ""], &index).is_all());
        assert!(intersect_tokens::<&str>(&[], &index).is_all());
    }

    #[test]
    fn test_intersect_absent_token_short_circuits() {
        let index = NgramIndex::build(&records());
        let ids = sorted(intersect_tokens(&["tarte", "chocolat"], &index));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_intersect_disjoint_sets_is_empty() {
        let index = NgramIndex::build(&records());
        let ids = sorted(intersect_tokens(&["thon", "riz"], &index));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_candidates_contains() {
        assert!(Candidates::All.contains(RecordId::new(99)));
        let mut set = PostingSet::default();
        set.insert(RecordId::new(1));
        let c = Candidates::Ids(set);
        assert!(c.contains(RecordId::new(1)));
        assert!(!c.contains(RecordId::new(2)));
    }

    #[test]
    fn test_scan_all_matches_across_words() {
        let data = records();
        let hits = scan_all("Crème Pâtissière", &data);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, RecordId::new(1));
    }

    #[test]
    fn test_scan_all_no_match() {
        let data = records();
        assert!(scan_all("gâteau au chocolat", &data).is_empty());
    }

    #[test]
    fn test_scan_all_preserves_order() {
        let data = records();
        let hits: Vec<u32> = scan_all("four", &data)
            .iter()
            .map(|r| r.id.as_u32())
            .collect();
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    fn test_main_query_routes() {
        let data = records();
        let index = NgramIndex::build(&data);

        let q = MainQuery::run("", &data, &index);
        assert_eq!(q.route, Route::Unfiltered);
        assert_eq!(q.ids, None);

        let q = MainQuery::run("ta", &data, &index);
        assert_eq!(q.route, Route::TooShort);
        assert_eq!(q.ids, None);

        let q = MainQuery::run("tarte", &data, &index);
        assert_eq!(q.route, Route::Index);
        assert_eq!(q.ids, Some(vec![RecordId::new(1), RecordId::new(2)]));

        let q = MainQuery::run("crème pâtissière", &data, &index);
        assert_eq!(q.route, Route::Scan);
        assert_eq!(q.ids, Some(vec![RecordId::new(1)]));
    }

    #[test]
    fn test_main_query_index_route_with_only_short_words() {
        let data = records();
        let index = NgramIndex::build(&data);
        // 5 chars but every word is shorter than 3
        let q = MainQuery::run("a b c", &data, &index);
        assert_eq!(q.route, Route::Index);
        assert_eq!(q.ids, None);
    }
}
