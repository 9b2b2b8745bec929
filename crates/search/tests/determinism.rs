//! Determinism and Consistency Tests
//!
//! The index and every query must depend only on the record set, never on
//! record order, hash seeds or how many times a query has run.

use pantry_core::{Collection, Record};
use pantry_search::{NgramIndex, QueryState, Searcher};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const RECIPES: &str = include_str!("../../../data/recipes.json");

fn records() -> Vec<Record> {
    Collection::from_json_str(RECIPES)
        .unwrap()
        .records()
        .to_vec()
}

fn reversed() -> Vec<Record> {
    let mut records = records();
    records.reverse();
    records
}

// ============================================================================
// Index
// ============================================================================

#[test]
fn build_is_independent_of_record_order() {
    let forward = NgramIndex::build(&records());
    assert_eq!(forward, NgramIndex::build(&reversed()));
}

#[test]
fn build_is_idempotent() {
    let records = records();
    assert_eq!(NgramIndex::build(&records), NgramIndex::build(&records));
}

#[test]
fn artifact_bytes_are_stable() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");

    NgramIndex::build(&records()).save(&a).unwrap();
    NgramIndex::build(&reversed()).save(&b).unwrap();

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn artifact_lists_are_sorted() {
    let artifact = NgramIndex::build(&reversed()).to_artifact();
    for ids in artifact.values() {
        assert!(!ids.is_empty());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn repeated_queries_agree() {
    let searcher = Searcher::new(Collection::from_json_str(RECIPES).unwrap());
    for keyword in ["tarte", "crème pâtissière", "coco", "ta", ""] {
        let state = QueryState::new().with_main(keyword);
        let first = searcher.search(&state).ids;
        for _ in 0..5 {
            assert_eq!(searcher.search(&state).ids, first, "keyword {:?}", keyword);
        }
    }
}

#[test]
fn results_follow_collection_order() {
    let forward = Searcher::new(Collection::new(records()).unwrap());
    let backward = Searcher::new(Collection::new(reversed()).unwrap());
    let state = QueryState::new().with_main("chocolat");

    let mut a = forward.search(&state).ids;
    let b = backward.search(&state).ids;
    assert_ne!(a, b);
    a.reverse();
    assert_eq!(a, b);
}
