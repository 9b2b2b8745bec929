//! Scenario tests against the 50-recipe reference dataset
//!
//! Every index-routed result is checked against a naive oracle that folds
//! each field and looks for the normalized keyword as a plain substring.
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test -p pantry-search --test reference_dataset
//! ```

use pantry_core::{Collection, Field, Keyword, KeywordKind, Record, RecordId};
use pantry_search::{
    apply_filters, fold, normalize, scan_all, NgramIndex, QueryState, Route, SearchHint,
    Searcher,
};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const RECIPES: &str = include_str!("../../../data/recipes.json");

fn collection() -> Collection {
    Collection::from_json_str(RECIPES).unwrap()
}

fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<u32> {
    records.into_iter().map(|r| r.id.as_u32()).collect()
}

fn outcome_ids(searcher: &Searcher, state: &QueryState) -> Vec<u32> {
    searcher
        .search(state)
        .ids
        .iter()
        .map(RecordId::as_u32)
        .collect()
}

/// Records where the normalized keyword occurs in any folded field
fn naive_substring(collection: &Collection, keyword: &str) -> Vec<u32> {
    let needle = normalize(keyword);
    let hits = collection
        .iter()
        .filter(|r| r.searchable_text().any(|t| fold(t).contains(&needle)));
    ids(hits)
}

// ============================================================================
// Main query
// ============================================================================

#[test]
fn dataset_has_fifty_records() {
    let collection = collection();
    assert_eq!(collection.len(), 50);
    assert!(collection.get(RecordId::new(1)).is_some());
    assert!(collection.get(RecordId::new(50)).is_some());
}

#[test]
fn tarte_uses_index_and_matches_oracle() {
    let collection = collection();
    let expected = naive_substring(&collection, "tarte");
    let searcher = Searcher::new(collection);

    let state = QueryState::new().with_main("tarte");
    let outcome = searcher.search(&state);
    assert_eq!(outcome.stats.route, Route::Index);
    assert_eq!(outcome_ids(&searcher, &state), expected);
    assert_eq!(expected, vec![5, 6, 27, 41]);
}

#[test]
fn chocolat_uses_index_and_matches_oracle() {
    let collection = collection();
    let expected = naive_substring(&collection, "chocolat");
    let searcher = Searcher::new(collection);

    assert_eq!(
        outcome_ids(&searcher, &QueryState::new().with_main("chocolat")),
        expected
    );
    assert_eq!(expected, vec![15, 20, 22, 29, 30, 42]);
}

#[test]
fn creme_patissiere_routes_to_scan() {
    let collection = collection();
    let expected = naive_substring(&collection, "crème pâtissière");
    let searcher = Searcher::new(collection);

    let state = QueryState::new().with_main("crème pâtissière");
    let outcome = searcher.search(&state);
    assert_eq!(outcome.stats.route, Route::Scan);
    assert_eq!(outcome_ids(&searcher, &state), expected);
    assert_eq!(expected, vec![17]);
}

#[test]
fn multi_word_keyword_intersects() {
    let searcher = Searcher::new(collection());
    // 13 chars: still index-routed
    assert_eq!(
        outcome_ids(&searcher, &QueryState::new().with_main("salade de riz")),
        vec![4]
    );
}

#[test]
fn long_keyword_without_match_is_empty() {
    let collection = collection();
    assert!(scan_all("gâteau au yaourt vegan", collection.iter()).is_empty());

    let searcher = Searcher::new(collection);
    let outcome = searcher.search(&QueryState::new().with_main("gâteau au yaourt vegan"));
    assert_eq!(outcome.stats.route, Route::Scan);
    assert!(outcome.is_empty());
    assert_eq!(outcome.hint, Some(SearchHint::NoMatches));
}

#[test]
fn short_keyword_does_not_filter() {
    let searcher = Searcher::new(collection());
    let outcome = searcher.search(&QueryState::new().with_main("ta"));
    assert_eq!(outcome.len(), 50);
    assert_eq!(outcome.hint, Some(SearchHint::TooShort { min_chars: 3 }));
}

// ============================================================================
// Filter pipeline
// ============================================================================

#[test]
fn empty_keyword_list_returns_everything() {
    let collection = collection();
    let index = NgramIndex::build(&collection);
    let out = apply_filters(collection.records(), &[], &index);
    assert_eq!(ids(out), ids(collection.iter()));
}

#[test]
fn farine_ingredient_filter() {
    let collection = collection();
    let index = NgramIndex::build(&collection);
    let out = apply_filters(
        collection.records(),
        &[Keyword::new("farine", KeywordKind::Ingredient)],
        &index,
    );

    let uses_farine = |r: &&Record| r.ingredient_names().any(|n| fold(n).contains("farine"));
    let expected = ids(collection.iter().filter(uses_farine));
    assert_eq!(ids(out), expected);
    assert_eq!(expected, vec![15, 17, 18, 21, 22, 29, 30, 31, 32, 33, 42]);
}

#[test]
fn typed_filters_commute_on_dataset() {
    let searcher = Searcher::new(collection());
    let a = QueryState::new()
        .with_keyword("sucre", KeywordKind::Ingredient)
        .with_keyword("fouet", KeywordKind::Tool);
    let b = QueryState::new()
        .with_keyword("fouet", KeywordKind::Tool)
        .with_keyword("sucre", KeywordKind::Ingredient);

    let expected = vec![14, 15, 17, 20, 29, 31, 32, 42, 43, 49];
    assert_eq!(outcome_ids(&searcher, &a), expected);
    assert_eq!(outcome_ids(&searcher, &b), expected);
}

#[test]
fn removing_a_filter_restores_previous_result() {
    let searcher = Searcher::new(collection());
    let mut state = QueryState::new().with_main("tarte");
    let before = outcome_ids(&searcher, &state);

    state.add_keyword("blender", KeywordKind::Appliance);
    assert!(outcome_ids(&searcher, &state).is_empty());

    assert!(state.remove_keyword("blender", KeywordKind::Appliance));
    assert_eq!(outcome_ids(&searcher, &state), before);
}

// ============================================================================
// Cache and inventory
// ============================================================================

#[test]
fn repeated_main_keyword_hits_cache() {
    let searcher = Searcher::new(collection());
    let state = QueryState::new().with_main("chocolat");

    let first = searcher.search(&state);
    let second = searcher.search(&state);
    assert!(!first.stats.cache_hit);
    assert!(second.stats.cache_hit);
    assert_eq!(first.ids, second.ids);

    // case differs: separate entry
    searcher.search(&QueryState::new().with_main("Chocolat"));
    assert_eq!(searcher.cache_stats().entries, 2);
}

#[test]
fn appliance_inventory_is_deduplicated() {
    let searcher = Searcher::new(collection());
    let appliances: Vec<String> = searcher
        .inventory(&QueryState::new(), Field::Appliance)
        .into_iter()
        .map(|v| fold(&v))
        .collect();
    assert_eq!(
        appliances,
        vec![
            "blender",
            "casserole",
            "cocotte",
            "couscoussier",
            "cuiseur de riz",
            "four",
            "poele",
            "poele a crepe",
            "saladier",
        ]
    );
}

#[test]
fn inventory_follows_current_filters() {
    let searcher = Searcher::new(collection());
    let state = QueryState::new().with_main("tarte");
    let appliances = searcher.inventory(&state, Field::Appliance);
    let appliances: Vec<String> = appliances.into_iter().collect();
    assert_eq!(appliances, vec!["four"]);
}

// ============================================================================
// Index artifact
// ============================================================================

#[test]
fn saved_index_serves_identical_results() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.json");

    let built = NgramIndex::build(&collection());
    built.save(&path).unwrap();
    let loaded = NgramIndex::load(&path).unwrap();
    assert_eq!(loaded, built);

    let fresh = Searcher::new(collection());
    let preloaded = Searcher::with_index(collection(), loaded).unwrap();
    for keyword in ["tarte", "coco", "pommes de terre", "brownie", "riz"] {
        let state = QueryState::new().with_main(keyword);
        assert_eq!(
            outcome_ids(&fresh, &state),
            outcome_ids(&preloaded, &state),
            "keyword {keyword}"
        );
    }
}
