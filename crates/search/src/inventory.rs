//! Inventory queries for filter pickers
//!
//! Lists the distinct values of one field over whatever record set is
//! currently shown. Values are lowercased; two values that differ only by
//! accents count once, keeping the first spelling seen.

use crate::filter::field_contains;
use crate::normalize::fold;
use pantry_core::{Field, Record};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct lowercased values of `field`, deduplicated diacritic-insensitively
pub fn distinct_values<'a, I>(records: I, field: Field) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut by_folded: BTreeMap<String, String> = BTreeMap::new();
    for record in records {
        for value in record.field_values(field) {
            let lowered = value.to_lowercase();
            by_folded.entry(fold(&lowered)).or_insert(lowered);
        }
    }
    by_folded.into_values().collect()
}

/// Inventory entries containing what the user typed in the picker
pub fn narrow_inventory<'a>(values: &'a BTreeSet<String>, typed: &str) -> Vec<&'a str> {
    let needle = fold(typed);
    values
        .iter()
        .filter(|value| fold(value).contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Number of records in `records` whose `field` contains `value`
pub fn value_count<'a, I>(records: I, field: Field, value: &str) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = fold(value);
    records
        .into_iter()
        .filter(|record| field_contains(record, field, &needle))
        .count()
}
