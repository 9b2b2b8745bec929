//! Filter pipeline
//!
//! The main keyword always runs first, against the full record set. Typed
//! filters then narrow the result left to right, in keyword-list order:
//!
//! ```text
//! result = filters.fold(main_query(records), narrow)
//! ```
//!
//! Typed filters are plain folded substring tests and never touch the
//! n-gram index, so they commute with one another.

use crate::index::NgramIndex;
use crate::normalize::fold;
use crate::query::MainQuery;
use pantry_core::{Field, Keyword, Record, RecordId};
use rustc_hash::FxHashSet;

/// Run the whole pipeline over `records`
///
/// With no keyword entries the input is returned unchanged. If the list
/// holds several main entries the first one is used.
pub fn apply_filters<'a>(
    records: &'a [Record],
    keywords: &[Keyword],
    index: &NgramIndex,
) -> Vec<&'a Record> {
    let main = keywords
        .iter()
        .find(|k| k.is_main())
        .map(|k| k.text.as_str())
        .unwrap_or("");

    let main_query = MainQuery::run(main, records, index);
    let current = restrict(records, main_query.ids.as_deref());
    apply_typed_filters(current, keywords)
}

/// Keep only records whose id is listed; `None` keeps everything
pub fn restrict<'a>(records: &'a [Record], ids: Option<&[RecordId]>) -> Vec<&'a Record> {
    match ids {
        None => records.iter().collect(),
        Some(ids) => {
            let wanted: FxHashSet<RecordId> = ids.iter().copied().collect();
            records.iter().filter(|r| wanted.contains(&r.id)).collect()
        }
    }
}

/// Apply every typed filter in order, skipping main entries
pub fn apply_typed_filters<'a>(
    current: Vec<&'a Record>,
    keywords: &[Keyword],
) -> Vec<&'a Record> {
    keywords
        .iter()
        .fold(current, |records, keyword| match keyword.kind.field() {
            None => records,
            Some(field) => narrow(records, field, &keyword.text),
        })
}

/// Keep the records whose `field` contains `text`
pub fn narrow<'a>(records: Vec<&'a Record>, field: Field, text: &str) -> Vec<&'a Record> {
    let needle = fold(text);
    records
        .into_iter()
        .filter(|record| field_contains(record, field, &needle))
        .collect()
}

/// Whether any value of `field` contains an already-folded needle
pub fn field_contains(record: &Record, field: Field, needle: &str) -> bool {
    record
        .field_values(field)
        .into_iter()
        .any(|value| fold(value).contains(needle))
}
