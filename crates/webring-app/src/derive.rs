// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use feruca::Collator;

use crate::{Catalog, Category, Entry, SortDirection, SortKey};

/// Derives the displayed list: category filter, then search filter, then a
/// stable sort. Always returns a fresh vector; `catalog` is only read.
pub fn derive(
    catalog: &Catalog,
    category: Category,
    search_text: &str,
    sort_key: SortKey,
    sort_direction: SortDirection,
) -> Vec<Entry> {
    let query = normalize_query(search_text);
    let mut entries = catalog
        .entries()
        .iter()
        .filter(|entry| in_category(entry, category))
        .filter(|entry| query.as_deref().is_none_or(|query| matches_search(entry, query)))
        .cloned()
        .collect::<Vec<_>>();

    let mut collator = Collator::default();
    // `sort_by` is stable; reversing the comparator keeps ties in filtered order.
    entries.sort_by(|left, right| {
        let ordering = compare_entries(&mut collator, left, right, sort_key);
        match sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    entries
}

/// Number of entries shown under `category` before any search filtering.
pub fn category_count(catalog: &Catalog, category: Category) -> usize {
    catalog
        .entries()
        .iter()
        .filter(|entry| in_category(entry, category))
        .count()
}

/// Substring match against lowercase name, website, program, and the decimal
/// year. `query` must already be trimmed and lowercased.
pub fn matches_search(entry: &Entry, query: &str) -> bool {
    entry.name.to_lowercase().contains(query)
        || entry.website.to_lowercase().contains(query)
        || entry.program.to_lowercase().contains(query)
        || entry.year.to_string().contains(query)
}

/// Orders two entries by `key`. Text keys are lowercased and then compared
/// with Unicode collation (CLDR root order), so accented letters sort next to
/// their base letter and punctuation is ignored at the first level.
pub fn compare_entries(
    collator: &mut Collator,
    left: &Entry,
    right: &Entry,
    key: SortKey,
) -> Ordering {
    match key {
        SortKey::Name => compare_text(collator, &left.name, &right.name),
        SortKey::Program => compare_text(collator, &left.program, &right.program),
        SortKey::Year => left.year.cmp(&right.year),
    }
}

fn in_category(entry: &Entry, category: Category) -> bool {
    category.is_all() || category.matches_program(&entry.program)
}

fn normalize_query(search_text: &str) -> Option<String> {
    let trimmed = search_text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn compare_text(collator: &mut Collator, left: &str, right: &str) -> Ordering {
    collator.collate(left.to_lowercase().as_str(), right.to_lowercase().as_str())
}
