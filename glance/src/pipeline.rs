//! Filter and sort stages.
//!
//! Both stages work on index views into an immutable item slice: they select and reorder
//! indexes, never items. Every recomputation produces a fresh allocation, so consumers can
//! detect changes by pointer identity (`Arc::ptr_eq`).

use std::cmp::Ordering;
use std::sync::Arc;

use crate::{FieldValue, Query, Record, SortDirection};

/// Returns `true` when any field of `item` contains `needle_lower` (already lowercased).
pub fn matches_search<T: Record + ?Sized>(item: &T, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    let mut found = false;
    item.for_each_field(&mut |_, value| {
        if !found && value.contains_lowercase(needle_lower) {
            found = true;
        }
    });
    found
}

/// Keeps the candidates whose item matches `search_text` case-insensitively.
///
/// Empty search text keeps every candidate in its original order.
pub fn filter_indices<T: Record>(items: &[T], candidates: &[usize], search_text: &str) -> Vec<usize> {
    if search_text.is_empty() {
        return candidates.to_vec();
    }
    let needle = search_text.to_lowercase();
    candidates
        .iter()
        .copied()
        .filter(|&i| items.get(i).is_some_and(|item| matches_search(item, &needle)))
        .collect()
}

/// Orders two optional field values, placing missing values last regardless of direction.
pub fn compare_fields(
    a: Option<&FieldValue<'_>>,
    b: Option<&FieldValue<'_>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.total_cmp(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts `indices` in place by the value of `key` on each item.
///
/// The sort is stable: items with equal keys keep their relative order.
pub fn sort_indices<T: Record>(
    items: &[T],
    indices: &mut [usize],
    key: &str,
    direction: SortDirection,
) {
    let mut keyed: Vec<(Option<FieldValue<'_>>, usize)> = indices
        .iter()
        .map(|&i| (items.get(i).and_then(|item| item.field(key)), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_fields(a.as_ref(), b.as_ref(), direction));
    for (slot, (_, i)) in indices.iter_mut().zip(keyed) {
        *slot = i;
    }
}

/// Runs filter then sort for `query` over `candidates`.
pub fn process<T: Record>(items: &[T], candidates: &[usize], query: &Query) -> Arc<[usize]> {
    let mut out = filter_indices(items, candidates, &query.search_text);
    if let Some(key) = query.sort_key.as_deref() {
        sort_indices(items, &mut out, key, query.sort_direction);
    }
    gtrace!(
        candidates = candidates.len(),
        kept = out.len(),
        sorted = query.sort_key.is_some(),
        "pipeline::process"
    );
    out.into()
}
