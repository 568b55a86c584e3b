// crates/camerconnect-core/src/sort.rs

//! # Comparator/Sorter
//!
//! Numeric keys sort descending (best first), names sort ascending. The sort
//! is stable: records with equal keys keep their filtered input order.
//! `slice::sort_by` is a stable merge sort, which is what carries that
//! guarantee here; do not switch to `sort_unstable_by`.

use crate::query::SortKey;
use crate::text::fold_key;
use crate::traits::Listable;
use std::cmp::Ordering;

/// Compare two records for `key`. `Less` means `a` is listed first.
pub fn compare<T: Listable + ?Sized>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::Rating => rating_key(b.rating()).total_cmp(&rating_key(a.rating())),
        SortKey::ReviewCount => b.review_count().cmp(&a.review_count()),
        SortKey::InteractionCount => b.interaction_count().cmp(&a.interaction_count()),
        SortKey::Name => compare_names(a.name_str(), b.name_str()),
    }
}

/// `Listable` values skip the normalizer, so `-0.0` and NaN can still show
/// up here. Both rank as a missing rating.
fn rating_key(r: f64) -> f64 {
    if r.is_nan() || r == 0.0 {
        0.0
    } else {
        r
    }
}

/// A-Z ignoring case and accents, so `École` files under E. Names that fold
/// alike fall back to a lowercase compare; names equal ignoring case compare
/// `Equal` and the stable sort keeps their input order.
fn compare_names(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    })
}

/// Sort borrowed records in place, stably.
pub fn sort_records<T: Listable + ?Sized>(records: &mut [&T], key: SortKey) {
    records.sort_by(|a, b| compare(*a, *b, key));
}

/// Owned-vector convenience: consume, sort, return.
pub fn sorted<'a, T: Listable + ?Sized>(mut records: Vec<&'a T>, key: SortKey) -> Vec<&'a T> {
    sort_records(&mut records, key);
    records
}
