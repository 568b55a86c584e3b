// crates/camerconnect-core/src/filter.rs

//! # Predicate Filter
//!
//! Keeps the records that satisfy *all* active predicates of a [`Query`]:
//! free-text search over name/description/location, city and district
//! substring filters, and the premium-only switch. Input order is preserved.

use crate::query::Query;
use crate::traits::Listable;

/// Pre-folded predicate set, so the search term is folded once per run and
/// not once per record.
#[derive(Debug, Clone)]
pub struct Predicates {
    search: Option<String>,
    city: Option<String>,
    district: Option<String>,
    premium_only: bool,
    mode: crate::text::MatchMode,
}

impl Predicates {
    pub fn from_query(query: &Query) -> Self {
        let mode = query.match_mode;
        Self {
            search: query.active_search().map(|s| mode.fold(s)),
            city: query.active_city().map(|s| mode.fold(s)),
            district: query.active_district().map(|s| mode.fold(s)),
            premium_only: query.premium_only,
            mode,
        }
    }

    /// No predicate is active: every record passes.
    pub fn is_noop(&self) -> bool {
        self.search.is_none() && self.city.is_none() && self.district.is_none() && !self.premium_only
    }

    pub fn accepts<T: Listable + ?Sized>(&self, record: &T) -> bool {
        if self.premium_only && !record.is_premium() {
            return false;
        }
        if let Some(term) = &self.search {
            if !record.text_contains(term, self.mode) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !self.mode.contains(record.location_str(), city) {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if !self.mode.contains(record.location_str(), district) {
                return false;
            }
        }
        true
    }
}

/// Stable filter. Returns borrowed records in input order.
pub fn filter_records<'a, T: Listable>(records: &'a [T], query: &Query) -> Vec<&'a T> {
    let predicates = Predicates::from_query(query);
    if predicates.is_noop() {
        return records.iter().collect();
    }
    records.iter().filter(|r| predicates.accepts(*r)).collect()
}
