// crates/camerconnect-core/src/traits.rs

use crate::text::MatchMode;

/// The view of a record that the listing engine needs.
///
/// The engine never touches concrete record types; every page variant (sector
/// listing, favorites, "my businesses") runs the same pipeline over anything
/// that implements this trait.
///
/// Implementors must return already-defaulted values: the sorter treats the
/// numbers as-is and the filter treats the strings as-is.
pub trait Listable {
    fn listing_id(&self) -> &str;
    fn name_str(&self) -> &str;
    fn description_str(&self) -> &str;
    fn location_str(&self) -> &str;
    fn is_premium(&self) -> bool;
    fn rating(&self) -> f64;
    fn review_count(&self) -> u64;
    fn interaction_count(&self) -> u64;

    /// True if name, description or location contains the folded term.
    #[inline]
    fn text_contains(&self, folded_term: &str, mode: MatchMode) -> bool {
        mode.contains(self.name_str(), folded_term)
            || mode.contains(self.description_str(), folded_term)
            || mode.contains(self.location_str(), folded_term)
    }
}

impl<T: Listable + ?Sized> Listable for &T {
    fn listing_id(&self) -> &str {
        (**self).listing_id()
    }
    fn name_str(&self) -> &str {
        (**self).name_str()
    }
    fn description_str(&self) -> &str {
        (**self).description_str()
    }
    fn location_str(&self) -> &str {
        (**self).location_str()
    }
    fn is_premium(&self) -> bool {
        (**self).is_premium()
    }
    fn rating(&self) -> f64 {
        (**self).rating()
    }
    fn review_count(&self) -> u64 {
        (**self).review_count()
    }
    fn interaction_count(&self) -> u64 {
        (**self).interaction_count()
    }
}

/// Name-based matching for things that only have a display name and a
/// description, such as sectors on the dashboard.
pub trait NameMatch {
    fn name_str(&self) -> &str;
    fn description_str(&self) -> &str {
        ""
    }

    /// Substring match on name or description.
    #[inline]
    fn matches(&self, term: &str, mode: MatchMode) -> bool {
        let q = mode.fold(term.trim());
        q.is_empty()
            || mode.contains(self.name_str(), &q)
            || mode.contains(self.description_str(), &q)
    }
}
