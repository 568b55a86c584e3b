// crates/camerconnect-core/src/text.rs

//! Case folding helpers used by the predicate filter and the name sort.

use serde::{Deserialize, Serialize};

/// How search terms are compared against record text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Lowercase both sides, then plain substring match.
    #[default]
    Exact,
    /// Transliterate to ASCII before lowercasing, so `Yaoundé` matches `yaounde`.
    Folded,
}

impl MatchMode {
    #[inline]
    pub fn fold(self, s: &str) -> String {
        match self {
            MatchMode::Exact => s.to_lowercase(),
            MatchMode::Folded => fold_key(s),
        }
    }

    /// `needle` must already be folded with the same mode.
    #[inline]
    pub fn contains(self, haystack: &str, folded_needle: &str) -> bool {
        self.fold(haystack).contains(folded_needle)
    }
}

/// Convert a string into a folded key suitable for comparison.
///
/// 1. Transliterate Unicode to ASCII (`Éducation` -> `Education`)
/// 2. Lowercase
///
/// ```rust
/// use camerconnect_core::text::fold_key;
///
/// assert_eq!(fold_key("Santé"), "sante");
/// assert_eq!(fold_key("Bonabéri"), "bonaberi");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Equality after [`fold_key`] on both sides.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}
