// crates/camerconnect-core/src/query.rs

//! The user's current listing criteria.
//!
//! A [`Query`] is rebuilt from UI input on every event (keystroke, select
//! change, page click) and handed to [`crate::engine::run`]. It holds no
//! references to the records it will be applied to.

use crate::text::MatchMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Page size used by the sector listing pages.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(n) => n,
    None => unreachable!(),
};

/// Select values that mean "no location filter".
pub const ALL_LOCATIONS: &[&str] = &[
    "all",
    "tous",
    "toutes",
    "toutes les villes",
    "tous les quartiers",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Highest rating first.
    #[default]
    Rating,
    /// Most reviews first.
    #[serde(alias = "reviews")]
    ReviewCount,
    /// Most interactions first.
    #[serde(alias = "interactions")]
    InteractionCount,
    /// A to Z, case-insensitive.
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Rating,
        SortKey::ReviewCount,
        SortKey::InteractionCount,
        SortKey::Name,
    ];

    /// Label shown next to the result count ("Trié par ...").
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rating => "note",
            SortKey::ReviewCount => "nombre d'avis",
            SortKey::InteractionCount => "nombre d'interactions",
            SortKey::Name => "nom",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Rating => "rating",
            SortKey::ReviewCount => "reviews",
            SortKey::InteractionCount => "interactions",
            SortKey::Name => "name",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected rating, reviews, interactions or name)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" | "note" => Ok(SortKey::Rating),
            "reviews" | "reviewcount" | "review_count" | "avis" => Ok(SortKey::ReviewCount),
            "interactions" | "interactioncount" | "interaction_count" => {
                Ok(SortKey::InteractionCount)
            }
            "name" | "nom" => Ok(SortKey::Name),
            _ => Err(UnknownSortKey(s.to_owned())),
        }
    }
}

/// Listing criteria: search term, sort key, filters, and page position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    #[serde(alias = "searchTerm")]
    pub search: String,
    pub sort: SortKey,
    pub city: Option<String>,
    pub district: Option<String>,
    pub premium_only: bool,
    /// 1-based. Zero and negative values mean page 1.
    pub page: i64,
    pub page_size: NonZeroUsize,
    pub match_mode: MatchMode,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortKey::default(),
            city: None,
            district: None,
            premium_only: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            match_mode: MatchMode::default(),
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort = key;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn premium_only(mut self, yes: bool) -> Self {
        self.premium_only = yes;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, size: NonZeroUsize) -> Self {
        self.page_size = size;
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Search term as typed; `None` when empty. Not trimmed: a leading
    /// space is part of the substring.
    pub fn active_search(&self) -> Option<&str> {
        (!self.search.is_empty()).then_some(self.search.as_str())
    }

    pub fn active_city(&self) -> Option<&str> {
        active_location(self.city.as_deref())
    }

    pub fn active_district(&self) -> Option<&str> {
        active_location(self.district.as_deref())
    }

    /// Same query, different page. Used when paging through results.
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// A location filter is active unless it is blank or one of [`ALL_LOCATIONS`].
fn active_location(value: Option<&str>) -> Option<&str> {
    let v = value?.trim();
    if v.is_empty() || ALL_LOCATIONS.iter().any(|s| s.eq_ignore_ascii_case(v)) {
        None
    } else {
        Some(v)
    }
}
