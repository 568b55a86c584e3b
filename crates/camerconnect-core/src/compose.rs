// crates/camerconnect-core/src/compose.rs

//! # View Composer
//!
//! Presentation grouping of one page: premium businesses first, then regular
//! ones, each group keeping its relative order. Runs *after* pagination, so
//! it never changes counts or page boundaries.

use crate::traits::Listable;
use serde::{Deserialize, Serialize};

/// Whether a view distinguishes subscription tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Premium group, then regular group.
    #[default]
    Tiered,
    /// The page as-is.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListingView<T> {
    Tiered { premium: Vec<T>, regular: Vec<T> },
    Flat { items: Vec<T> },
}

impl<T> ListingView<T> {
    pub fn len(&self) -> usize {
        match self {
            ListingView::Tiered { premium, regular } => premium.len() + regular.len(),
            ListingView::Flat { items } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in display order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            ListingView::Tiered { premium, regular } => Box::new(premium.iter().chain(regular)),
            ListingView::Flat { items } => Box::new(items.iter()),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListingView::Tiered {
                mut premium,
                regular,
            } => {
                premium.extend(regular);
                premium
            }
            ListingView::Flat { items } => items,
        }
    }
}

/// Stable partition of a page according to `grouping`.
pub fn compose<T: Listable>(items: Vec<T>, grouping: Grouping) -> ListingView<T> {
    match grouping {
        Grouping::Flat => ListingView::Flat { items },
        Grouping::Tiered => {
            let (premium, regular) = items.into_iter().partition(|r| r.is_premium());
            ListingView::Tiered { premium, regular }
        }
    }
}
