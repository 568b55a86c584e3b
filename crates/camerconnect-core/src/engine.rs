// crates/camerconnect-core/src/engine.rs

//! # Listing Query Engine
//!
//! One pipeline for every listing page:
//!
//! ```text
//! records -> filter -> sort -> paginate -> compose -> view
//! ```
//!
//! Every stage borrows; the record slice is never mutated or cloned. Re-run
//! the whole pipeline on each input event; it is cheap and re-entrant, so
//! concurrent runs with different queries cannot interfere.

use crate::compose::{compose, Grouping, ListingView};
use crate::filter::filter_records;
use crate::paginate::{paginate, total_pages, PageMeta};
use crate::query::{Query, SortKey};
use crate::sort::sorted;
use crate::traits::Listable;
use serde::Serialize;
use tracing::debug;

/// Result of one pipeline run.
///
/// "Nothing matched" is a normal outcome with its own variant, so pages can
/// render a "no results" state distinct from a load error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ListingOutcome<'a, T> {
    NoMatches { total_records: usize },
    Page(ListingPage<'a, T>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage<'a, T> {
    pub view: ListingView<&'a T>,
    pub meta: PageMeta,
    /// Page number as the caller asked for it, before clamping.
    pub requested_page: i64,
    pub sort: SortKey,
}

impl<'a, T> ListingOutcome<'a, T> {
    pub fn page(&self) -> Option<&ListingPage<'a, T>> {
        match self {
            ListingOutcome::Page(p) => Some(p),
            ListingOutcome::NoMatches { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListingOutcome::NoMatches { .. })
    }

    pub fn total_matches(&self) -> usize {
        self.page().map_or(0, |p| p.meta.total_matches)
    }

    /// Records of the current page in display order.
    pub fn records(&self) -> Vec<&'a T> {
        self.page()
            .map(|p| p.view.iter().copied().collect())
            .unwrap_or_default()
    }
}

/// Filter + sort only: the full ordered match set, unpaginated.
pub fn ordered_matches<'a, T: Listable>(records: &'a [T], query: &Query) -> Vec<&'a T> {
    sorted(filter_records(records, query), query.sort)
}

/// Run the full pipeline.
///
/// The requested page is clamped into `[1, total_pages]`, so a stale page
/// number (say, page 4 after a search narrowed results to one page) lands on
/// the last page instead of an empty one.
pub fn run<'a, T: Listable>(
    records: &'a [T],
    query: &Query,
    grouping: Grouping,
) -> ListingOutcome<'a, T> {
    let ordered = ordered_matches(records, query);
    let pages = total_pages(ordered.len(), query.page_size);

    if pages == 0 {
        debug!(total = records.len(), search = %query.search, "listing has no matches");
        return ListingOutcome::NoMatches {
            total_records: records.len(),
        };
    }

    let clamped = query.page.clamp(1, i64::try_from(pages).unwrap_or(i64::MAX));
    let (view, meta) = paginate(&ordered, clamped, query.page_size)
        .map_items(|items| compose(items, grouping));

    debug!(
        total = records.len(),
        matches = meta.total_matches,
        page = meta.page,
        pages = meta.total_pages,
        sort = %query.sort,
        "listing page composed"
    );

    ListingOutcome::Page(ListingPage {
        view,
        meta,
        requested_page: query.page,
        sort: query.sort,
    })
}
