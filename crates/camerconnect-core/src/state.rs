// crates/camerconnect-core/src/state.rs

//! Page load state and stale-response protection.
//!
//! Every navigation takes a [`LoadTicket`]. When a fetch completes, its
//! result is applied only if the ticket is still the newest one; a slower
//! response for a page the user already left is dropped.

use crate::error::DirectoryError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Plain number, for handing a ticket across an FFI boundary.
    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        LoadTicket(raw)
    }
}

impl LoadTracker {
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new load, invalidating every earlier ticket.
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Store `value` into `slot` if `ticket` is current. Returns whether it did.
    pub fn apply<T>(&self, ticket: LoadTicket, slot: &mut T, value: T) -> bool {
        if self.is_current(ticket) {
            *slot = value;
            true
        } else {
            debug!(ticket = ticket.0, "discarding stale response");
            false
        }
    }
}

/// What a listing page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum PageState {
    #[default]
    Loading,
    Loaded,
    /// Loaded, but nothing to show.
    Empty,
    Failed(String),
}

impl PageState {
    /// State for a finished load. `is_empty` tells whether it produced nothing.
    pub fn settle<T>(result: &Result<T, DirectoryError>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(v) if is_empty(v) => PageState::Empty,
            Ok(_) => PageState::Loaded,
            Err(e) => PageState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_invalidates_older() {
        let tracker = LoadTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn stale_response_is_not_applied() {
        let tracker = LoadTracker::new();
        let mut shown = "none";

        let sector_a = tracker.begin();
        let sector_b = tracker.begin();

        assert!(tracker.apply(sector_b, &mut shown, "B"));
        assert!(!tracker.apply(sector_a, &mut shown, "A"));
        assert_eq!(shown, "B");
    }

    #[test]
    fn settle_distinguishes_empty_from_failed() {
        let ok: Result<Vec<u8>, DirectoryError> = Ok(vec![]);
        assert_eq!(PageState::settle(&ok, Vec::is_empty), PageState::Empty);

        let ok: Result<Vec<u8>, DirectoryError> = Ok(vec![1]);
        assert_eq!(PageState::settle(&ok, Vec::is_empty), PageState::Loaded);

        let err: Result<Vec<u8>, DirectoryError> = Err(DirectoryError::NonJson("<html>".into()));
        assert!(matches!(PageState::settle(&err, Vec::is_empty), PageState::Failed(_)));
        assert!(PageState::default().is_loading());
    }

    #[test]
    fn tracker_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoadTracker>();
    }
}
