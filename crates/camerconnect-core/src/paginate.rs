// crates/camerconnect-core/src/paginate.rs

//! # Paginator
//!
//! Total over every integer page number: `<= 0` reads as page 1, anything past
//! the last page is an empty slice. Clamping the UI control is the caller's
//! job (the engine does it, see [`crate::engine`]).

use serde::Serialize;
use std::num::NonZeroUsize;

/// One page of an ordered sequence plus the numbers needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page that was sliced, after treating `<= 0` as 1.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Reshape the items, keeping the page metadata.
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> U) -> (U, PageMeta) {
        let meta = PageMeta {
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_matches: self.total_matches,
        };
        (f(self.items), meta)
    }
}

/// Page numbers without the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// `ceil(len / page_size)`, 0 for an empty sequence.
#[inline]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Normalize a user page number: everything below 1 becomes 1.
#[inline]
pub fn page_index(page: i64) -> usize {
    if page < 1 {
        1
    } else {
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}

/// Slice `[(p-1)*size, p*size)` out of `items`, clipped to bounds.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: NonZeroUsize) -> Page<T> {
    let page = page_index(page);
    let size = page_size.get();
    let len = items.len();

    let start = (page - 1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size: size,
        total_pages: total_pages(len, page_size),
        total_matches: len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn thirteen_records_six_per_page() {
        let items: Vec<u32> = (1..=13).collect();
        let p1 = paginate(&items, 1, nz(6));
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p1.items, vec![1, 2, 3, 4, 5, 6]);
        let p3 = paginate(&items, 3, nz(6));
        assert_eq!(p3.items, vec![13]);
        let p4 = paginate(&items, 4, nz(6));
        assert!(p4.is_empty());
        assert_eq!(p4.total_pages, 3);
        assert_eq!(p4.total_matches, 13);
    }

    #[test]
    fn zero_and_negative_pages_read_as_first() {
        let items: Vec<u32> = (1..=4).collect();
        assert_eq!(paginate(&items, 0, nz(3)).items, vec![1, 2, 3]);
        assert_eq!(paginate(&items, -7, nz(3)).items, vec![1, 2, 3]);
        assert_eq!(paginate(&items, -7, nz(3)).page, 1);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let items: Vec<u32> = (1..=4).collect();
        assert!(paginate(&items, i64::MAX, nz(usize::MAX)).is_empty());
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let p = paginate::<u32>(&[], 1, nz(6));
        assert_eq!(p.total_pages, 0);
        assert!(p.is_empty());
        assert!(!p.has_next());
        assert!(!p.has_previous());
    }

    #[test]
    fn pager_flags() {
        let items: Vec<u32> = (1..=10).collect();
        let p = paginate(&items, 2, nz(4));
        assert!(p.has_previous());
        assert!(p.has_next());
        let last = paginate(&items, 3, nz(4));
        assert!(!last.has_next());
    }
}
