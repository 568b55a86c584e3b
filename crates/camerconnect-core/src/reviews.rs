// crates/camerconnect-core/src/reviews.rs

//! Customer reviews shown on a business page.

use crate::normalize::MAX_RATING;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// Whole stars, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: usize,
    /// 0 when there are no reviews.
    pub average: f64,
    /// `histogram[i]` is the number of `i + 1`-star reviews.
    pub histogram: [usize; 5],
}

impl ReviewSummary {
    /// Ratings outside 1..=5 are clamped into range.
    pub fn from_slice(reviews: &[Review]) -> Self {
        let mut summary = ReviewSummary::default();
        let mut total = 0u64;
        for r in reviews {
            let stars = r.rating.clamp(1, MAX_RATING as u8);
            summary.histogram[usize::from(stars - 1)] += 1;
            total += u64::from(stars);
        }
        summary.count = reviews.len();
        if summary.count > 0 {
            summary.average = total as f64 / summary.count as f64;
        }
        summary
    }

    /// Share of `stars`-star reviews, in percent.
    pub fn percent(&self, stars: u8) -> f64 {
        if self.count == 0 || !(1..=5).contains(&stars) {
            return 0.0;
        }
        self.histogram[usize::from(stars - 1)] as f64 * 100.0 / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: rating.to_string(),
            author: "Marie K.".into(),
            rating,
            comment: String::new(),
            date: "2024-01-10".into(),
        }
    }

    #[test]
    fn empty_summary_is_zero() {
        let s = ReviewSummary::from_slice(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.average, 0.0);
        assert_eq!(s.percent(5), 0.0);
    }

    #[test]
    fn histogram_and_average() {
        let s = ReviewSummary::from_slice(&[review(5), review(4), review(5), review(0)]);
        assert_eq!(s.histogram, [1, 0, 0, 1, 2]);
        assert_eq!(s.count, 4);
        assert!((s.average - 3.75).abs() < 1e-9);
        assert_eq!(s.percent(5), 50.0);
    }
}
