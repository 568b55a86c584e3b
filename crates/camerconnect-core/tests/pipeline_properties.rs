use camerconnect_core::engine::ordered_matches;
use camerconnect_core::filter::filter_records;
use camerconnect_core::{run, BusinessRecord, Grouping, ListingOutcome, Query, SortKey};
use proptest::prelude::*;
use proptest::test_runner::Config;
use std::num::NonZeroUsize;

const CITIES: [&str; 3] = ["Dschang", "Douala", "Yaoundé"];

fn record_strategy() -> impl Strategy<Value = (String, u8, bool, usize, u64)> {
    ("[a-d]{1,6}", 0_u8..=50, any::<bool>(), 0_usize..CITIES.len(), 0_u64..20)
}

fn build(rows: Vec<(String, u8, bool, usize, u64)>) -> Vec<BusinessRecord> {
    rows
        .into_iter()
        .enumerate()
        .map(|(i, (name, rating, premium, city, reviews))| BusinessRecord {
            rating: f64::from(rating) / 10.0,
            premium,
            review_count: reviews,
            location: format!("{}, Centre", CITIES[city]),
            ..BusinessRecord::new(i.to_string(), name)
        })
        .collect()
}

fn sort_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn premium_only_is_a_premium_subset(rows in prop::collection::vec(record_strategy(), 0..40), term in "[a-d]{0,2}") {
        let records = build(rows);
        let all = filter_records(&records, &Query::new().search(term.clone()));
        let premium = filter_records(&records, &Query::new().search(term).premium_only(true));
        prop_assert!(premium.iter().all(|r| r.premium));
        prop_assert!(premium.iter().all(|p| all.iter().any(|a| a.id == p.id)));
        prop_assert_eq!(premium.len(), all.iter().filter(|r| r.premium).count());
    }

    #[test]
    fn filtering_is_idempotent(rows in prop::collection::vec(record_strategy(), 0..40), term in "[a-d]{0,2}", city in 0_usize..3) {
        let records = build(rows);
        let q = Query::new().search(term).city(CITIES[city]);
        let once: Vec<BusinessRecord> = filter_records(&records, &q).into_iter().cloned().collect();
        let twice = filter_records(&once, &q);
        prop_assert_eq!(once.len(), twice.len());
        prop_assert!(once.iter().zip(twice).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn pages_cover_every_match_exactly_once(
        rows in prop::collection::vec(record_strategy(), 0..60),
        size in 1_usize..10,
        sort in sort_strategy(),
    ) {
        let records = build(rows);
        let q = Query::new().sort_by(sort).page_size(NonZeroUsize::new(size).unwrap());
        let expected: Vec<&str> = ordered_matches(&records, &q).iter().map(|r| r.id.as_str()).collect();

        let mut seen: Vec<&str> = Vec::new();
        let mut page = 1;
        loop {
            match run(&records, &q.with_page(page), Grouping::Flat) {
                ListingOutcome::NoMatches { .. } => break,
                ListingOutcome::Page(p) => {
                    prop_assert_eq!(p.meta.page, page as usize);
                    seen.extend(p.view.iter().map(|r| r.id.as_str()));
                    if page as usize >= p.meta.total_pages {
                        break;
                    }
                }
            }
            page += 1;
        }
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn equal_ratings_keep_input_order(rows in prop::collection::vec(record_strategy(), 0..40)) {
        let records = build(rows);
        let sorted = ordered_matches(&records, &Query::new().sort_by(SortKey::Rating));
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].rating >= pair[1].rating);
            if pair[0].rating == pair[1].rating {
                let a: usize = pair[0].id.parse().unwrap();
                let b: usize = pair[1].id.parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn tiered_pages_put_premium_first(rows in prop::collection::vec(record_strategy(), 1..40), size in 1_usize..8) {
        let records = build(rows);
        let q = Query::new().page_size(NonZeroUsize::new(size).unwrap());
        let out = run(&records, &q, Grouping::Tiered);
        let shown = out.records();
        let first_regular = shown.iter().position(|r| !r.premium).unwrap_or(shown.len());
        prop_assert!(shown[first_regular..].iter().all(|r| !r.premium));
    }
}
