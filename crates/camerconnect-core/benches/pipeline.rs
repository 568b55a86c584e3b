use camerconnect_core::{run, BusinessRecord, Grouping, MatchMode, Query, SortKey};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const CITIES: [&str; 4] = ["Dschang", "Douala", "Yaoundé", "Bafoussam"];

fn directory(n: usize) -> Vec<BusinessRecord> {
    (0..n)
        .map(|i| {
            let city = CITIES[i % CITIES.len()];
            BusinessRecord {
                description: format!("Entreprise numéro {i} à {city}"),
                location: format!("{city}, Quartier {}", i % 7),
                city: Some(city.to_owned()),
                rating: (i % 50) as f64 / 10.0,
                review_count: (i * 7 % 300) as u64,
                interaction_count: (i * 13 % 1000) as u64,
                premium: i % 5 == 0,
                ..BusinessRecord::new(i.to_string(), format!("Commerce {i}"))
            }
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let records = directory(5_000);

    c.bench_function("pipeline.default_first_page", |b| {
        let q = Query::new();
        b.iter(|| run(black_box(&records), &q, Grouping::Tiered).total_matches());
    });

    c.bench_function("pipeline.search_city_by_name", |b| {
        let q = Query::new().search("douala").city("Douala").sort_by(SortKey::Name).page(3);
        b.iter(|| run(black_box(&records), &q, Grouping::Flat).total_matches());
    });

    c.bench_function("pipeline.folded_search_premium", |b| {
        let q = Query::new()
            .search("yaounde")
            .match_mode(MatchMode::Folded)
            .premium_only(true)
            .sort_by(SortKey::InteractionCount);
        b.iter(|| run(black_box(&records), &q, Grouping::Tiered).total_matches());
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
