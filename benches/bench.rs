// Criterion benchmarks for Scheme Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use scheme_match::core::{Matcher, analyze_message, scoring::score_scheme};
use scheme_match::models::{Eligibility, SchemeRecord, ScoringWeights, UserProfile};
use scheme_match::services::SchemeCatalog;
use serde_json::Map;
use std::sync::Arc;

const CATEGORIES: [&str; 7] = [
    "Agriculture",
    "Healthcare",
    "Housing",
    "Employment",
    "Education",
    "Social Security",
    "Financial Inclusion",
];

fn create_scheme(id: usize) -> SchemeRecord {
    SchemeRecord {
        id: id.to_string(),
        name: format!("Scheme {}", id),
        name_hi: None,
        description: String::new(),
        description_hi: None,
        benefits: String::new(),
        benefits_hi: None,
        eligibility_text: String::new(),
        eligibility_text_hi: None,
        category: CATEGORIES[id % CATEGORIES.len()].to_string(),
        active: id % 11 != 0,
        eligibility: Eligibility {
            occupation: Some(vec!["farmer".to_string(), "labourer".to_string()]),
            age: Some(format!("{}-{} years", 18 + id % 10, 40 + id % 30)),
            land_ownership: Some("yes".to_string()),
            economic_status: (id % 2 == 0).then(|| "below poverty line".to_string()),
            location: Some(if id % 3 == 0 { "urban" } else { "rural" }.to_string()),
            bank_account: Some(id % 4 == 0),
        },
        extra: Map::new(),
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        age: Some(35),
        occupation: Some("farmer".to_string()),
        location: Some("rural".to_string()),
        income: Some("BPL".to_string()),
        land_ownership: Some(true),
        is_farmer: Some(true),
        has_bank_account: Some(true),
        ..UserProfile::default()
    }
}

fn bench_score_scheme(c: &mut Criterion) {
    let scheme = create_scheme(1);
    let profile = create_profile();
    let weights = ScoringWeights::default();

    c.bench_function("score_scheme", |b| {
        b.iter(|| score_scheme(black_box(&scheme), black_box(&profile), black_box(&weights)));
    });
}

fn bench_analyze_message(c: &mut Criterion) {
    let profile = UserProfile::default();

    c.bench_function("analyze_message", |b| {
        b.iter(|| {
            analyze_message(
                black_box("मैं किसान हूँ and I need a loan for my crop"),
                black_box(&profile),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let profile = create_profile();

    let mut group = c.benchmark_group("matching");

    for scheme_count in [10, 50, 100, 500, 1000].iter() {
        let catalog = SchemeCatalog::new((0..*scheme_count).map(create_scheme).collect());
        let matcher = Matcher::with_default_weights(Arc::new(catalog));

        group.bench_with_input(
            BenchmarkId::new("match_profile", scheme_count),
            scheme_count,
            |b, _| {
                b.iter(|| matcher.match_profile(black_box(&profile), black_box(None)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_score_scheme,
    bench_analyze_message,
    bench_matching
);

criterion_main!(benches);
