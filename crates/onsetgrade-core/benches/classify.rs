use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use onsetgrade_core::aggregate::aggregate;
use onsetgrade_core::classifier::CaseWindowClassifier;
use onsetgrade_core::model::{CaseId, CaseResult, PredictionSet};

fn onset() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 20).unwrap()
}

fn daily_predictions(days: i64) -> PredictionSet {
    PredictionSet::from_dates((-days..days).map(|d| onset() + Duration::days(d)).collect())
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let classifier = CaseWindowClassifier::default();
    let case = CaseId::from("bench");

    group.bench_function("single_hit", |b| {
        let set = PredictionSet::from_dates(vec![onset()]);
        b.iter(|| classifier.classify(black_box(&case), black_box(&set), onset(), 60))
    });

    group.bench_function("daily_alarms_120_days", |b| {
        let set = daily_predictions(60);
        b.iter(|| classifier.classify(black_box(&case), black_box(&set), onset(), 120))
    });

    group.bench_function("parse_120_rows", |b| {
        let raw: Vec<String> = (0..120)
            .map(|d| (onset() + Duration::days(d)).format("%Y-%m-%d").to_string())
            .collect();
        b.iter(|| PredictionSet::parse(black_box(&raw)))
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let classifier = CaseWindowClassifier::default();
    let set = daily_predictions(10);
    let results: Vec<CaseResult> = (0..1000)
        .map(|i| classifier.classify(&CaseId::new(format!("case-{i}")), &set, onset(), 90))
        .collect();

    c.bench_function("aggregate_1000_cases", |b| {
        b.iter(|| aggregate(black_box(&results)))
    });
}

criterion_group!(benches, bench_classify, bench_aggregate);
criterion_main!(benches);
