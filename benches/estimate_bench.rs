use anonrec::algorithms::parse_observations;
use anonrec::services::model_store::ServingModel;
use anonrec::{estimate_anonymous_score, AnonymousEstimator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn random_model(features: usize, num_items: usize) -> ServingModel {
    let mut rng = StdRng::seed_from_u64(42);
    let items: HashMap<String, Vec<f32>> = (0..num_items)
        .map(|i| {
            let vector = (0..features).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
            (i.to_string(), vector)
        })
        .collect();
    ServingModel::new(features, true, items).unwrap()
}

fn benchmark_parse(c: &mut Criterion) {
    let tokens: Vec<String> = (0..50).map(|i| format!("{}={}.5", i, i % 7)).collect();

    c.bench_function("parse_observations_50", |b| {
        b.iter(|| black_box(parse_observations(&tokens).unwrap()));
    });
}

fn benchmark_estimate(c: &mut Criterion) {
    let model = random_model(100, 10_000);
    let estimator = AnonymousEstimator::default();
    let tokens: Vec<String> = (0..20).map(|i| format!("{}={}", i * 37, 1 + i % 3)).collect();
    let observations = parse_observations(&tokens).unwrap();

    c.bench_function("build_features_f100_k20", |b| {
        b.iter(|| black_box(estimator.estimate(&observations, &model).unwrap()));
    });

    c.bench_function("estimate_anonymous_score_f100_k20", |b| {
        b.iter(|| black_box(estimate_anonymous_score(&estimator, &model, "5", &tokens).unwrap()));
    });
}

fn benchmark_model_build(c: &mut Criterion) {
    c.bench_function("serving_model_build_f50_n2000", |b| {
        b.iter(|| black_box(random_model(50, 2_000)));
    });
}

criterion_group!(benches, benchmark_parse, benchmark_estimate, benchmark_model_build);
criterion_main!(benches);
