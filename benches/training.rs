use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use credit_scoring::evaluation::roc_curve;
use credit_scoring::training::{ForestConfig, RandomForest};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn create_loan_data(n_rows: usize, n_features: usize) -> (Array2<f64>, Array1<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let x = Array2::from_shape_fn((n_rows, n_features), |_| rng.gen::<f64>() * 10.0);

    // Default when the first two features are jointly high, plus label noise
    let y = x
        .rows()
        .into_iter()
        .map(|row| {
            let risky = row[0] + row[1] > 10.0;
            let flip = rng.gen::<f64>() < 0.05;
            if risky != flip { 1.0 } else { 0.0 }
        })
        .collect();

    (x, y)
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10); // Fewer samples for training benchmarks

    for n_rows in [1000, 5000, 10000].iter() {
        let data = create_loan_data(*n_rows, 10);

        group.bench_with_input(
            BenchmarkId::new("fit", n_rows),
            &data,
            |b, (x, y)| {
                b.iter(|| {
                    let mut forest = ForestConfig::new().with_n_estimators(20).build(42);
                    forest.fit(black_box(x), black_box(y)).unwrap();
                    forest
                })
            },
        );
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    // Train model once
    let (x_train, y_train) = create_loan_data(5000, 10);
    let mut forest = RandomForest::new(50).with_random_state(42);
    forest.fit(&x_train, &y_train).unwrap();

    for n_rows in [100, 1000, 10000].iter() {
        let (x_test, y_test) = create_loan_data(*n_rows, 10);

        group.bench_with_input(
            BenchmarkId::new("predict_proba", n_rows),
            &x_test,
            |b, x| b.iter(|| forest.predict_proba(black_box(x)).unwrap()),
        );

        let scores = forest.predict_proba(&x_test).unwrap().column(1).to_owned();
        group.bench_with_input(
            BenchmarkId::new("roc_curve", n_rows),
            &(y_test, scores),
            |b, (y, s)| b.iter(|| roc_curve(black_box(y), black_box(s), 1.0).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_training, bench_prediction);
criterion_main!(benches);
