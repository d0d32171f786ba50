//! Integration tests for splitting, forest training and evaluation

use credit_scoring::evaluation::{evaluate, roc_auc_score};
use credit_scoring::pipeline::predict;
use credit_scoring::training::{
    shuffle_split_indices, train_test_split, Classifier, DecisionTree, ForestConfig, MaxFeatures,
    RandomForest,
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Two noisy clusters; the label follows the first two features
fn create_classification_data(n: usize, seed: u64) -> (Array2<f64>, Array1<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut x = Array2::zeros((n, 4));
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let label = (i % 2) as f64;
        x[[i, 0]] = label * 3.0 + rng.gen::<f64>();
        x[[i, 1]] = label * 2.0 + rng.gen::<f64>();
        x[[i, 2]] = rng.gen::<f64>();
        x[[i, 3]] = rng.gen::<f64>();
        y[i] = label;
    }
    (x, y)
}

// ============================================================================
// Split
// ============================================================================

#[test]
fn test_split_is_deterministic_and_exhaustive() {
    let (train_a, test_a) = shuffle_split_indices(100, 0.2, 42).unwrap();
    let (train_b, test_b) = shuffle_split_indices(100, 0.2, 42).unwrap();
    assert_eq!(train_a, train_b);
    assert_eq!(test_a, test_b);

    let mut all: Vec<usize> = train_a.into_iter().chain(test_a).collect();
    all.sort_unstable();
    assert_eq!(all, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_split_shapes() {
    let (x, y) = create_classification_data(100, 1);
    let split = train_test_split(&x, &y, 0.2, 42).unwrap();
    assert_eq!(split.x_train.dim(), (80, 4));
    assert_eq!(split.x_test.dim(), (20, 4));
    assert_eq!(split.y_train.len(), 80);
    assert_eq!(split.y_test.len(), 20);
}

// ============================================================================
// Forest
// ============================================================================

#[test]
fn test_forest_learns_separable_data() {
    let (x, y) = create_classification_data(200, 3);
    let split = train_test_split(&x, &y, 0.2, 42).unwrap();

    let mut forest = ForestConfig::new().with_n_estimators(30).build(42);
    forest.fit(&split.x_train, &split.y_train).unwrap();

    let predictions = predict(&forest, &split.x_test).unwrap();
    let eval = evaluate(&split.y_test, &predictions.labels, &predictions.scores, 1.0).unwrap();

    assert!(eval.metrics.accuracy > 0.9, "accuracy {}", eval.metrics.accuracy);
    assert!(eval.metrics.roc_auc > 0.9, "roc_auc {}", eval.metrics.roc_auc);
}

#[test]
fn test_informative_features_rank_first() {
    let (x, y) = create_classification_data(200, 5);

    let mut forest = RandomForest::new(30)
        .with_max_features(MaxFeatures::All)
        .with_random_state(42);
    forest.fit(&x, &y).unwrap();

    let imp = forest.feature_importances().unwrap();
    assert!((imp.sum() - 1.0).abs() < 1e-9);
    assert!(imp[0] + imp[1] > imp[2] + imp[3]);
}

#[test]
fn test_forest_probabilities_in_unit_interval() {
    let (x, y) = create_classification_data(60, 7);
    let mut forest = RandomForest::new(10).with_random_state(42);
    forest.fit(&x, &y).unwrap();

    let proba = forest.predict_proba(&x).unwrap();
    assert_eq!(proba.dim(), (60, 2));
    assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn test_single_class_training_is_degenerate() {
    let (x, _) = create_classification_data(40, 9);
    let y = Array1::zeros(40);

    let mut forest = RandomForest::new(10).with_random_state(42);
    forest.fit(&x, &y).unwrap();

    let predictions = predict(&forest, &x).unwrap();
    assert!(predictions.degenerate);
    assert_eq!(predictions.scores, Array1::<f64>::zeros(40));
    assert!(forest.feature_importances().unwrap().iter().all(|v| *v == 0.0));
}

#[test]
fn test_classifier_trait_object() {
    let (x, y) = create_classification_data(50, 11);
    let mut model: Box<dyn Classifier> = Box::new(DecisionTree::new().with_max_depth(3));
    model.fit(&x, &y).unwrap();

    assert_eq!(model.classes(), &[0.0, 1.0]);
    let predictions = predict(model.as_ref(), &x).unwrap();
    assert!(!predictions.degenerate);
    assert_eq!(predictions.scores.len(), 50);
}

#[test]
fn test_constant_scores_score_chance() {
    let y = ndarray::array![0.0, 1.0, 1.0, 0.0, 1.0];
    let scores = Array1::zeros(5);
    assert!((roc_auc_score(&y, &scores, 1.0).unwrap() - 0.5).abs() < 1e-12);
}
