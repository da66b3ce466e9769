//! End-to-end regression tests: the toy models trained with the real
//! optimizers.

use approx::assert_relative_eq;
use gradopt_core::{
    observer::RecordingObserver,
    optimizer::Optimizer,
    types::DVector,
};
use gradopt_models::{Dataset, LogisticCost, MseCost, SoftmaxCost};
use gradopt_optim::{GradientDescent, GradientDescentConfig};

#[test]
fn test_linear_regression_recovers_line() {
    // y = 2 + 3x with no noise; MSE descent recovers the coefficients.
    let xs = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
    let data = Dataset::<f64>::from_rows(
        xs.iter().map(|&x| vec![x]).collect(),
        xs.iter().map(|&x| 2.0 + 3.0 * x).collect(),
    )
    .unwrap();
    let cost = MseCost::new(&data).unwrap();

    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.05)
            .with_max_iterations(20000)
            .with_tolerance(1e-14),
    );
    let result = solver.minimize(&cost, &DVector::zeros(2)).unwrap();

    assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-2);
    assert_relative_eq!(result.point[1], 3.0, epsilon = 1e-2);
    assert!(result.value < 1e-3);
}

#[test]
fn test_logistic_regression_separates_clusters() {
    let data = Dataset::<f64>::two_cluster();
    let cost = LogisticCost::new(&data).unwrap();

    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.5)
            .with_max_iterations(2000)
            .with_tolerance(1e-12),
    );
    let result = solver.minimize(&cost, &DVector::zeros(2)).unwrap();

    assert_relative_eq!(cost.accuracy(&result.point), 1.0);
    // Positive feature weight: larger x means class 1.
    assert!(result.point[1] > 0.0);
}

#[test]
fn test_softmax_training_loss_decreases() {
    // 3-class linearly separable toy dataset: the training loss trends
    // monotonically downward over 1000 iterations (small fluctuations
    // allowed).
    let data = Dataset::<f64>::three_class();
    let cost = SoftmaxCost::new(&data, 3).unwrap();

    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.1)
            .with_max_iterations(1000)
            .with_tolerance(0.0),
    );
    let mut recorder = RecordingObserver::new();
    let w0 = DVector::zeros(cost.weight_dim());

    let result = solver
        .minimize_observed(&cost, &w0, &mut recorder)
        .unwrap();

    let values = recorder.values();
    assert_eq!(values.len(), 1000);
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-6, "loss jumped: {} -> {}", pair[0], pair[1]);
    }
    assert!(values[999] < values[0] * 0.5);
    assert_relative_eq!(cost.accuracy(&result.point), 1.0);
}

#[test]
fn test_split_then_train_generalizes() {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    let mut data = Dataset::<f64>::two_cluster();
    data.normalize();
    let mut rng = SmallRng::seed_from_u64(42);
    let (train, test) = data.train_test_split(0.25, &mut rng).unwrap();

    let train_cost = LogisticCost::new(&train).unwrap();
    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.5)
            .with_max_iterations(2000)
            .with_tolerance(1e-12),
    );
    let result = solver
        .minimize(&train_cost, &DVector::zeros(train.n_features()))
        .unwrap();

    let test_cost = LogisticCost::new(&test).unwrap();
    assert_relative_eq!(test_cost.accuracy(&result.point), 1.0);
}
