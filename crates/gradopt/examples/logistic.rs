//! Logistic regression on the two-cluster toy dataset with a train/test
//! split.

use gradopt::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let mut data = Dataset::<f64>::two_cluster();
    data.normalize();

    let mut rng = SmallRng::seed_from_u64(42);
    let (train, test) = data
        .train_test_split(0.25, &mut rng)
        .expect("valid split ratio");

    let cost = LogisticCost::new(&train).expect("training set is non-empty");
    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.5)
            .with_max_iterations(2000)
            .with_tolerance(1e-10),
    );

    let result = solver
        .minimize_observed(&cost, &DVector::zeros(train.n_features()), &mut PrintProgress::new(100))
        .expect("configuration is valid");

    println!("Train accuracy: {:.3}", cost.accuracy(&result.point));
    let test_cost = LogisticCost::new(&test).expect("test set is non-empty");
    println!("Test accuracy:  {:.3}", test_cost.accuracy(&result.point));
}
