//! Adam on f(x) = (x0 - 1)^2 + (x1 + 2)^2 with the textbook parameters.

use gradopt::prelude::*;

fn main() {
    let cost = FnCost::new(
        |x: &DVector<f64>| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2),
        |x: &DVector<f64>| DVector::from_vec(vec![2.0 * (x[0] - 1.0), 2.0 * (x[1] + 2.0)]),
    );

    let mut solver = Adam::new(
        AdamConfig::new()
            .with_learning_rate(0.1)
            .with_beta1(0.9)
            .with_beta2(0.999)
            .with_epsilon(1e-8)
            .with_max_iterations(1000)
            .with_tolerance(1e-6),
    );

    let result = solver
        .minimize_observed(&cost, &DVector::zeros(2), &mut PrintProgress::new(10))
        .expect("configuration is valid");

    println!(
        "Minimum found at x = [{:.6}, {:.6}] after {} iterations",
        result.point[0], result.point[1], result.iterations
    );
}
