//! Scalar gradient descent on f(x) = (x - 3)^2.

use gradopt::prelude::*;

fn main() {
    let f = FnScalar::new(|x: f64| (x - 3.0) * (x - 3.0), |x: f64| 2.0 * (x - 3.0));

    let solver = ScalarGradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.1)
            .with_max_iterations(100)
            .with_tolerance(1e-6),
    );

    let result = solver
        .minimize_observed(&f, 0.0, &mut PrintProgress::default())
        .expect("configuration is valid");

    println!("Minimum found at x = {:.6}", result.point);
}
