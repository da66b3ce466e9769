//! Armijo line-search descent on f(x) = (x0 - 1)^2 + (x1 + 2)^2.

use gradopt::prelude::*;

fn main() {
    let cost = FnCost::new(
        |x: &DVector<f64>| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2),
        |x: &DVector<f64>| DVector::from_vec(vec![2.0 * (x[0] - 1.0), 2.0 * (x[1] + 2.0)]),
    );

    let mut solver = ArmijoDescent::new(
        ArmijoDescentConfig::new()
            .with_initial_step_size(1.0)
            .with_shrink_factor(0.5)
            .with_sufficient_decrease(1e-4)
            .with_max_iterations(100)
            .with_tolerance(1e-6),
    );

    let result = solver
        .minimize_observed(&cost, &DVector::zeros(2), &mut PrintProgress::default())
        .expect("configuration is valid");

    println!(
        "Minimum found at x = [{:.6}, {:.6}]",
        result.point[0], result.point[1]
    );
}
