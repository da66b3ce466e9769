//! Softmax regression on the three-class toy dataset.

use gradopt::prelude::*;

fn main() {
    env_logger::init();

    let data = Dataset::<f64>::three_class();
    let cost = SoftmaxCost::new(&data, 3).expect("labels fit the class count");

    let mut solver = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.1)
            .with_max_iterations(1000)
            .with_tolerance(1e-6),
    );

    let result = solver
        .minimize_observed(
            &cost,
            &DVector::zeros(cost.weight_dim()),
            &mut PrintProgress::new(100),
        )
        .expect("configuration is valid");

    let d = data.n_features();
    println!("Final weights:");
    for c in 0..3 {
        let row: Vec<String> = (0..d)
            .map(|j| format!("{:.4}", result.point[c * d + j]))
            .collect();
        println!("Class {c}: {}", row.join(" "));
    }
    println!("Training accuracy: {:.3}", cost.accuracy(&result.point));
}
