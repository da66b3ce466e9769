//! Gradient-descent optimization in Rust.
//!
//! `gradopt` bundles a family of first-order optimizers — vanilla gradient
//! descent (scalar and multidimensional), Armijo backtracking line search,
//! classical and Nesterov momentum, Adagrad, RMSProp and Adam — together
//! with the toy regression models (linear/MSE, logistic, softmax) and
//! dataset plumbing used to exercise them.
//!
//! # Quick start
//!
//! ```
//! use gradopt::prelude::*;
//!
//! // Minimize f(x) = (x0 - 1)^2 + (x1 + 2)^2 with Adam.
//! let cost = FnCost::new(
//!     |x: &DVector<f64>| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2),
//!     |x: &DVector<f64>| DVector::from_vec(vec![2.0 * (x[0] - 1.0), 2.0 * (x[1] + 2.0)]),
//! );
//!
//! let mut solver = Adam::new(AdamConfig::new().with_learning_rate(0.1));
//! let result = solver.minimize(&cost, &DVector::zeros(2)).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.point[0] - 1.0).abs() < 1e-3);
//! ```

pub use gradopt_core as core;
pub use gradopt_models as models;
pub use gradopt_optim as optim;

// Re-export the linear algebra backend.
pub use nalgebra;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use gradopt::prelude::*;
/// ```
pub mod prelude {
    pub use gradopt_core::prelude::*;
    pub use gradopt_models::{
        sigmoid, softmax, Dataset, DatasetError, LogisticCost, MseCost, SoftmaxCost,
    };
    pub use gradopt_optim::{
        Adagrad, AdagradConfig, Adam, AdamConfig, ArmijoDescent, ArmijoDescentConfig,
        GradientDescent, GradientDescentConfig, MomentumConfig, MomentumDescent, NesterovDescent,
        RmsProp, RmsPropConfig, ScalarGradientDescent,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_exports() {
        let _config = AdamConfig::<f64>::new();
        let _data = Dataset::<f64>::two_cluster();
        let _search = BacktrackingLineSearch::new();
    }
}
