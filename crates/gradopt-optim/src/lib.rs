//! Gradient-descent optimization algorithms.
//!
//! This crate provides the concrete optimization procedures of the
//! `gradopt` family. Each is a self-contained iterative solver over a
//! caller-supplied cost/gradient pair, with its own accumulator state and
//! its own convergence rule:
//!
//! - **Gradient descent**: fixed-step descent, scalar and vector forms
//! - **Armijo descent**: step sizes from a backtracking line search
//! - **Momentum / Nesterov**: velocity-accumulating descent, with optional
//!   lookahead gradient evaluation
//! - **Adagrad / RMSProp**: per-coordinate adaptive steps over accumulated
//!   or exponentially averaged squared gradients
//! - **Adam**: bias-corrected first and second moment estimates
//!
//! # Examples
//!
//! ```
//! use gradopt_core::cost_function::QuadraticCost;
//! use gradopt_core::optimizer::Optimizer;
//! use gradopt_core::types::DVector;
//! use gradopt_optim::{GradientDescent, GradientDescentConfig};
//!
//! let cost = QuadraticCost::<f64>::simple(2);
//! let mut solver = GradientDescent::new(
//!     GradientDescentConfig::new()
//!         .with_learning_rate(0.1)
//!         .with_max_iterations(500)
//!         .with_tolerance(1e-10),
//! );
//!
//! let x0 = DVector::from_vec(vec![1.0, -1.0]);
//! let result = solver.minimize(&cost, &x0).unwrap();
//! assert!(result.converged);
//! ```

pub mod adagrad;
pub mod adam;
pub mod armijo;
pub mod gd;
pub mod momentum;
pub mod nesterov;
pub mod rmsprop;
pub mod utils;

// Re-export main optimizers for convenience
pub use adagrad::{Adagrad, AdagradConfig};
pub use adam::{Adam, AdamConfig};
pub use armijo::{ArmijoDescent, ArmijoDescentConfig};
pub use gd::{GradientDescent, GradientDescentConfig, ScalarGradientDescent};
pub use momentum::{MomentumConfig, MomentumDescent};
pub use nesterov::NesterovDescent;
pub use rmsprop::{RmsProp, RmsPropConfig};

// Re-export commonly used items from core
pub use gradopt_core::{
    line_search::{BacktrackingLineSearch, LineSearchParams},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
};
