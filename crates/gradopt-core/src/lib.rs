//! Core traits and types for gradient-descent optimization.
//!
//! This crate provides the foundational pieces shared by every optimizer in
//! the `gradopt` family: the objective-function contract, error types, the
//! optimizer trait with its result types, progress observation, and the
//! backtracking line search.
//!
//! # Key Concepts
//!
//! - **Cost functions**: caller-supplied evaluation/gradient pairs; no
//!   automatic differentiation.
//! - **Optimizers**: self-contained iterative procedures, each owning its
//!   per-call accumulator state and its own convergence rule.
//! - **Observers**: injectable per-iteration reporting, keeping the core
//!   free of I/O.
//!
//! # Modules
//!
//! - [`cost_function`]: objective-function contracts and test objectives
//! - [`error`]: error types for configuration and contract violations
//! - [`line_search`]: Armijo backtracking line search
//! - [`observer`]: progress-observation traits and implementations
//! - [`optimizer`]: optimizer trait, results, termination reasons
//! - [`types`]: scalar abstraction and vector aliases

pub mod cost_function;
pub mod error;
pub mod line_search;
pub mod observer;
pub mod optimizer;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use gradopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cost_function::{
        CostFunction, CountingCost, DerivativeChecker, FnCost, FnScalar, QuadraticCost,
        ScalarFunction,
    };
    pub use crate::error::{OptimizerError, Result};
    pub use crate::line_search::{
        BacktrackingLineSearch, LineSearchParams, LineSearchResult,
    };
    pub use crate::observer::{
        IterationInfo, NoOpObserver, PrintProgress, ProgressObserver, RecordingObserver,
    };
    pub use crate::optimizer::{OptimizationResult, Optimizer, TerminationReason};
    pub use crate::types::{DMatrix, DVector, Scalar};
}
