//! Core optimizer trait and result types.
//!
//! Every optimization procedure in this library follows the same loop
//! skeleton: evaluate the gradient, update internal state, update the
//! position, notify the observer, test the algorithm's own convergence
//! rule, and repeat until convergence or the iteration budget runs out.
//!
//! Termination policy shared by all procedures: stop early on convergence
//! and report the iteration count, otherwise run exactly `max_iterations`
//! iterations and report non-convergence. Exhausting the budget is a
//! reported outcome, never an error.

use crate::{
    cost_function::CostFunction,
    error::Result,
    observer::{NoOpObserver, ProgressObserver},
    types::{DVector, Scalar},
};
use std::fmt::Debug;
use std::time::Duration;

/// Reason an optimization run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The algorithm's convergence test passed.
    Converged,
    /// The iteration budget was exhausted without convergence.
    MaxIterations,
}

/// Result of an optimization run.
///
/// Carries the final iterate together with convergence diagnostics and
/// computational statistics.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T, P>
where
    T: Scalar,
{
    /// The final position found by the optimizer
    pub point: P,

    /// The objective value at the final position
    pub value: T,

    /// Norm of the last evaluated gradient (absent for zero-iteration runs)
    pub gradient_norm: Option<T>,

    /// Number of iterations performed
    pub iterations: usize,

    /// Total number of objective evaluations
    pub function_evaluations: usize,

    /// Total number of gradient evaluations
    pub gradient_evaluations: usize,

    /// Wall-clock time elapsed during the run
    pub duration: Duration,

    /// Why the run stopped
    pub termination_reason: TerminationReason,

    /// True when the algorithm's convergence test passed before the budget
    pub converged: bool,
}

impl<T, P> OptimizationResult<T, P>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        point: P,
        value: T,
        iterations: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        let converged = matches!(termination_reason, TerminationReason::Converged);

        Self {
            point,
            value,
            gradient_norm: None,
            iterations,
            function_evaluations: 0,
            gradient_evaluations: 0,
            duration,
            termination_reason,
            converged,
        }
    }

    /// Sets the gradient norm at the final position.
    pub fn with_gradient_norm(mut self, norm: T) -> Self {
        self.gradient_norm = Some(norm);
        self
    }

    /// Sets the function evaluation count.
    pub fn with_function_evaluations(mut self, count: usize) -> Self {
        self.function_evaluations = count;
        self
    }

    /// Sets the gradient evaluation count.
    pub fn with_gradient_evaluations(mut self, count: usize) -> Self {
        self.gradient_evaluations = count;
        self
    }
}

/// Universal interface for the multidimensional optimizers.
///
/// Implementations take the initial position by reference and return a
/// fresh result vector; working buffers are owned exclusively by the call
/// and discarded when it returns, so no state crosses invocations.
pub trait Optimizer<T>: Debug
where
    T: Scalar,
{
    /// Returns a human-readable name identifying the algorithm.
    fn name(&self) -> &str;

    /// Minimizes the objective, notifying `observer` after each iteration.
    fn minimize_observed<C, O>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
        observer: &mut O,
    ) -> Result<OptimizationResult<T, DVector<T>>>
    where
        C: CostFunction<T>,
        O: ProgressObserver<T>;

    /// Minimizes the objective without progress reporting.
    fn minimize<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
    ) -> Result<OptimizationResult<T, DVector<T>>>
    where
        C: CostFunction<T>,
    {
        self.minimize_observed(cost_fn, initial_point, &mut NoOpObserver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_converged_flag() {
        let result = OptimizationResult::<f64, f64>::new(
            3.0,
            0.0,
            12,
            Duration::from_millis(1),
            TerminationReason::Converged,
        );
        assert!(result.converged);
        assert_eq!(result.iterations, 12);
        assert!(result.gradient_norm.is_none());

        let result = OptimizationResult::<f64, f64>::new(
            1.0,
            4.0,
            100,
            Duration::from_millis(1),
            TerminationReason::MaxIterations,
        );
        assert!(!result.converged);
    }

    #[test]
    fn test_result_builders() {
        let result = OptimizationResult::<f64, f64>::new(
            0.0,
            0.0,
            5,
            Duration::ZERO,
            TerminationReason::Converged,
        )
        .with_gradient_norm(1e-7)
        .with_function_evaluations(6)
        .with_gradient_evaluations(5);

        assert_eq!(result.gradient_norm, Some(1e-7));
        assert_eq!(result.function_evaluations, 6);
        assert_eq!(result.gradient_evaluations, 5);
    }
}
