//! Nesterov accelerated gradient descent.
//!
//! Like classical momentum, but the gradient is evaluated at the lookahead
//! point x + γ·v instead of at x — the velocity is corrected with knowledge
//! of where it is about to carry the iterate. Update and convergence test
//! match the momentum solver: v ← γ·v − lr·g, x ← x + v, stop when
//! Σ|v_j| < tol.

use crate::momentum::MomentumConfig;
use crate::utils::{check_gradient_dim, l1_norm};
use gradopt_core::{
    cost_function::CostFunction,
    error::Result,
    observer::{IterationInfo, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use std::time::Instant;

/// Nesterov accelerated gradient descent.
///
/// Shares [`MomentumConfig`] with the classical momentum solver; the two
/// differ only in where the gradient is evaluated.
#[derive(Debug, Clone)]
pub struct NesterovDescent<T>
where
    T: Scalar,
{
    config: MomentumConfig<T>,
}

impl<T> NesterovDescent<T>
where
    T: Scalar,
{
    /// Creates a new solver with the given configuration.
    pub fn new(config: MomentumConfig<T>) -> Self {
        Self { config }
    }

    /// Creates a solver with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MomentumConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &MomentumConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for NesterovDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Nesterov Accelerated Gradient"
    }

    fn minimize_observed<C, O>(
        &mut self,
        cost_fn: &C,
        initial_point: &DVector<T>,
        observer: &mut O,
    ) -> Result<OptimizationResult<T, DVector<T>>>
    where
        C: CostFunction<T>,
        O: ProgressObserver<T>,
    {
        self.config.validate()?;
        let start_time = Instant::now();

        let mut x = initial_point.clone();
        let mut velocity = DVector::zeros(x.len());
        let mut function_evaluations = 0;
        let mut gradient_evaluations = 0;
        let mut last_value = None;
        let mut last_gradient_norm = None;
        let mut iterations = 0;
        let mut reason = TerminationReason::MaxIterations;

        observer.on_start();

        for t in 1..=self.config.max_iterations {
            // Per-iteration transient; the lookahead never becomes the
            // iterate.
            let lookahead = &x + &velocity * self.config.momentum;
            let g = cost_fn.gradient(&lookahead)?;
            gradient_evaluations += 1;
            check_gradient_dim(&x, &g)?;

            velocity *= self.config.momentum;
            velocity.axpy(-self.config.learning_rate, &g, T::one());
            x += &velocity;

            let change = l1_norm(&velocity);
            let value = cost_fn.cost(&x)?;
            function_evaluations += 1;

            last_value = Some(value);
            last_gradient_norm = Some(g.norm());
            iterations = t;

            observer.on_iteration(&IterationInfo {
                iteration: t,
                value,
                diagnostic: change,
            });

            if change < self.config.tolerance {
                reason = TerminationReason::Converged;
                break;
            }
        }

        let value = match last_value {
            Some(v) => v,
            None => {
                function_evaluations += 1;
                cost_fn.cost(&x)?
            }
        };

        observer.on_finish(iterations, reason == TerminationReason::Converged);

        let mut result = OptimizationResult::new(x, value, iterations, start_time.elapsed(), reason)
            .with_function_evaluations(function_evaluations)
            .with_gradient_evaluations(gradient_evaluations);
        if let Some(norm) = last_gradient_norm {
            result = result.with_gradient_norm(norm);
        }
        Ok(result)
    }
}
