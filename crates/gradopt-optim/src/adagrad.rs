//! Adagrad: per-coordinate adaptive gradient descent.
//!
//! Each coordinate accumulates its squared gradients, G_i ← G_i + g_i²,
//! and steps by lr/(√G_i + ε)·g_i. Coordinates with a history of large
//! gradients take smaller steps. The run converges when the total applied
//! step Σ|Δ_j| falls below the tolerance.
//!
//! The accumulator only ever grows, so the effective step size shrinks
//! monotonically over a run. This is the expected long-run behavior of the
//! algorithm, not a defect; use RMSProp when it is unwanted.

use crate::utils::{check_gradient_dim, ensure_positive_finite, ensure_tolerance};
use gradopt_core::{
    cost_function::CostFunction,
    error::Result,
    observer::{IterationInfo, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for [`Adagrad`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdagradConfig<T>
where
    T: Scalar,
{
    /// Base learning rate, adapted per coordinate
    pub learning_rate: T,

    /// Small constant ε guarding the division at zero accumulator
    pub epsilon: T,

    /// Iteration budget
    pub max_iterations: usize,

    /// Convergence tolerance on Σ|Δ_j|
    pub tolerance: T,
}

impl<T> Default for AdagradConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            learning_rate: <T as Scalar>::from_f64(0.01),
            epsilon: <T as Scalar>::from_f64(1e-8),
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> AdagradConfig<T>
where
    T: Scalar,
{
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: T) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the numerical-stability epsilon.
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ensure_positive_finite("learning_rate", self.learning_rate)?;
        ensure_positive_finite("epsilon", self.epsilon)?;
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// Adagrad optimizer.
#[derive(Debug, Clone)]
pub struct Adagrad<T>
where
    T: Scalar,
{
    config: AdagradConfig<T>,
}

impl<T> Adagrad<T>
where
    T: Scalar,
{
    /// Creates a new optimizer with the given configuration.
    pub fn new(config: AdagradConfig<T>) -> Self {
        Self { config }
    }

    /// Creates an optimizer with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(AdagradConfig::default())
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &AdagradConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for Adagrad<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Adagrad"
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
        // Accumulated squared gradients; non-decreasing across the run.
        let mut accumulator = DVector::zeros(x.len());
        let mut function_evaluations = 0;
        let mut gradient_evaluations = 0;
        let mut last_value = None;
        let mut last_gradient_norm = None;
        let mut iterations = 0;
        let mut reason = TerminationReason::MaxIterations;

        observer.on_start();

        for t in 1..=self.config.max_iterations {
            let g = cost_fn.gradient(&x)?;
            gradient_evaluations += 1;
            check_gradient_dim(&x, &g)?;

            let mut change = T::zero();
            for i in 0..x.len() {
                accumulator[i] += g[i] * g[i];
                let adapted = self.config.learning_rate
                    / (<T as Float>::sqrt(accumulator[i]) + self.config.epsilon);
                let delta = adapted * g[i];
                x[i] -= delta;
                change += <T as Float>::abs(delta);
            }

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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gradopt_core::cost_function::{FnCost, QuadraticCost};
    use gradopt_core::observer::RecordingObserver;
    use proptest::prelude::*;

    #[test]
    fn test_config_validation() {
        assert!(AdagradConfig::<f64>::default().validate().is_ok());
        assert!(AdagradConfig::<f64>::new()
            .with_epsilon(0.0)
            .validate()
            .is_err());
        assert!(AdagradConfig::<f64>::new()
            .with_learning_rate(-0.01)
            .validate()
            .is_err());
    }

    #[test]
    fn test_converges_on_quadratic() {
        let cost = QuadraticCost::<f64>::simple(2);
        let mut solver = Adagrad::new(
            AdagradConfig::new()
                .with_learning_rate(0.5)
                .with_max_iterations(5000)
                .with_tolerance(1e-8),
        );
        let x0 = DVector::from_vec(vec![1.0, -1.0]);

        let result = solver.minimize(&cost, &x0).unwrap();
        assert!(result.converged);
        assert!(result.point.norm() < 1e-2);
    }

    #[test]
    fn test_steps_shrink_under_constant_gradient() {
        // A linear objective has a constant gradient, so the growing
        // accumulator is the only influence on the step: the applied delta
        // must shrink every iteration.
        let cost = FnCost::new(
            |x: &DVector<f64>| x[0] + x[1],
            |_: &DVector<f64>| DVector::from_vec(vec![1.0, 1.0]),
        );
        let mut solver = Adagrad::new(
            AdagradConfig::new()
                .with_learning_rate(0.1)
                .with_max_iterations(50)
                .with_tolerance(0.0),
        );
        let mut recorder = RecordingObserver::new();
        let x0 = DVector::zeros(2);

        let _ = solver.minimize_observed(&cost, &x0, &mut recorder).unwrap();

        let deltas = recorder.diagnostics();
        assert_eq!(deltas.len(), 50);
        for pair in deltas.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_zero_budget_is_identity() {
        let cost = QuadraticCost::<f64>::simple(3);
        let mut solver = Adagrad::new(AdagradConfig::new().with_max_iterations(0));
        let x0 = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        let result = solver.minimize(&cost, &x0).unwrap();
        assert!(!result.converged);
        assert_relative_eq!(result.point, x0);
    }

    proptest! {
        /// The accumulator recurrence is non-decreasing for any gradient
        /// sequence.
        #[test]
        fn prop_accumulator_non_decreasing(
            gradients in proptest::collection::vec(-100.0f64..100.0, 1..50)
        ) {
            let mut accumulator = 0.0f64;
            for g in gradients {
                let next = accumulator + g * g;
                prop_assert!(next >= accumulator);
                accumulator = next;
            }
        }
    }
}
