//! Vanilla gradient descent, scalar and multidimensional.
//!
//! Both solvers take a fixed step against the gradient each iteration:
//! x ← x − lr·g. They differ in their convergence tests:
//!
//! - [`ScalarGradientDescent`] stops when the position moved less than the
//!   tolerance: |x_new − x| < tol.
//! - [`GradientDescent`] stops when the squared norm of the position
//!   drifted less than the tolerance: |‖x_new‖² − ‖x‖²| < tol.
//!
//! The vector rule is a deliberately cheap proxy for movement, not a true
//! position-delta norm, and it is intentionally NOT unified with the scalar
//! rule. The asymmetry is a fixed design choice: near points of equal norm
//! the proxy can fire earlier than a per-coordinate test would, and callers
//! tuning tolerances rely on the existing behavior.

use crate::utils::{check_gradient_dim, ensure_positive_finite, ensure_tolerance};
use gradopt_core::{
    cost_function::{CostFunction, ScalarFunction},
    error::Result,
    observer::{IterationInfo, NoOpObserver, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Configuration shared by the scalar and multidimensional solvers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Step-size scale applied to the gradient
    pub learning_rate: T,

    /// Iteration budget; a zero budget returns the initial point unchanged
    pub max_iterations: usize,

    /// Convergence tolerance for the solver's movement test
    pub tolerance: T,
}

impl<T> Default for GradientDescentConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            learning_rate: <T as Scalar>::from_f64(0.01),
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> GradientDescentConfig<T>
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
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// Gradient descent on a one-dimensional objective.
#[derive(Debug, Clone)]
pub struct ScalarGradientDescent<T>
where
    T: Scalar,
{
    config: GradientDescentConfig<T>,
}

impl<T> ScalarGradientDescent<T>
where
    T: Scalar,
{
    /// Creates a new scalar solver with the given configuration.
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }

    /// Returns the solver name.
    pub fn name(&self) -> &str {
        "Gradient Descent (scalar)"
    }

    /// Minimizes the function starting from `initial`.
    pub fn minimize<F>(&self, function: &F, initial: T) -> Result<OptimizationResult<T, T>>
    where
        F: ScalarFunction<T>,
    {
        self.minimize_observed(function, initial, &mut NoOpObserver)
    }

    /// Minimizes the function, notifying `observer` after each iteration.
    ///
    /// The diagnostic reported to the observer is the derivative magnitude.
    pub fn minimize_observed<F, O>(
        &self,
        function: &F,
        initial: T,
        observer: &mut O,
    ) -> Result<OptimizationResult<T, T>>
    where
        F: ScalarFunction<T>,
        O: ProgressObserver<T>,
    {
        self.config.validate()?;
        let start_time = Instant::now();

        let mut x = initial;
        let mut function_evaluations = 0;
        let mut gradient_evaluations = 0;
        let mut last_value = None;
        let mut last_gradient_norm = None;
        let mut iterations = 0;
        let mut reason = TerminationReason::MaxIterations;

        observer.on_start();

        for t in 1..=self.config.max_iterations {
            let g = function.derivative(x)?;
            gradient_evaluations += 1;

            let prev = x;
            x = x - self.config.learning_rate * g;
            let moved = <T as Float>::abs(x - prev);

            let value = function.value(x)?;
            function_evaluations += 1;

            last_value = Some(value);
            last_gradient_norm = Some(<T as Float>::abs(g));
            iterations = t;

            observer.on_iteration(&IterationInfo {
                iteration: t,
                value,
                diagnostic: <T as Float>::abs(g),
            });

            if moved < self.config.tolerance {
                reason = TerminationReason::Converged;
                break;
            }
        }

        let value = match last_value {
            Some(v) => v,
            None => {
                function_evaluations += 1;
                function.value(x)?
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

/// Gradient descent on a vector-valued objective.
#[derive(Debug, Clone)]
pub struct GradientDescent<T>
where
    T: Scalar,
{
    config: GradientDescentConfig<T>,
}

impl<T> GradientDescent<T>
where
    T: Scalar,
{
    /// Creates a new solver with the given configuration.
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self { config }
    }

    /// Creates a solver with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(GradientDescentConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for GradientDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Gradient Descent"
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

            let prev_norm_sq = x.norm_squared();
            x.axpy(-self.config.learning_rate, &g, T::one());
            let new_norm_sq = x.norm_squared();

            let value = cost_fn.cost(&x)?;
            function_evaluations += 1;

            let grad_norm = g.norm();
            last_value = Some(value);
            last_gradient_norm = Some(grad_norm);
            iterations = t;

            observer.on_iteration(&IterationInfo {
                iteration: t,
                value,
                diagnostic: grad_norm,
            });

            // Squared-norm drift proxy, not a position-delta norm (see
            // module docs).
            if <T as Float>::abs(new_norm_sq - prev_norm_sq) < self.config.tolerance {
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
    use gradopt_core::cost_function::{FnScalar, QuadraticCost};

    #[test]
    fn test_config_builder() {
        let config = GradientDescentConfig::<f64>::new()
            .with_learning_rate(0.1)
            .with_max_iterations(100)
            .with_tolerance(1e-6);

        assert_relative_eq!(config.learning_rate, 0.1);
        assert_eq!(config.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(GradientDescentConfig::<f64>::new()
            .with_learning_rate(0.0)
            .validate()
            .is_err());
        assert!(GradientDescentConfig::<f64>::new()
            .with_learning_rate(f64::NAN)
            .validate()
            .is_err());
        assert!(GradientDescentConfig::<f64>::new()
            .with_tolerance(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_scalar_shifted_quadratic() {
        // f(x) = (x - 3)^2 from x0 = 0 converges to 3 well within budget.
        let f = FnScalar::new(|x: f64| (x - 3.0) * (x - 3.0), |x: f64| 2.0 * (x - 3.0));
        let solver = ScalarGradientDescent::new(
            GradientDescentConfig::new()
                .with_learning_rate(0.1)
                .with_max_iterations(100)
                .with_tolerance(1e-6),
        );

        let result = solver.minimize(&f, 0.0).unwrap();
        assert!(result.converged);
        assert!(result.iterations < 100);
        assert_relative_eq!(result.point, 3.0, epsilon = 1e-4);
        assert!(result.value < 1e-8);
    }

    #[test]
    fn test_scalar_zero_budget_is_identity() {
        let f = FnScalar::new(|x: f64| x * x, |x: f64| 2.0 * x);
        let solver =
            ScalarGradientDescent::new(GradientDescentConfig::new().with_max_iterations(0));

        let result = solver.minimize(&f, 5.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.point, 5.0);
        assert!(result.gradient_norm.is_none());
    }

    #[test]
    fn test_multidim_quadratic() {
        let cost = QuadraticCost::<f64>::simple(3);
        let mut solver = GradientDescent::new(
            GradientDescentConfig::new()
                .with_learning_rate(0.1)
                .with_max_iterations(1000)
                .with_tolerance(1e-12),
        );
        let x0 = DVector::from_vec(vec![1.0, -2.0, 0.5]);

        let result = solver.minimize(&cost, &x0).unwrap();
        assert!(result.converged);
        assert!(result.point.norm() < 1e-3);
        assert_eq!(result.gradient_evaluations, result.iterations);
    }

    #[test]
    fn test_multidim_zero_budget_is_identity() {
        let cost = QuadraticCost::<f64>::simple(2);
        let mut solver =
            GradientDescent::new(GradientDescentConfig::new().with_max_iterations(0));
        let x0 = DVector::from_vec(vec![4.0, -1.0]);

        let result = solver.minimize(&cost, &x0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.point, x0);
        // Only the final reporting evaluation happened.
        assert_eq!(result.function_evaluations, 1);
    }

    #[test]
    fn test_dimension_mismatch_detected() {
        #[derive(Debug)]
        struct BadGradient;

        impl CostFunction<f64> for BadGradient {
            fn cost(&self, point: &DVector<f64>) -> Result<f64> {
                Ok(point.norm_squared())
            }

            fn gradient(&self, _point: &DVector<f64>) -> Result<DVector<f64>> {
                Ok(DVector::zeros(5))
            }
        }

        let mut solver = GradientDescent::<f64>::with_default_config();
        let x0 = DVector::from_vec(vec![1.0, 2.0]);
        let err = solver.minimize(&BadGradient, &x0).unwrap_err();
        assert!(err.to_string().contains("expected 2, got 5"));
    }
}
