//! Gradient descent with classical momentum.
//!
//! A velocity vector accumulates an exponentially decayed history of
//! gradient steps: v ← γ·v − lr·g, then x ← x + v. The run converges when
//! the velocity's ℓ1 norm Σ|v_j| falls below the tolerance — once the
//! velocity dies out, the iterate has stopped moving.

use crate::utils::{
    check_gradient_dim, ensure_positive_finite, ensure_tolerance, ensure_unit_interval, l1_norm,
};
use gradopt_core::{
    cost_function::CostFunction,
    error::Result,
    observer::{IterationInfo, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use std::time::Instant;

/// Configuration for [`MomentumDescent`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumConfig<T>
where
    T: Scalar,
{
    /// Step-size scale applied to the gradient
    pub learning_rate: T,

    /// Momentum coefficient γ ∈ [0, 1); the velocity's decay factor
    pub momentum: T,

    /// Iteration budget
    pub max_iterations: usize,

    /// Convergence tolerance on Σ|v_j|
    pub tolerance: T,
}

impl<T> Default for MomentumConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            learning_rate: <T as Scalar>::from_f64(0.01),
            momentum: <T as Scalar>::from_f64(0.9),
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> MomentumConfig<T>
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

    /// Sets the momentum coefficient.
    pub fn with_momentum(mut self, momentum: T) -> Self {
        self.momentum = momentum;
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
        ensure_unit_interval("momentum", self.momentum, true)?;
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// Momentum-based gradient descent.
#[derive(Debug, Clone)]
pub struct MomentumDescent<T>
where
    T: Scalar,
{
    config: MomentumConfig<T>,
}

impl<T> MomentumDescent<T>
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

impl<T> Optimizer<T> for MomentumDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Momentum Gradient Descent"
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
        // Velocity starts at rest and is discarded when the call returns.
        let mut velocity = DVector::zeros(x.len());
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
                diagnostic: velocity.norm(),
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
