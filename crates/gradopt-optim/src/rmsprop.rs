//! RMSProp: Adagrad with an exponentially decaying accumulator.
//!
//! Same per-coordinate adaptive step as Adagrad, but the squared-gradient
//! accumulator is an exponential moving average, G_i ← β·G_i + (1−β)·g_i²
//! with β ∈ (0,1) (typically 0.9). Old gradients are forgotten, so the
//! effective step does not shrink monotonically the way Adagrad's does.
//! Convergence test: Σ|Δ_j| < tol.

use crate::utils::{
    check_gradient_dim, ensure_positive_finite, ensure_tolerance, ensure_unit_interval,
};
use gradopt_core::{
    cost_function::CostFunction,
    error::Result,
    observer::{IterationInfo, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for [`RmsProp`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RmsPropConfig<T>
where
    T: Scalar,
{
    /// Base learning rate, adapted per coordinate
    pub learning_rate: T,

    /// Decay rate β ∈ (0,1) of the squared-gradient moving average
    pub decay_rate: T,

    /// Small constant ε guarding the division at zero accumulator
    pub epsilon: T,

    /// Iteration budget
    pub max_iterations: usize,

    /// Convergence tolerance on Σ|Δ_j|
    pub tolerance: T,
}

impl<T> Default for RmsPropConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            learning_rate: <T as Scalar>::from_f64(0.01),
            decay_rate: <T as Scalar>::from_f64(0.9),
            epsilon: <T as Scalar>::from_f64(1e-8),
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> RmsPropConfig<T>
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

    /// Sets the moving-average decay rate.
    pub fn with_decay_rate(mut self, decay_rate: T) -> Self {
        self.decay_rate = decay_rate;
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
        ensure_unit_interval("decay_rate", self.decay_rate, false)?;
        ensure_positive_finite("epsilon", self.epsilon)?;
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// RMSProp optimizer.
#[derive(Debug, Clone)]
pub struct RmsProp<T>
where
    T: Scalar,
{
    config: RmsPropConfig<T>,
}

impl<T> RmsProp<T>
where
    T: Scalar,
{
    /// Creates a new optimizer with the given configuration.
    pub fn new(config: RmsPropConfig<T>) -> Self {
        Self { config }
    }

    /// Creates an optimizer with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(RmsPropConfig::default())
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &RmsPropConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for RmsProp<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "RMSProp"
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
        let beta = self.config.decay_rate;

        let mut x = initial_point.clone();
        // Exponential moving average of squared gradients.
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
                accumulator[i] = beta * accumulator[i] + (T::one() - beta) * g[i] * g[i];
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
