//! Adam: adaptive moment estimation.
//!
//! Adam keeps two exponential moving averages per coordinate — the first
//! moment m (mean of gradients) and the second moment v (mean of squared
//! gradients) — and corrects both for their zero initialization before
//! using them:
//!
//! 1. m ← β₁·m + (1−β₁)·g
//! 2. v ← β₂·v + (1−β₂)·g⊙g
//! 3. m̂ = m/(1−β₁ᵗ),  v̂ = v/(1−β₂ᵗ)   (t is 1-indexed)
//! 4. x ← x − lr·m̂/(√v̂ + ε)
//!
//! The run converges when the total applied step Σ|Δ_j| falls below the
//! tolerance.
//!
//! # References
//!
//! - Kingma & Ba, "Adam: A Method for Stochastic Optimization" (2014)

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

/// Configuration for the Adam optimizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdamConfig<T>
where
    T: Scalar,
{
    /// Learning rate (α)
    pub learning_rate: T,

    /// First moment decay rate (β₁)
    pub beta1: T,

    /// Second moment decay rate (β₂)
    pub beta2: T,

    /// Small constant for numerical stability (ε)
    pub epsilon: T,

    /// Iteration budget
    pub max_iterations: usize,

    /// Convergence tolerance on Σ|Δ_j|
    pub tolerance: T,
}

impl<T> Default for AdamConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            learning_rate: <T as Scalar>::from_f64(0.001),
            beta1: <T as Scalar>::from_f64(0.9),
            beta2: <T as Scalar>::from_f64(0.999),
            epsilon: <T as Scalar>::from_f64(1e-8),
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> AdamConfig<T>
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

    /// Sets the first moment decay rate (β₁).
    pub fn with_beta1(mut self, beta1: T) -> Self {
        self.beta1 = beta1;
        self
    }

    /// Sets the second moment decay rate (β₂).
    pub fn with_beta2(mut self, beta2: T) -> Self {
        self.beta2 = beta2;
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
        ensure_unit_interval("beta1", self.beta1, true)?;
        ensure_unit_interval("beta2", self.beta2, true)?;
        ensure_positive_finite("epsilon", self.epsilon)?;
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// Per-call moment estimates, zero-initialized and discarded on return.
#[derive(Debug)]
struct AdamState<T>
where
    T: Scalar,
{
    /// First moment estimate (mean of gradients)
    m: DVector<T>,
    /// Second moment estimate (mean of squared gradients)
    v: DVector<T>,
}

impl<T> AdamState<T>
where
    T: Scalar,
{
    fn new(dim: usize) -> Self {
        Self {
            m: DVector::zeros(dim),
            v: DVector::zeros(dim),
        }
    }
}

/// Adam optimizer.
#[derive(Debug, Clone)]
pub struct Adam<T>
where
    T: Scalar,
{
    config: AdamConfig<T>,
}

impl<T> Adam<T>
where
    T: Scalar,
{
    /// Creates a new Adam optimizer with the given configuration.
    pub fn new(config: AdamConfig<T>) -> Self {
        Self { config }
    }

    /// Creates an Adam optimizer with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(AdamConfig::default())
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &AdamConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for Adam<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Adam"
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
        let (beta1, beta2) = (self.config.beta1, self.config.beta2);

        let mut x = initial_point.clone();
        let mut state = AdamState::new(x.len());
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

            // Bias corrections for the zero-initialized moments; t is
            // 1-indexed.
            let correction1 = T::one() - <T as Float>::powi(beta1, t as i32);
            let correction2 = T::one() - <T as Float>::powi(beta2, t as i32);

            let mut change = T::zero();
            for i in 0..x.len() {
                state.m[i] = beta1 * state.m[i] + (T::one() - beta1) * g[i];
                state.v[i] = beta2 * state.v[i] + (T::one() - beta2) * g[i] * g[i];

                let m_hat = state.m[i] / correction1;
                let v_hat = state.v[i] / correction2;

                let delta = self.config.learning_rate * m_hat
                    / (<T as Float>::sqrt(v_hat) + self.config.epsilon);
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
