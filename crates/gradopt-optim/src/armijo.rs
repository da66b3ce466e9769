//! Gradient descent with Armijo backtracking line search.
//!
//! Instead of a fixed learning rate, each outer iteration evaluates the
//! gradient once and asks a [`BacktrackingLineSearch`] for a step size
//! satisfying the sufficient-decrease condition. The outer loop converges
//! when the total per-coordinate displacement Σ|x_j − x_new_j| falls below
//! the tolerance.
//!
//! The inner search carries its own floor guard (see
//! [`gradopt_core::line_search`]); a floored step is accepted silently and
//! the outer loop continues.

use crate::utils::{check_gradient_dim, ensure_tolerance};
use gradopt_core::{
    cost_function::CostFunction,
    error::Result,
    line_search::{BacktrackingLineSearch, LineSearchParams},
    observer::{IterationInfo, ProgressObserver},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for [`ArmijoDescent`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmijoDescentConfig<T>
where
    T: Scalar,
{
    /// Step size each line search starts from
    pub initial_step_size: T,

    /// Shrink factor β ∈ (0,1) applied on each failed trial
    pub shrink_factor: T,

    /// Armijo constant c ∈ (0,1) in the sufficient-decrease condition
    pub sufficient_decrease: T,

    /// Floor below which the line search accepts the current step
    pub step_floor: T,

    /// Iteration budget for the outer loop
    pub max_iterations: usize,

    /// Convergence tolerance on the ℓ1 displacement per iteration
    pub tolerance: T,
}

impl<T> Default for ArmijoDescentConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial_step_size: T::one(),
            shrink_factor: <T as Scalar>::from_f64(0.5),
            sufficient_decrease: <T as Scalar>::from_f64(1e-4),
            step_floor: <T as Scalar>::MIN_STEP_SIZE,
            max_iterations: 1000,
            tolerance: <T as Scalar>::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> ArmijoDescentConfig<T>
where
    T: Scalar,
{
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial step size.
    pub fn with_initial_step_size(mut self, step: T) -> Self {
        self.initial_step_size = step;
        self
    }

    /// Sets the backtracking shrink factor.
    pub fn with_shrink_factor(mut self, factor: T) -> Self {
        self.shrink_factor = factor;
        self
    }

    /// Sets the Armijo sufficient-decrease constant.
    pub fn with_sufficient_decrease(mut self, c: T) -> Self {
        self.sufficient_decrease = c;
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

    /// The inner-loop parameters this configuration induces.
    pub fn line_search_params(&self) -> LineSearchParams<T> {
        LineSearchParams {
            initial_step_size: self.initial_step_size,
            rho: self.shrink_factor,
            c1: self.sufficient_decrease,
            min_step_size: self.step_floor,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.line_search_params().validate()?;
        ensure_tolerance("tolerance", self.tolerance)
    }
}

/// Gradient descent with Armijo backtracking line search.
#[derive(Debug, Clone)]
pub struct ArmijoDescent<T>
where
    T: Scalar,
{
    config: ArmijoDescentConfig<T>,
    line_search: BacktrackingLineSearch,
}

impl<T> ArmijoDescent<T>
where
    T: Scalar,
{
    /// Creates a new solver with the given configuration.
    pub fn new(config: ArmijoDescentConfig<T>) -> Self {
        Self {
            config,
            line_search: BacktrackingLineSearch::new(),
        }
    }

    /// Creates a solver with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(ArmijoDescentConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &ArmijoDescentConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for ArmijoDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Gradient Descent (Armijo line search)"
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
        let params = self.config.line_search_params();

        let mut x = initial_point.clone();
        let mut function_evaluations = 0;
        let mut gradient_evaluations = 0;
        let mut last_value = None;
        let mut last_gradient_norm = None;
        let mut iterations = 0;
        let mut reason = TerminationReason::MaxIterations;

        observer.on_start();

        for t in 1..=self.config.max_iterations {
            // One gradient per outer iteration; the inner search reuses it.
            let (fx, g) = cost_fn.cost_and_gradient(&x)?;
            function_evaluations += 1;
            gradient_evaluations += 1;
            check_gradient_dim(&x, &g)?;

            let searched = self.line_search.search(cost_fn, &x, fx, &g, &params)?;
            function_evaluations += searched.function_evals;

            let displacement = x
                .iter()
                .zip(searched.new_point.iter())
                .fold(T::zero(), |acc, (a, b)| acc + <T as Float>::abs(*a - *b));

            x = searched.new_point;
            last_value = Some(searched.new_value);
            last_gradient_norm = Some(g.norm());
            iterations = t;

            observer.on_iteration(&IterationInfo {
                iteration: t,
                value: searched.new_value,
                diagnostic: searched.step_size,
            });

            if displacement < self.config.tolerance {
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
