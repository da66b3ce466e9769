//! Backtracking line search with the Armijo sufficient-decrease condition.
//!
//! # Problem
//!
//! Given a point x, its objective value f(x) and gradient g = ∇f(x), find a
//! step size α > 0 along the steepest-descent direction −g such that the
//! trial point x − α·g achieves a sufficient decrease:
//!
//! f(x − α·g) ≤ f(x) − c₁·α·‖g‖²
//!
//! where 0 < c₁ < 1 (typically 10⁻⁴). Starting from an initial step size,
//! the candidate α is shrunk by a factor ρ ∈ (0, 1) each time the condition
//! fails.
//!
//! # Floor guard
//!
//! On degenerate gradients the condition may never hold; to prevent
//! unbounded shrinking, the search aborts once α falls below
//! `min_step_size` (default 1e-10) and accepts the current α anyway. This
//! is deliberate: a vanishing step is numerical degeneracy, not a failure,
//! and the caller observes it through the `sufficient_decrease` flag rather
//! than an error.
//!
//! # Guarantees
//!
//! - Terminates in finitely many trials for any inputs (α shrinks
//!   geometrically toward the floor).
//! - When `sufficient_decrease` is true, the accepted step satisfies the
//!   Armijo inequality above.
//! - One objective evaluation per trial; the gradient is never re-evaluated.

use crate::{
    cost_function::CostFunction,
    error::{OptimizerError, Result},
    types::{DVector, Scalar},
};

/// Parameters for the backtracking line search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSearchParams<T>
where
    T: Scalar,
{
    /// Initial step size α₀ for the first trial
    pub initial_step_size: T,

    /// Backtracking reduction factor ρ ∈ (0,1): α ← ρ·α on each failed trial
    pub rho: T,

    /// Armijo constant c₁ ∈ (0,1) in the sufficient-decrease condition
    pub c1: T,

    /// Floor below which the search aborts and accepts the current step
    pub min_step_size: T,
}

impl<T> Default for LineSearchParams<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial_step_size: T::one(),
            rho: <T as Scalar>::from_f64(0.5),
            c1: <T as Scalar>::from_f64(1e-4),
            min_step_size: <T as Scalar>::MIN_STEP_SIZE,
        }
    }
}

impl<T> LineSearchParams<T>
where
    T: Scalar,
{
    /// Validates the parameters against their mathematical domains.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::InvalidConfiguration`] if any step size is
    /// non-positive or non-finite, or if `rho` or `c1` leaves `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !num_traits::Float::is_finite(self.initial_step_size)
            || self.initial_step_size <= T::zero()
        {
            return Err(OptimizerError::invalid_configuration(
                "must be positive and finite",
                "initial_step_size",
                self.initial_step_size,
            ));
        }

        if self.rho <= T::zero() || self.rho >= T::one() {
            return Err(OptimizerError::invalid_configuration(
                "must be in (0, 1)",
                "rho",
                self.rho,
            ));
        }

        if self.c1 <= T::zero() || self.c1 >= T::one() {
            return Err(OptimizerError::invalid_configuration(
                "must be in (0, 1)",
                "c1",
                self.c1,
            ));
        }

        if self.min_step_size <= T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "must be positive",
                "min_step_size",
                self.min_step_size,
            ));
        }

        Ok(())
    }
}

/// Result of one line search invocation.
#[derive(Debug, Clone)]
pub struct LineSearchResult<T>
where
    T: Scalar,
{
    /// The accepted step size α
    pub step_size: T,

    /// The trial point x − α·g at the accepted step
    pub new_point: DVector<T>,

    /// The objective value at `new_point`
    pub new_value: T,

    /// Number of objective evaluations performed
    pub function_evals: usize,

    /// True when the Armijo condition holds at the accepted step; false
    /// when the floor guard fired and the step was accepted regardless
    pub sufficient_decrease: bool,
}

/// Backtracking line search along the steepest-descent direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingLineSearch;

impl BacktrackingLineSearch {
    /// Creates a new backtracking line search.
    pub fn new() -> Self {
        Self
    }

    /// Searches for a step size satisfying the Armijo condition.
    ///
    /// `value` must be f(`point`) and `gradient` must be ∇f(`point`); both
    /// are reused across trials so the search costs one objective
    /// evaluation per candidate step.
    pub fn search<T, C>(
        &self,
        cost_fn: &C,
        point: &DVector<T>,
        value: T,
        gradient: &DVector<T>,
        params: &LineSearchParams<T>,
    ) -> Result<LineSearchResult<T>>
    where
        T: Scalar,
        C: CostFunction<T>,
    {
        params.validate()?;

        let grad_norm_sq = gradient.norm_squared();
        let mut alpha = params.initial_step_size;
        let mut function_evals = 0;

        loop {
            let trial = point - gradient * alpha;
            let trial_value = cost_fn.cost(&trial)?;
            function_evals += 1;

            if trial_value <= value - params.c1 * alpha * grad_norm_sq {
                return Ok(LineSearchResult {
                    step_size: alpha,
                    new_point: trial,
                    new_value: trial_value,
                    function_evals,
                    sufficient_decrease: true,
                });
            }

            alpha *= params.rho;
            if alpha < params.min_step_size {
                // Floor guard: accept the shrunk step without the decrease
                // condition rather than shrinking forever.
                let fallback = point - gradient * alpha;
                let fallback_value = cost_fn.cost(&fallback)?;
                function_evals += 1;

                return Ok(LineSearchResult {
                    step_size: alpha,
                    new_point: fallback,
                    new_value: fallback_value,
                    function_evals,
                    sufficient_decrease: false,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_function::QuadraticCost;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_full_step_on_easy_quadratic() {
        // f(x) = 0.5 ||x||^2; from x = (1, 1) a unit step lands on the
        // minimum and trivially satisfies the Armijo condition.
        let cost = QuadraticCost::<f64>::simple(2);
        let point = DVector::from_vec(vec![1.0, 1.0]);
        let value = cost.cost(&point).unwrap();
        let gradient = cost.gradient(&point).unwrap();

        let result = BacktrackingLineSearch::new()
            .search(&cost, &point, value, &gradient, &LineSearchParams::default())
            .unwrap();

        assert!(result.sufficient_decrease);
        assert_relative_eq!(result.step_size, 1.0);
        assert_relative_eq!(result.new_point[0], 0.0);
        assert_relative_eq!(result.new_value, 0.0);
        assert_eq!(result.function_evals, 1);
    }

    #[test]
    fn test_shrinks_on_steep_quadratic() {
        // f(x) = 50 x^2 has gradient 100 x; a unit step from x = 1
        // overshoots badly and must be backtracked.
        let mut a = crate::types::DMatrix::zeros(1, 1);
        a[(0, 0)] = 100.0;
        let cost = QuadraticCost::new(a, DVector::zeros(1), 0.0);
        let point = DVector::from_vec(vec![1.0]);
        let value = cost.cost(&point).unwrap();
        let gradient = cost.gradient(&point).unwrap();

        let result = BacktrackingLineSearch::new()
            .search(&cost, &point, value, &gradient, &LineSearchParams::default())
            .unwrap();

        assert!(result.sufficient_decrease);
        assert!(result.step_size < 1.0);
        assert!(result.new_value < value);
        assert!(result.function_evals > 1);
    }

    #[test]
    fn test_floor_guard_on_ascent_direction() {
        // Lie about the gradient so every trial increases f: the condition
        // can never hold and the floor guard must fire.
        let cost = QuadraticCost::<f64>::simple(1);
        let point = DVector::from_vec(vec![1.0]);
        let value = cost.cost(&point).unwrap();
        let fake_gradient = DVector::from_vec(vec![-1.0]);

        let result = BacktrackingLineSearch::new()
            .search(
                &cost,
                &point,
                value,
                &fake_gradient,
                &LineSearchParams::default(),
            )
            .unwrap();

        assert!(!result.sufficient_decrease);
        assert!(result.step_size < 1e-10);
    }

    #[test]
    fn test_params_validation() {
        let bad_rho = LineSearchParams::<f64> {
            rho: 1.0,
            ..Default::default()
        };
        assert!(bad_rho.validate().is_err());

        let bad_c1 = LineSearchParams::<f64> {
            c1: 0.0,
            ..Default::default()
        };
        assert!(bad_c1.validate().is_err());

        let bad_step = LineSearchParams::<f64> {
            initial_step_size: f64::NAN,
            ..Default::default()
        };
        assert!(bad_step.validate().is_err());

        assert!(LineSearchParams::<f64>::default().validate().is_ok());
    }

    proptest! {
        /// The accepted step either satisfies the sufficient-decrease
        /// inequality or the floor guard fired.
        #[test]
        fn prop_accepted_step_is_armijo_or_floored(
            x0 in -10.0f64..10.0,
            x1 in -10.0f64..10.0,
            curvature in 0.1f64..200.0,
        ) {
            let mut a = crate::types::DMatrix::zeros(2, 2);
            a[(0, 0)] = curvature;
            a[(1, 1)] = 1.0;
            let cost = QuadraticCost::new(a, DVector::zeros(2), 0.0);
            let point = DVector::from_vec(vec![x0, x1]);
            let value = cost.cost(&point).unwrap();
            let gradient = cost.gradient(&point).unwrap();
            let params = LineSearchParams::default();

            let result = BacktrackingLineSearch::new()
                .search(&cost, &point, value, &gradient, &params)
                .unwrap();

            if result.sufficient_decrease {
                let bound = value
                    - params.c1 * result.step_size * gradient.norm_squared();
                prop_assert!(result.new_value <= bound + 1e-12);
            } else {
                prop_assert!(result.step_size < params.min_step_size);
            }
        }
    }
}
