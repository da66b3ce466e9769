//! Shared vector-math helpers and validation used across the optimizers.

use gradopt_core::{
    error::{OptimizerError, Result},
    types::{DVector, Scalar},
};
use num_traits::Float;

/// Sum of absolute components (ℓ1 norm).
pub fn l1_norm<T: Scalar>(v: &DVector<T>) -> T {
    v.iter().fold(T::zero(), |acc, x| acc + <T as Float>::abs(*x))
}

/// Verifies a gradient buffer matches the position's dimension.
///
/// The objective-function contract makes a mismatch a caller error; it is
/// caught on the first gradient evaluation of a run.
pub fn check_gradient_dim<T: Scalar>(position: &DVector<T>, gradient: &DVector<T>) -> Result<()> {
    if gradient.len() != position.len() {
        return Err(OptimizerError::dimension_mismatch(
            position.len(),
            gradient.len(),
        ));
    }
    Ok(())
}

/// Validates that a hyperparameter is finite and strictly positive.
pub fn ensure_positive_finite<T: Scalar>(parameter: &str, value: T) -> Result<()> {
    if !<T as Float>::is_finite(value) || value <= T::zero() {
        return Err(OptimizerError::invalid_configuration(
            "must be positive and finite",
            parameter,
            value,
        ));
    }
    Ok(())
}

/// Validates a convergence tolerance: finite and non-negative.
pub fn ensure_tolerance<T: Scalar>(parameter: &str, value: T) -> Result<()> {
    if !<T as Float>::is_finite(value) || value < T::zero() {
        return Err(OptimizerError::invalid_configuration(
            "must be non-negative and finite",
            parameter,
            value,
        ));
    }
    Ok(())
}

/// Validates a decay/momentum coefficient against `[0, 1)` or `(0, 1)`.
pub fn ensure_unit_interval<T: Scalar>(parameter: &str, value: T, include_zero: bool) -> Result<()> {
    let below = if include_zero {
        value < T::zero()
    } else {
        value <= T::zero()
    };
    if !<T as Float>::is_finite(value) || below || value >= T::one() {
        let reason = if include_zero {
            "must be in [0, 1)"
        } else {
            "must be in (0, 1)"
        };
        return Err(OptimizerError::invalid_configuration(reason, parameter, value));
    }
    Ok(())
}
