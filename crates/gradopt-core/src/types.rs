//! Type definitions and aliases for gradient-descent optimization.
//!
//! This module provides the scalar abstraction shared by every optimizer
//! (`f32` or `f64`), together with the dynamically-sized vector and matrix
//! aliases used throughout the library.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines the numeric capabilities the optimizers rely on:
/// `nalgebra`'s field operations for vector algebra and `num_traits::Float`
/// for transcendental functions and finiteness checks.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance for convergence checks.
    const DEFAULT_TOLERANCE: Self;

    /// Floor below which a backtracking line search stops shrinking its step.
    const MIN_STEP_SIZE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a
    /// non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Convert from usize (for iteration counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-4;
    const MIN_STEP_SIZE: Self = 1e-10;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-6;
    const MIN_STEP_SIZE: Self = 1e-10;
}

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert!(f32::DEFAULT_TOLERANCE > 0.0);
        assert!(f32::MIN_STEP_SIZE > 0.0);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert!(f64::DEFAULT_TOLERANCE > 0.0);
        assert!(f64::MIN_STEP_SIZE < f64::DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_scalar_conversions() {
        let val_f64 = 3.14159;
        let val_f32 = <f32 as Scalar>::from_f64(val_f64);
        assert_relative_eq!(val_f32 as f64, val_f64, epsilon = 1e-6);

        let back_f64 = val_f32.to_f64();
        assert_relative_eq!(back_f64, val_f32 as f64);

        assert_eq!(<f64 as Scalar>::from_usize(42), 42.0);
        assert_eq!(<f64 as Scalar>::try_from_f64(1.5), Some(1.5));
    }

    #[test]
    fn test_vector_type_aliases() {
        let _dv: DVector<f64> = DVector::zeros(10);
        let _dm: DMatrix<f64> = DMatrix::zeros(3, 4);
    }
}
