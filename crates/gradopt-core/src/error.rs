//! Error types for optimization runs.
//!
//! Errors model caller-contract violations caught at call entry. Reaching
//! the iteration budget without converging is a reported outcome, not an
//! error, and numerical degeneracy inside a line search is absorbed by its
//! floor guard.

use thiserror::Error;

/// Errors that can occur when configuring or running an optimizer.
#[derive(Debug, Clone, Error)]
pub enum OptimizerError {
    /// Invalid optimizer configuration.
    ///
    /// Raised before the first iteration when a hyperparameter violates its
    /// domain (non-positive learning rate, momentum coefficient outside
    /// `[0, 1)`, non-finite tolerance, ...).
    #[error("Invalid optimizer configuration: {reason} ({parameter} = {value})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Dimension mismatch between the position and a gradient buffer.
    ///
    /// The objective-function contract requires gradients of the same
    /// dimension as the position they were evaluated at.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension (the position's)
        expected: usize,
        /// Actual dimension (the gradient's)
        actual: usize,
    },

    /// Explicit numerical failure.
    ///
    /// Used by cost functions that cannot produce a meaningful value, such
    /// as a regression loss over an empty dataset.
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl OptimizerError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: std::fmt::Display,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = OptimizerError::invalid_configuration("must be positive", "learning_rate", -0.1);
        assert!(matches!(err, OptimizerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("learning_rate"));
        assert!(err.to_string().contains("-0.1"));

        let err = OptimizerError::dimension_mismatch(3, 4);
        assert!(matches!(err, OptimizerError::DimensionMismatch { .. }));
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 4");
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            OptimizerError::invalid_configuration("outside [0, 1)", "gamma", 1.0),
            OptimizerError::dimension_mismatch(2, 5),
            OptimizerError::numerical_error("loss over empty dataset"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
