//! Linear regression under mean squared error.

use crate::dataset::Dataset;
use gradopt_core::{
    cost_function::CostFunction,
    error::{OptimizerError, Result},
    types::{DVector, Scalar},
};

/// Mean-squared-error cost of a linear model over a borrowed dataset.
///
/// For weights w: f(w) = (1/n)·Σᵢ (xᵢᵀw − yᵢ)² with gradient
/// (2/n)·Xᵀ(Xw − y). The dataset is bound at construction, so there is no
/// ambient state to forget to set.
#[derive(Debug, Clone)]
pub struct MseCost<'a, T>
where
    T: Scalar,
{
    data: &'a Dataset<T>,
}

impl<'a, T> MseCost<'a, T>
where
    T: Scalar,
{
    /// Binds the cost to a dataset. Fails on an empty dataset.
    pub fn new(data: &'a Dataset<T>) -> Result<Self> {
        if data.n_samples() == 0 {
            return Err(OptimizerError::numerical_error(
                "MSE loss over an empty dataset",
            ));
        }
        Ok(Self { data })
    }

    /// The linear prediction xᵀw for one sample (including bias).
    pub fn predict(&self, weights: &DVector<T>, features: &DVector<T>) -> T {
        weights.dot(features)
    }

    fn check_weights(&self, weights: &DVector<T>) -> Result<()> {
        if weights.len() != self.data.n_features() {
            return Err(OptimizerError::dimension_mismatch(
                self.data.n_features(),
                weights.len(),
            ));
        }
        Ok(())
    }
}

impl<T> CostFunction<T> for MseCost<'_, T>
where
    T: Scalar,
{
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        self.check_weights(point)?;
        let residual = self.data.features() * point - self.data.labels();
        let n = <T as Scalar>::from_usize(self.data.n_samples());
        Ok(residual.norm_squared() / n)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_weights(point)?;
        let residual = self.data.features() * point - self.data.labels();
        let n = <T as Scalar>::from_usize(self.data.n_samples());
        let two = <T as Scalar>::from_f64(2.0);
        Ok(self.data.features().transpose() * residual * (two / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gradopt_core::cost_function::DerivativeChecker;

    fn line_dataset() -> Dataset<f64> {
        // y = 2 + 3x, exactly.
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        Dataset::from_rows(
            xs.iter().map(|&x| vec![x]).collect(),
            xs.iter().map(|&x| 2.0 + 3.0 * x).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_loss_at_true_weights() {
        let data = line_dataset();
        let cost = MseCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![2.0, 3.0]);

        assert_relative_eq!(cost.cost(&w).unwrap(), 0.0, epsilon = 1e-12);
        let g = cost.gradient(&w).unwrap();
        assert_relative_eq!(g.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let data = line_dataset();
        let cost = MseCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![0.5, -1.0]);

        let (passes, error) = DerivativeChecker::check_gradient(&cost, &w, 1e-5).unwrap();
        assert!(passes, "max error {error}");
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = line_dataset();
        let cost = MseCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(cost.cost(&w).is_err());
    }

    #[test]
    fn test_predict() {
        let data = line_dataset();
        let cost = MseCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![2.0, 3.0]);
        let x = DVector::from_vec(vec![1.0, 10.0]);
        assert_relative_eq!(cost.predict(&w, &x), 32.0);
    }
}
