//! Binary logistic regression.

use crate::dataset::Dataset;
use gradopt_core::{
    cost_function::CostFunction,
    error::{OptimizerError, Result},
    types::{DVector, Scalar},
};
use num_traits::Float;

/// The logistic function 1/(1 + e^{-z}).
pub fn sigmoid<T: Scalar>(z: T) -> T {
    T::one() / (T::one() + <T as Float>::exp(-z))
}

/// Mean cross-entropy cost of a logistic model over a borrowed dataset.
///
/// For weights w with predictions p = σ(Xw):
/// f(w) = (1/n)·Σᵢ [−yᵢ·ln(pᵢ) − (1−yᵢ)·ln(1−pᵢ)], with the logs padded by
/// 1e-8 against saturated predictions. Gradient: (1/n)·Xᵀ(p − y).
#[derive(Debug, Clone)]
pub struct LogisticCost<'a, T>
where
    T: Scalar,
{
    data: &'a Dataset<T>,
}

impl<'a, T> LogisticCost<'a, T>
where
    T: Scalar,
{
    /// Binds the cost to a dataset. Fails on an empty dataset.
    pub fn new(data: &'a Dataset<T>) -> Result<Self> {
        if data.n_samples() == 0 {
            return Err(OptimizerError::numerical_error(
                "logistic loss over an empty dataset",
            ));
        }
        Ok(Self { data })
    }

    /// The predicted probability σ(xᵀw) for one sample (including bias).
    pub fn predict_proba(&self, weights: &DVector<T>, features: &DVector<T>) -> T {
        sigmoid(weights.dot(features))
    }

    /// Fraction of dataset samples classified correctly at threshold 0.5.
    pub fn accuracy(&self, weights: &DVector<T>) -> T {
        let half = <T as Scalar>::from_f64(0.5);
        let mut correct = 0usize;
        for i in 0..self.data.n_samples() {
            let p = self.predict_proba(weights, &self.data.sample(i));
            let predicted_positive = p >= half;
            let actually_positive = self.data.labels()[i] >= half;
            if predicted_positive == actually_positive {
                correct += 1;
            }
        }
        <T as Scalar>::from_usize(correct) / <T as Scalar>::from_usize(self.data.n_samples())
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

impl<T> CostFunction<T> for LogisticCost<'_, T>
where
    T: Scalar,
{
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        self.check_weights(point)?;
        let pad = <T as Scalar>::from_f64(1e-8);
        let z = self.data.features() * point;

        let mut loss = T::zero();
        for i in 0..self.data.n_samples() {
            let p = sigmoid(z[i]);
            let y = self.data.labels()[i];
            loss += -y * <T as Float>::ln(p + pad)
                - (T::one() - y) * <T as Float>::ln(T::one() - p + pad);
        }
        Ok(loss / <T as Scalar>::from_usize(self.data.n_samples()))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_weights(point)?;
        let predictions = (self.data.features() * point).map(sigmoid);
        let errors = predictions - self.data.labels();
        let n = <T as Scalar>::from_usize(self.data.n_samples());
        Ok(self.data.features().transpose() * errors / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gradopt_core::cost_function::DerivativeChecker;

    #[test]
    fn test_sigmoid() {
        assert_relative_eq!(sigmoid(0.0f64), 0.5);
        assert!(sigmoid(10.0f64) > 0.999);
        assert!(sigmoid(-10.0f64) < 0.001);
    }

    #[test]
    fn test_loss_decreases_with_separating_weights() {
        let data = Dataset::<f64>::two_cluster();
        let cost = LogisticCost::new(&data).unwrap();

        let undecided = DVector::zeros(2);
        // Decision boundary at x = 3, the midpoint between clusters.
        let separating = DVector::from_vec(vec![-6.0, 2.0]);

        let l0 = cost.cost(&undecided).unwrap();
        let l1 = cost.cost(&separating).unwrap();
        assert!(l1 < l0);
        assert_relative_eq!(cost.accuracy(&separating), 1.0);
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let data = Dataset::<f64>::two_cluster();
        let cost = LogisticCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![0.3, -0.2]);

        let (passes, error) = DerivativeChecker::check_gradient(&cost, &w, 1e-5).unwrap();
        assert!(passes, "max error {error}");
    }

    #[test]
    fn test_predict_proba_uses_bias() {
        let data = Dataset::<f64>::two_cluster();
        let cost = LogisticCost::new(&data).unwrap();
        let w = DVector::from_vec(vec![1.0, 0.0]);
        let x = DVector::from_vec(vec![1.0, 100.0]);
        assert_relative_eq!(cost.predict_proba(&w, &x), sigmoid(1.0));
    }
}
