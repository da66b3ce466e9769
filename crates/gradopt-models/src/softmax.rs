//! Multiclass softmax regression.
//!
//! The K×d class-weight matrix is flattened class-major into a single
//! vector — w[c·d + j] is class c's weight on feature j — so the model
//! satisfies the single-vector contract the optimizers consume.

use crate::dataset::Dataset;
use gradopt_core::{
    cost_function::CostFunction,
    error::{OptimizerError, Result},
    types::{DVector, Scalar},
};
use num_traits::Float;

/// Numerically stable softmax: shifts by the maximum before
/// exponentiating.
pub fn softmax<T: Scalar>(z: &DVector<T>) -> DVector<T> {
    let max = z.iter().fold(<T as Float>::neg_infinity(), |acc, v| {
        <T as Float>::max(acc, *v)
    });
    let mut out = z.map(|v| <T as Float>::exp(v - max));
    let sum = out.sum();
    out /= sum;
    out
}

/// Mean negative-log-likelihood of a softmax model over a borrowed
/// dataset.
///
/// For flattened weights w: f(w) = (1/n)·Σᵢ −ln(p_{yᵢ} + 1e-8) where
/// p = softmax(z), z_c = Σ_j w[c·d + j]·xᵢⱼ. Gradient per class c:
/// (1/n)·Σᵢ (p_c − [c = yᵢ])·xᵢ.
#[derive(Debug, Clone)]
pub struct SoftmaxCost<'a, T>
where
    T: Scalar,
{
    data: &'a Dataset<T>,
    classes: usize,
}

impl<'a, T> SoftmaxCost<'a, T>
where
    T: Scalar,
{
    /// Binds the cost to a dataset with `classes` classes.
    ///
    /// Fails on an empty dataset, fewer than two classes, or labels that
    /// are not integers in `[0, classes)`.
    pub fn new(data: &'a Dataset<T>, classes: usize) -> Result<Self> {
        if data.n_samples() == 0 {
            return Err(OptimizerError::numerical_error(
                "softmax loss over an empty dataset",
            ));
        }
        if classes < 2 {
            return Err(OptimizerError::invalid_configuration(
                "need at least two classes",
                "classes",
                classes,
            ));
        }
        for i in 0..data.n_samples() {
            let label = data.labels()[i];
            let class = label.to_f64();
            if class.fract() != 0.0 || class < 0.0 || class >= classes as f64 {
                return Err(OptimizerError::invalid_configuration(
                    "labels must be integers in [0, classes)",
                    "labels",
                    label,
                ));
            }
        }
        Ok(Self { data, classes })
    }

    /// The flattened weight dimension, classes × features.
    pub fn weight_dim(&self) -> usize {
        self.classes * self.data.n_features()
    }

    /// Per-class scores z for one sample (including bias).
    fn scores(&self, weights: &DVector<T>, features_row: usize) -> DVector<T> {
        let d = self.data.n_features();
        let mut z = DVector::zeros(self.classes);
        for c in 0..self.classes {
            let mut acc = T::zero();
            for j in 0..d {
                acc += weights[c * d + j] * self.data.features()[(features_row, j)];
            }
            z[c] = acc;
        }
        z
    }

    /// The most probable class for one sample (including bias).
    pub fn predict_class(&self, weights: &DVector<T>, features: &DVector<T>) -> usize {
        let d = self.data.n_features();
        let mut best = 0;
        let mut best_score = <T as Float>::neg_infinity();
        for c in 0..self.classes {
            let mut score = T::zero();
            for j in 0..d {
                score += weights[c * d + j] * features[j];
            }
            if score > best_score {
                best_score = score;
                best = c;
            }
        }
        best
    }

    /// Fraction of dataset samples whose predicted class matches the
    /// label.
    pub fn accuracy(&self, weights: &DVector<T>) -> T {
        let mut correct = 0usize;
        for i in 0..self.data.n_samples() {
            let predicted = self.predict_class(weights, &self.data.sample(i));
            if predicted == self.data.labels()[i].to_f64() as usize {
                correct += 1;
            }
        }
        <T as Scalar>::from_usize(correct) / <T as Scalar>::from_usize(self.data.n_samples())
    }

    fn check_weights(&self, weights: &DVector<T>) -> Result<()> {
        if weights.len() != self.weight_dim() {
            return Err(OptimizerError::dimension_mismatch(
                self.weight_dim(),
                weights.len(),
            ));
        }
        Ok(())
    }
}

impl<T> CostFunction<T> for SoftmaxCost<'_, T>
where
    T: Scalar,
{
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        self.check_weights(point)?;
        let pad = <T as Scalar>::from_f64(1e-8);

        let mut loss = T::zero();
        for i in 0..self.data.n_samples() {
            let probabilities = softmax(&self.scores(point, i));
            let class = self.data.labels()[i].to_f64() as usize;
            loss += -<T as Float>::ln(probabilities[class] + pad);
        }
        Ok(loss / <T as Scalar>::from_usize(self.data.n_samples()))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_weights(point)?;
        let d = self.data.n_features();
        let mut gradient = DVector::zeros(self.weight_dim());

        for i in 0..self.data.n_samples() {
            let probabilities = softmax(&self.scores(point, i));
            let class = self.data.labels()[i].to_f64() as usize;

            for c in 0..self.classes {
                let indicator = if c == class { T::one() } else { T::zero() };
                let error = probabilities[c] - indicator;
                for j in 0..d {
                    gradient[c * d + j] += error * self.data.features()[(i, j)];
                }
            }
        }

        let n = <T as Scalar>::from_usize(self.data.n_samples());
        gradient /= n;
        Ok(gradient)
    }
}
