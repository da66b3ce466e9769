//! Cost function interface for the optimization algorithms.
//!
//! This module defines the contract every objective must satisfy: a scalar
//! evaluation and a caller-supplied analytic gradient of matching dimension.
//! Both are pure given their bound data — an implementation may read shared
//! external state (such as a borrowed dataset) but must not mutate anything
//! the optimizer can observe.
//!
//! Two contracts exist side by side:
//! - [`CostFunction`] for vector-valued positions, consumed by every
//!   multidimensional optimizer;
//! - [`ScalarFunction`] for the one-dimensional case, consumed by the
//!   scalar gradient-descent solver.
//!
//! Gradients are never approximated automatically: [`CostFunction::gradient`]
//! is a required method. A central-difference helper
//! ([`CostFunction::gradient_fd`]) is provided for verification only, and
//! [`DerivativeChecker`] compares an analytic gradient against it.

use crate::{
    error::{OptimizerError, Result},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;
use std::fmt::Debug;

/// Trait for vector-valued objective functions.
///
/// This is the interface the multidimensional optimizers evaluate on each
/// iteration.
pub trait CostFunction<T: Scalar>: Debug {
    /// Evaluates the objective at a point.
    fn cost(&self, point: &DVector<T>) -> Result<T>;

    /// Evaluates the gradient at a point.
    ///
    /// The returned vector must have the same dimension as `point`; the
    /// optimizers verify this and fail with
    /// [`OptimizerError::DimensionMismatch`] otherwise.
    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>>;

    /// Evaluates the cost and gradient together.
    ///
    /// Override when both can be computed more cheaply in one pass.
    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        Ok((self.cost(point)?, self.gradient(point)?))
    }

    /// Approximates the gradient by central differences.
    ///
    /// Intended for verifying analytic gradients, not for driving an
    /// optimization run.
    fn gradient_fd(&self, point: &DVector<T>) -> Result<DVector<T>> {
        let n = point.len();
        let mut gradient = DVector::zeros(n);
        let h = <T as Float>::sqrt(<T as Scalar>::EPSILON);

        for i in 0..n {
            let mut plus = point.clone();
            let mut minus = point.clone();
            plus[i] += h;
            minus[i] -= h;

            let f_plus = self.cost(&plus)?;
            let f_minus = self.cost(&minus)?;
            gradient[i] = (f_plus - f_minus) / (h + h);
        }

        Ok(gradient)
    }
}

/// Trait for one-dimensional objective functions.
///
/// The scalar analogue of [`CostFunction`]: an evaluation `ℝ → ℝ` and its
/// derivative.
pub trait ScalarFunction<T: Scalar>: Debug {
    /// Evaluates the function at `x`.
    fn value(&self, x: T) -> Result<T>;

    /// Evaluates the derivative at `x`.
    fn derivative(&self, x: T) -> Result<T>;
}

/// A convex quadratic cost function.
///
/// Computes f(x) = 0.5 · xᵀAx + bᵀx + c with gradient Ax + b. Its unique
/// minimum (for positive-definite A) makes it the standard test objective
/// for convergence checks.
#[derive(Debug, Clone)]
pub struct QuadraticCost<T: Scalar> {
    /// The quadratic form matrix (should be symmetric)
    pub a: DMatrix<T>,
    /// The linear term
    pub b: DVector<T>,
    /// The constant term
    pub c: T,
}

impl<T: Scalar> QuadraticCost<T> {
    /// Creates a new quadratic cost function.
    pub fn new(a: DMatrix<T>, b: DVector<T>, c: T) -> Self {
        Self { a, b, c }
    }

    /// Creates the identity quadratic f(x) = 0.5 · ‖x‖².
    pub fn simple(dim: usize) -> Self {
        Self {
            a: DMatrix::identity(dim, dim),
            b: DVector::zeros(dim),
            c: T::zero(),
        }
    }
}

impl<T: Scalar> CostFunction<T> for QuadraticCost<T> {
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        let ax = &self.a * point;
        let quad_term = point.dot(&ax) * <T as Scalar>::from_f64(0.5);
        Ok(quad_term + self.b.dot(point) + self.c)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        Ok(&self.a * point + &self.b)
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        let ax = &self.a * point;
        let cost = point.dot(&ax) * <T as Scalar>::from_f64(0.5) + self.b.dot(point) + self.c;
        Ok((cost, ax + &self.b))
    }
}

/// Adapter turning a plain function/gradient pair into a [`CostFunction`].
///
/// The vector equivalent of passing two function pointers: callers that do
/// not want to define a type can wrap closures.
pub struct FnCost<F, G> {
    f: F,
    g: G,
}

impl<F, G> FnCost<F, G> {
    /// Wraps an evaluation closure and its gradient closure.
    pub fn new(f: F, g: G) -> Self {
        Self { f, g }
    }
}

impl<F, G> Debug for FnCost<F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnCost")
    }
}

impl<T, F, G> CostFunction<T> for FnCost<F, G>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
    G: Fn(&DVector<T>) -> DVector<T>,
{
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        Ok((self.f)(point))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        Ok((self.g)(point))
    }
}

/// Adapter turning a scalar function/derivative pair into a
/// [`ScalarFunction`].
pub struct FnScalar<F, G> {
    f: F,
    g: G,
}

impl<F, G> FnScalar<F, G> {
    /// Wraps an evaluation closure and its derivative closure.
    pub fn new(f: F, g: G) -> Self {
        Self { f, g }
    }
}

impl<F, G> Debug for FnScalar<F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnScalar")
    }
}

impl<T, F, G> ScalarFunction<T> for FnScalar<F, G>
where
    T: Scalar,
    F: Fn(T) -> T,
    G: Fn(T) -> T,
{
    fn value(&self, x: T) -> Result<T> {
        Ok((self.f)(x))
    }

    fn derivative(&self, x: T) -> Result<T> {
        Ok((self.g)(x))
    }
}

/// Wrapper to count function evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingCost<C> {
    /// The underlying cost function
    pub inner: C,
    /// Number of cost evaluations
    pub cost_count: std::cell::RefCell<usize>,
    /// Number of gradient evaluations
    pub gradient_count: std::cell::RefCell<usize>,
}

impl<C> CountingCost<C> {
    /// Creates a new counting wrapper around a cost function.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cost_count: std::cell::RefCell::new(0),
            gradient_count: std::cell::RefCell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        *self.cost_count.borrow_mut() = 0;
        *self.gradient_count.borrow_mut() = 0;
    }

    /// Returns the current (cost, gradient) evaluation counts.
    pub fn counts(&self) -> (usize, usize) {
        (*self.cost_count.borrow(), *self.gradient_count.borrow())
    }
}

impl<T, C> CostFunction<T> for CountingCost<C>
where
    T: Scalar,
    C: CostFunction<T>,
{
    fn cost(&self, point: &DVector<T>) -> Result<T> {
        *self.cost_count.borrow_mut() += 1;
        self.inner.cost(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        *self.gradient_count.borrow_mut() += 1;
        self.inner.gradient(point)
    }

    fn cost_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        *self.cost_count.borrow_mut() += 1;
        *self.gradient_count.borrow_mut() += 1;
        self.inner.cost_and_gradient(point)
    }
}

/// Utility for checking gradient implementations.
pub struct DerivativeChecker;

impl DerivativeChecker {
    /// Checks whether the analytic gradient matches central differences.
    ///
    /// Returns `(passes, max_error)` where `passes` indicates the maximum
    /// component-wise error stays below `tol`.
    pub fn check_gradient<T, C>(cost_fn: &C, point: &DVector<T>, tol: T) -> Result<(bool, T)>
    where
        T: Scalar,
        C: CostFunction<T>,
    {
        let analytical = cost_fn.gradient(point)?;
        let fd = cost_fn.gradient_fd(point)?;

        if analytical.len() != fd.len() {
            return Err(OptimizerError::dimension_mismatch(
                fd.len(),
                analytical.len(),
            ));
        }

        let max_error = analytical
            .iter()
            .zip(fd.iter())
            .map(|(a, b)| <T as Float>::abs(*a - *b))
            .fold(T::zero(), |acc, e| <T as Float>::max(acc, e));

        Ok((max_error < tol, max_error))
    }
}
