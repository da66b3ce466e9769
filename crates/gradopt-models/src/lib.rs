//! Toy regression models and dataset plumbing for the `gradopt`
//! optimizers.
//!
//! Each model is a [`gradopt_core::cost_function::CostFunction`] bound to a
//! borrowed [`Dataset`] at construction — the objective carries its data
//! explicitly instead of reading ambient shared state. The dataset layer
//! handles CSV loading, z-score normalization and shuffled train/test
//! splitting, with column 0 of every feature matrix reserved for the bias
//! term.

pub mod dataset;
pub mod linear;
pub mod logistic;
pub mod softmax;

pub use dataset::{Dataset, DatasetError};
pub use linear::MseCost;
pub use logistic::{sigmoid, LogisticCost};
pub use softmax::{softmax, SoftmaxCost};
