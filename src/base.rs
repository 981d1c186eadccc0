//! The estimator contract shared with model-selection and ensembling code.
//!
//! Any model implementing [`Estimator`] exposes the same four operations:
//! `get_params`, `set_params`, `fit` and `predict`.

use crate::{Matrix, Result, Vector};
use ndarray::Array1;

/// Training targets accepted by [`Estimator::fit`].
#[derive(Clone, Copy, Debug)]
pub enum Targets<'a> {
    /// One label per sample. Label values are used directly as output column
    /// indices, so they are expected to be `0.0, 1.0, ..., K-1`.
    Labels(&'a Vector),
    /// An `N x K` target matrix, usually one-hot. Rows are not validated.
    OneHot(&'a Matrix),
}

impl Targets<'_> {
    pub fn n_samples(&self) -> usize {
        match self {
            Targets::Labels(y) => y.len(),
            Targets::OneHot(y) => y.nrows(),
        }
    }
}

impl<'a> From<&'a Vector> for Targets<'a> {
    fn from(y: &'a Vector) -> Self {
        Targets::Labels(y)
    }
}

impl<'a> From<&'a Matrix> for Targets<'a> {
    fn from(y: &'a Matrix) -> Self {
        Targets::OneHot(y)
    }
}

/// Output of [`Estimator::predict`].
#[derive(Clone, Debug, PartialEq)]
pub enum Prediction {
    /// Arg-max output column per row.
    Labels(Array1<usize>),
    /// Raw `M x K` output scores. Not normalized, can be negative.
    Scores(Matrix),
}

impl Prediction {
    pub fn into_labels(self) -> Option<Array1<usize>> {
        match self {
            Prediction::Labels(labels) => Some(labels),
            Prediction::Scores(_) => None,
        }
    }

    pub fn into_scores(self) -> Option<Matrix> {
        match self {
            Prediction::Scores(scores) => Some(scores),
            Prediction::Labels(_) => None,
        }
    }
}

pub trait Estimator {
    type Params;

    /// Reported hyperparameters. Implementations may report a subset of
    /// their configuration.
    fn get_params(&self) -> Self::Params;

    /// Accepts parameters for compatibility with external tooling.
    /// Implementations are free to ignore them.
    fn set_params(&mut self, params: Self::Params) -> &mut Self;

    fn fit(&mut self, x: &Matrix, y: Targets<'_>, sample_weight: Option<&Vector>) -> Result<&mut Self>;

    /// Arg-max labels when `prob` is false, raw scores otherwise.
    fn predict(&self, x: &Matrix, prob: bool) -> Result<Prediction>;
}
