//! Extreme Learning Machine classification on `ndarray`.
//!
//! An ELM is a single-hidden-layer network whose input-to-hidden weights are
//! drawn at random and never trained. Only the hidden-to-output weights are
//! learned, in closed form, by ridge-regularized least squares.
//!
//! ```rust
//! use elmkit::{ElmClassifier, Targets};
//! use ndarray::array;
//!
//! let x = array![[0.0, 0.1], [0.2, 0.0], [5.0, 5.1], [5.2, 4.9]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut elm = ElmClassifier::new(20).c(10.0).random_state(7);
//! elm.fit(&x, Targets::from(&y), None).unwrap();
//! let labels = elm.predict_labels(&x).unwrap();
//! assert_eq!(labels.len(), 4);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod base;
pub mod elm;
pub mod error;
pub mod linalg;
pub mod metrics;
pub mod preprocessing;

pub use base::{Estimator, Prediction, Targets};
pub use elm::{ElmClassifier, ElmParams, RandomProjection, SolveStrategy};
pub use error::{ElmError, Result};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
