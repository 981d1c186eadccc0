//! Extreme Learning Machine.
//!
//! - `RandomProjection`: the fixed random input layer, with optional dropout
//! - `SolveStrategy` / `solve_ridge`: closed-form output-weight solve
//! - `ElmClassifier`: the estimator tying both together
//!
//! # Examples
//!
//! ```rust
//! use elmkit::{ElmClassifier, Prediction};
//! use ndarray::array;
//!
//! let x = array![[0.0, 0.0], [0.1, 0.2], [3.0, 3.1], [3.2, 2.9]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut elm = ElmClassifier::new(10).c(5.0).random_state(1);
//! elm.fit(&x, &y, None).unwrap();
//!
//! // Raw output scores, one column per class
//! let scores = elm.predict_scores(&x).unwrap();
//! assert_eq!(scores.shape(), &[4, 2]);
//!
//! match elm.predict(&x, false).unwrap() {
//!     Prediction::Labels(labels) => assert_eq!(labels.len(), 4),
//!     Prediction::Scores(_) => unreachable!(),
//! }
//! ```

mod classifier;
mod projection;
mod solver;

pub use classifier::{ElmClassifier, ElmParams};
pub use projection::{RandomProjection, dropout, sigmoid};
pub use solver::{SolveStrategy, solve_ridge};
