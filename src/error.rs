//! Error types for ELM fitting and prediction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElmError {
    #[error("Dropout level must be in interval [0, 1), got {0}")]
    InvalidDropout(f64),

    #[error("Matrix of size {size}x{size} is singular")]
    SingularMatrix { size: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Model not fitted. Call fit() first.")]
    NotFitted,

    #[error("Label {0} cannot be used as a class column index")]
    InvalidLabel(f64),

    #[error("Invalid sample weights: {0}")]
    InvalidSampleWeight(String),

    #[error("X must have at least one sample")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, ElmError>;
