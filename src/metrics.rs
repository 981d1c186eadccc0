use crate::{ElmError, Result};
use ndarray::Array1;

/// Fraction of positions where `y_pred` equals `y_true`.
pub fn accuracy_score<T: PartialEq>(y_true: &Array1<T>, y_pred: &Array1<T>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(ElmError::ShapeMismatch(
            "y_true and y_pred must have the same length".to_string(),
        ));
    }
    if y_true.is_empty() {
        return Err(ElmError::EmptyInput);
    }

    let correct = y_true.iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| actual == pred)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}
