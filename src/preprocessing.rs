use crate::{ElmError, Matrix, Result, Vector};
use ndarray::Axis;
use std::cmp::Ordering;

/// Sorted distinct values of `y`.
pub fn unique_labels(y: &Vector) -> Vector {
    let mut labels: Vec<f64> = y.to_vec();
    labels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    labels.dedup();
    Vector::from(labels)
}

/// Expands labels into an `N x n_dim` indicator matrix.
///
/// Each label value is used directly as the column index of its row's 1,
/// so labels must be non-negative integers below `n_dim`.
pub fn one_hot(y: &Vector, n_dim: usize) -> Result<Matrix> {
    let mut expanded = Matrix::zeros((y.len(), n_dim));

    for (i, &label) in y.iter().enumerate() {
        if label < 0.0 || label.fract() != 0.0 || label >= n_dim as f64 {
            return Err(ElmError::InvalidLabel(label));
        }
        expanded[(i, label as usize)] = 1.0;
    }

    Ok(expanded)
}

/// Scales every row of `x` to unit L2 norm. All-zero rows are left as is.
pub fn normalize(x: &Matrix) -> Matrix {
    let mut result = x.clone();
    for mut row in result.axis_iter_mut(Axis(0)) {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row /= norm;
        }
    }
    result
}
