//! Dense linear algebra used by the output-weight solve.
//!
//! Two inverses are provided. [`inverse`] is a plain Gauss-Jordan inverse
//! that fails on (numerically) singular input. [`pinv_symmetric`] is a
//! Moore-Penrose pseudo-inverse for symmetric matrices and never fails on
//! rank deficiency.

use crate::{ElmError, Matrix, Result, Vector};
use ndarray::{Axis, s};
use tracing::debug;

const MAX_SWEEPS: usize = 100;

/// Inverts a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// A pivot at or below `n * eps * max|a_ij|` is treated as zero and yields
/// [`ElmError::SingularMatrix`].
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(ElmError::ShapeMismatch(format!(
            "cannot invert non-square matrix of shape {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }

    let mut aug = Matrix::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(a);
    aug.slice_mut(s![.., n..]).assign(&Matrix::eye(n));

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = scale * n as f64 * f64::EPSILON;

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[(k, i)].abs() > aug[(max_row, i)].abs() {
                max_row = k;
            }
        }

        if aug[(max_row, i)].abs() <= tolerance {
            return Err(ElmError::SingularMatrix { size: n });
        }

        if max_row != i {
            for j in 0..2 * n {
                aug.swap((i, j), (max_row, j));
            }
        }

        let pivot = aug[(i, i)];
        aug.row_mut(i).mapv_inplace(|v| v / pivot);

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = aug[(k, i)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    Ok(aug.slice(s![.., n..]).to_owned())
}

/// Eigendecomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns the eigenvalues (unsorted) and a matrix whose columns are the
/// matching orthonormal eigenvectors. Only the symmetric part of `a` is
/// meaningful; asymmetric input gives undefined results.
pub fn symmetric_eigen(a: &Matrix) -> Result<(Vector, Matrix)> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(ElmError::ShapeMismatch(format!(
            "eigendecomposition needs a square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }

    let mut a = a.clone();
    let mut v = Matrix::eye(n);
    let total: f64 = a.iter().map(|x| x * x).sum();

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[(p, q)] * a[(p, q)];
            }
        }
        if off == 0.0 || off <= f64::EPSILON * f64::EPSILON * total {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[(p, q)];
                if apq == 0.0 {
                    continue;
                }

                let theta = (a[(q, q)] - a[(p, p)]) / (2.0 * apq);
                let t = if theta.abs() > 1e150 {
                    0.5 / theta
                } else {
                    let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                    sign / (theta.abs() + (theta * theta + 1.0).sqrt())
                };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[(k, p)];
                    let akq = a[(k, q)];
                    a[(k, p)] = c * akp - s * akq;
                    a[(k, q)] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[(p, k)];
                    let aqk = a[(q, k)];
                    a[(p, k)] = c * apk - s * aqk;
                    a[(q, k)] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[(k, p)];
                    let vkq = v[(k, q)];
                    v[(k, p)] = c * vkp - s * vkq;
                    v[(k, q)] = s * vkp + c * vkq;
                }
            }
        }
    }

    Ok((a.diag().to_owned(), v))
}

/// Moore-Penrose pseudo-inverse of a symmetric matrix.
///
/// Eigenvalues with magnitude at or below `n * eps * max|lambda|` are treated
/// as zero, so rank-deficient Gram matrices are handled without error.
pub fn pinv_symmetric(a: &Matrix) -> Result<Matrix> {
    let n = a.nrows();
    let (eigenvalues, eigenvectors) = symmetric_eigen(a)?;

    let max_abs = eigenvalues.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let cutoff = max_abs * n as f64 * f64::EPSILON;

    let mut truncated = 0;
    let inv_values = eigenvalues.mapv(|lambda| {
        if lambda.abs() > cutoff {
            1.0 / lambda
        } else {
            truncated += 1;
            0.0
        }
    });
    if truncated > 0 {
        debug!(truncated, size = n, "pseudo-inverse dropped near-zero eigenvalues");
    }

    let scaled = &eigenvectors * &inv_values.view().insert_axis(Axis(0));
    Ok(scaled.dot(&eigenvectors.t()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
        (a - b).mapv(f64::abs).into_iter().fold(0.0, f64::max)
    }

    #[test]
    fn test_inverse_2x2() {
        let a = array![[4.0, 7.0], [2.0, 6.0]];
        let inv = inverse(&a).unwrap();
        let expected = array![[0.6, -0.7], [-0.2, 0.4]];
        assert!(max_abs_diff(&inv, &expected) < 1e-12);
    }

    #[test]
    fn test_inverse_needs_pivoting() {
        let a = array![[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [4.0, -3.0, 8.0]];
        let inv = inverse(&a).unwrap();
        assert!(max_abs_diff(&a.dot(&inv), &Matrix::eye(3)) < 1e-10);
    }

    #[test]
    fn test_inverse_singular() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        assert_eq!(inverse(&a), Err(ElmError::SingularMatrix { size: 2 }));

        let zeros = Matrix::zeros((3, 3));
        assert!(inverse(&zeros).is_err());
    }

    #[test]
    fn test_inverse_non_square() {
        let a = Matrix::zeros((2, 3));
        assert!(matches!(inverse(&a), Err(ElmError::ShapeMismatch(_))));
    }

    #[test]
    fn test_symmetric_eigen_reconstructs() {
        let a = array![[4.0, 1.0, 0.5], [1.0, 3.0, -1.0], [0.5, -1.0, 2.0]];
        let (values, vectors) = symmetric_eigen(&a).unwrap();

        let reconstructed = (&vectors * &values.view().insert_axis(Axis(0))).dot(&vectors.t());
        assert!(max_abs_diff(&reconstructed, &a) < 1e-10);
        assert!(max_abs_diff(&vectors.t().dot(&vectors), &Matrix::eye(3)) < 1e-10);
    }

    #[test]
    fn test_pinv_matches_inverse_when_invertible() {
        let a = array![[2.0, 0.5], [0.5, 1.0]];
        let pinv = pinv_symmetric(&a).unwrap();
        let inv = inverse(&a).unwrap();
        assert!(max_abs_diff(&pinv, &inv) < 1e-10);
    }

    #[test]
    fn test_pinv_rank_deficient() {
        // Rank one: v v^T with v = [1, 2, 3]
        let v = array![[1.0], [2.0], [3.0]];
        let a = v.dot(&v.t());
        let pinv = pinv_symmetric(&a).unwrap();

        // Moore-Penrose conditions A A+ A = A and A+ A A+ = A+
        assert!(max_abs_diff(&a.dot(&pinv).dot(&a), &a) < 1e-10);
        assert!(max_abs_diff(&pinv.dot(&a).dot(&pinv), &pinv) < 1e-10);
    }

    #[test]
    fn test_pinv_of_zero_matrix() {
        let a = Matrix::zeros((2, 2));
        let pinv = pinv_symmetric(&a).unwrap();
        assert!(pinv.iter().all(|&x| x == 0.0));
    }
}
