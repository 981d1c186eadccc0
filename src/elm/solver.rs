use crate::linalg::{inverse, pinv_symmetric};
use crate::{Matrix, Result, Vector};
use ndarray::Axis;

/// Which normal equations the output-weight solve uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStrategy {
    /// `B = pinv(H^T W H) H^T W Y`, with `W = diag(sample_weight)`.
    WeightedPinv,
    /// `B = (I/C + H^T H)^-1 H^T Y`, inverting an `H x H` matrix.
    Primal,
    /// `B = H^T (I/C + H H^T)^-1 Y`, inverting an `N x N` matrix.
    Dual,
}

impl SolveStrategy {
    pub fn select(weighted: bool, n_hidden: usize, n_samples: usize) -> Self {
        if weighted {
            SolveStrategy::WeightedPinv
        } else if n_hidden <= n_samples {
            SolveStrategy::Primal
        } else {
            SolveStrategy::Dual
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SolveStrategy::WeightedPinv => "weighted-pinv",
            SolveStrategy::Primal => "primal",
            SolveStrategy::Dual => "dual",
        }
    }
}

/// Solves for the `H x K` output weights given hidden activations `h`
/// (`N x H`) and targets `y` (`N x K`).
///
/// `weights` is only read by [`SolveStrategy::WeightedPinv`], which falls
/// back to uniform weights when it is absent. The weighted form carries no
/// ridge term, so `c` only affects the primal and dual forms.
pub fn solve_ridge(
    h: &Matrix,
    y: &Matrix,
    c: f64,
    strategy: SolveStrategy,
    weights: Option<&Vector>,
) -> Result<Matrix> {
    match (strategy, weights) {
        (SolveStrategy::WeightedPinv, Some(w)) => {
            // Row scaling by w stands in for the N x N diag(w)
            let hw = h * &w.view().insert_axis(Axis(1));
            let gram = h.t().dot(&hw);
            let rhs = hw.t().dot(y);
            Ok(pinv_symmetric(&gram)?.dot(&rhs))
        }
        (SolveStrategy::WeightedPinv, None) => {
            let uniform = Vector::from_elem(h.nrows(), 1.0 / h.nrows() as f64);
            solve_ridge(h, y, c, strategy, Some(&uniform))
        }
        (SolveStrategy::Primal, _) => {
            let mut gram = h.t().dot(h);
            add_to_diagonal(&mut gram, 1.0 / c);
            Ok(inverse(&gram)?.dot(&h.t().dot(y)))
        }
        (SolveStrategy::Dual, _) => {
            let mut gram = h.dot(&h.t());
            add_to_diagonal(&mut gram, 1.0 / c);
            Ok(h.t().dot(&inverse(&gram)?).dot(y))
        }
    }
}

fn add_to_diagonal(m: &mut Matrix, value: f64) {
    for i in 0..m.nrows() {
        m[(i, i)] += value;
    }
}
