use crate::{ElmError, Matrix, Result, Vector};
use ndarray::{ArrayBase, Axis, DataMut, Dimension};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Bernoulli, Uniform};
use rand::Rng;
use tracing::trace;

pub const LOWER_BOUND: f64 = -1.0;
pub const UPPER_BOUND: f64 = 1.0;

/// Fixed random input-to-hidden parameters of an ELM.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomProjection {
    /// `D x H` input weights.
    pub weights: Matrix,
    /// `H` hidden biases.
    pub bias: Vector,
}

impl RandomProjection {
    /// Draws weights and biases uniformly from `[-1, 1)`.
    ///
    /// When `dropout_prob` is set, a keep-mask is applied to the weights
    /// (not to the biases) right after they are drawn.
    pub fn draw<R: Rng + ?Sized>(
        n_features: usize,
        n_hidden: usize,
        dropout_prob: Option<f64>,
        rng: &mut R,
    ) -> Result<Self> {
        let uniform = Uniform::new(LOWER_BOUND, UPPER_BOUND);

        let mut weights = Matrix::random_using((n_features, n_hidden), uniform, &mut *rng);
        if let Some(prob) = dropout_prob {
            dropout(&mut weights, prob, &mut *rng)?;
        }
        let bias = Vector::random_using(n_hidden, uniform, &mut *rng);

        Ok(Self { weights, bias })
    }

    pub fn n_features(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_hidden(&self) -> usize {
        self.weights.ncols()
    }

    /// Hidden layer activations `sigmoid(X W + b)`, one row per sample.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        if x.ncols() != self.n_features() {
            return Err(ElmError::ShapeMismatch(format!(
                "Number of features in X ({}) doesn't match training data ({})",
                x.ncols(),
                self.n_features()
            )));
        }

        let mut hidden = x.dot(&self.weights);
        hidden += &self.bias.view().insert_axis(Axis(0));
        hidden.mapv_inplace(sigmoid);
        Ok(hidden)
    }
}

/// Logistic sigmoid that stays finite for large `|z|`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Zeroes each element of `x` independently with probability `prob`.
///
/// Survivors are not rescaled. `prob` must lie in `[0, 1)`.
pub fn dropout<S, D, R>(x: &mut ArrayBase<S, D>, prob: f64, rng: &mut R) -> Result<()>
where
    S: DataMut<Elem = f64>,
    D: Dimension,
    R: Rng + ?Sized,
{
    if !(0.0..1.0).contains(&prob) {
        return Err(ElmError::InvalidDropout(prob));
    }

    let keep = Bernoulli::new(1.0 - prob).map_err(|_| ElmError::InvalidDropout(prob))?;
    let mut dropped = 0usize;
    x.map_inplace(|v| {
        if !rng.sample(keep) {
            *v = 0.0;
            dropped += 1;
        }
    });
    trace!(dropped, total = x.len(), prob, "applied dropout mask");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sigmoid_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_draw_shapes_and_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let projection = RandomProjection::draw(4, 10, None, &mut rng).unwrap();

        assert_eq!(projection.weights.shape(), &[4, 10]);
        assert_eq!(projection.bias.len(), 10);
        assert!(projection.weights.iter().all(|&w| (-1.0..1.0).contains(&w)));
        assert!(projection.bias.iter().all(|&b| (-1.0..1.0).contains(&b)));
    }

    #[test]
    fn test_draw_is_deterministic_for_seed() {
        let a = RandomProjection::draw(3, 6, Some(0.3), &mut StdRng::seed_from_u64(11)).unwrap();
        let b = RandomProjection::draw(3, 6, Some(0.3), &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_rejects_bad_dropout() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            RandomProjection::draw(2, 2, Some(1.0), &mut rng),
            Err(ElmError::InvalidDropout(1.0))
        );
    }

    #[test]
    fn test_dropout_masks_weights_only() {
        let mut rng = StdRng::seed_from_u64(5);
        let projection = RandomProjection::draw(20, 50, Some(0.5), &mut rng).unwrap();

        let zeros = projection.weights.iter().filter(|&&w| w == 0.0).count();
        // 1000 Bernoulli(0.5) draws, far from both extremes
        assert!(zeros > 300 && zeros < 700);
        assert!(projection.bias.iter().all(|&b| b != 0.0));
    }

    #[test]
    fn test_dropout_invalid_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut x = array![[1.0, 2.0]];
        assert_eq!(dropout(&mut x, 1.0, &mut rng), Err(ElmError::InvalidDropout(1.0)));
        assert_eq!(dropout(&mut x, -0.1, &mut rng), Err(ElmError::InvalidDropout(-0.1)));
        assert!(dropout(&mut x, f64::NAN, &mut rng).is_err());
        assert_eq!(x, array![[1.0, 2.0]]);
    }

    #[test]
    fn test_dropout_does_not_rescale() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut x = Matrix::from_elem((10, 10), 2.0);
        dropout(&mut x, 0.4, &mut rng).unwrap();
        assert!(x.iter().all(|&v| v == 0.0 || v == 2.0));
    }

    #[test]
    fn test_transform_shape_and_range() {
        let projection = RandomProjection {
            weights: array![[1.0, -1.0, 0.0], [0.5, 0.5, 0.0]],
            bias: array![0.0, 0.0, 0.0],
        };
        let x = array![[0.0, 0.0], [2.0, 2.0]];

        let hidden = projection.transform(&x).unwrap();
        assert_eq!(hidden.shape(), &[2, 3]);
        assert!((hidden[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((hidden[(1, 0)] - sigmoid(3.0)).abs() < 1e-12);
        assert!((hidden[(1, 1)] - sigmoid(-1.0)).abs() < 1e-12);
        assert!((hidden[(1, 2)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let projection = RandomProjection::draw(3, 4, None, &mut rng).unwrap();
        let x = Matrix::zeros((2, 2));
        assert!(matches!(projection.transform(&x), Err(ElmError::ShapeMismatch(_))));
    }

    proptest! {
        #[test]
        fn dropout_zero_is_identity(values in prop::collection::vec(-10.0f64..10.0, 1..64), seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let original = Vector::from(values);
            let mut x = original.clone();
            dropout(&mut x, 0.0, &mut rng).unwrap();
            prop_assert_eq!(x, original);
        }
    }
}
