use super::projection::RandomProjection;
use super::solver::{SolveStrategy, solve_ridge};
use crate::base::{Estimator, Prediction, Targets};
use crate::metrics::accuracy_score;
use crate::preprocessing::{one_hot, unique_labels};
use crate::{ElmError, Matrix, Result, Vector};
use ndarray::{Array1, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::borrow::Cow;
use tracing::debug;

/// Hyperparameters reported by [`ElmClassifier::get_params`].
///
/// The regularization strength is not part of the reported set.
#[derive(Clone, Debug, PartialEq)]
pub struct ElmParams {
    pub n_hidden: usize,
    pub dropout_prob: Option<f64>,
}

/// Extreme Learning Machine classifier.
///
/// Input-to-hidden weights are drawn at random on every call to
/// [`fit`](ElmClassifier::fit); only the hidden-to-output weights are solved
/// for. Fitted state lives in the public `Option` fields and is `None` until
/// the first successful fit.
#[derive(Clone, Debug)]
pub struct ElmClassifier {
    pub projection: Option<RandomProjection>,
    pub output_weights: Option<Matrix>,
    pub classes: Option<Vector>,
    pub n_classes: Option<usize>,
    pub sample_weight: Option<Vector>,
    pub solve_strategy: Option<SolveStrategy>,
    n_hidden: usize,
    c: f64,
    dropout_prob: Option<f64>,
    rng: StdRng,
}

impl ElmClassifier {
    pub fn new(n_hidden: usize) -> Self {
        if n_hidden == 0 {
            panic!("n_hidden must be > 0, got {}", n_hidden);
        }

        Self {
            projection: None,
            output_weights: None,
            classes: None,
            n_classes: None,
            sample_weight: None,
            solve_strategy: None,
            n_hidden,
            c: 1.0,
            dropout_prob: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Regularization strength; `1/C` is added to the Gram matrix diagonal.
    pub fn c(mut self, c: f64) -> Self {
        if c <= 0.0 {
            panic!("C must be positive, got {}", c);
        }
        self.c = c;
        self
    }

    /// Fraction of input weights zeroed after drawing. Checked at fit time.
    pub fn dropout_prob(mut self, prob: f64) -> Self {
        self.dropout_prob = Some(prob);
        self
    }

    pub fn random_state(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn fit<'a>(
        &mut self,
        x: &Matrix,
        y: impl Into<Targets<'a>>,
        sample_weight: Option<&Vector>,
    ) -> Result<&mut Self> {
        let y = y.into();
        let n_samples = x.nrows();

        if n_samples == 0 {
            return Err(ElmError::EmptyInput);
        }
        if y.n_samples() != n_samples {
            return Err(ElmError::ShapeMismatch(format!(
                "Number of samples in X ({}) and y ({}) must match",
                n_samples,
                y.n_samples()
            )));
        }

        let (classes, targets): (Vector, Cow<'_, Matrix>) = match y {
            Targets::Labels(labels) => {
                let classes = unique_labels(labels);
                let expanded = one_hot(labels, classes.len())?;
                (classes, Cow::Owned(expanded))
            }
            Targets::OneHot(matrix) => {
                let classes = (0..matrix.ncols()).map(|k| k as f64).collect();
                (classes, Cow::Borrowed(matrix))
            }
        };
        let n_classes = classes.len();

        let weights = sample_weight
            .map(|w| normalize_sample_weight(w, n_samples))
            .transpose()?;

        let projection = RandomProjection::draw(x.ncols(), self.n_hidden, self.dropout_prob, &mut self.rng)?;
        let hidden = projection.transform(x)?;

        let strategy = SolveStrategy::select(weights.is_some(), self.n_hidden, n_samples);
        debug!(
            n_samples,
            n_features = x.ncols(),
            n_hidden = self.n_hidden,
            n_classes,
            strategy = strategy.name(),
            "fitting ELM output weights"
        );
        let output_weights = solve_ridge(&hidden, &targets, self.c, strategy, weights.as_ref())?;

        self.projection = Some(projection);
        self.output_weights = Some(output_weights);
        self.classes = Some(classes);
        self.n_classes = Some(n_classes);
        self.sample_weight = weights;
        self.solve_strategy = Some(strategy);

        Ok(self)
    }

    /// Arg-max output column per row when `prob` is false, raw scores
    /// otherwise. Despite the flag name, scores are not probabilities.
    pub fn predict(&self, x: &Matrix, prob: bool) -> Result<Prediction> {
        if prob {
            Ok(Prediction::Scores(self.predict_scores(x)?))
        } else {
            Ok(Prediction::Labels(self.predict_labels(x)?))
        }
    }

    /// Raw `M x K` output scores `sigmoid(X W + b) B`.
    pub fn predict_scores(&self, x: &Matrix) -> Result<Matrix> {
        let projection = self.projection.as_ref().ok_or(ElmError::NotFitted)?;
        let output_weights = self.output_weights.as_ref().ok_or(ElmError::NotFitted)?;

        let hidden = projection.transform(x)?;
        Ok(hidden.dot(output_weights))
    }

    /// Index of the highest-scoring output column for each row.
    ///
    /// This is a position in [`classes`](Self::classes), not the label value.
    pub fn predict_labels(&self, x: &Matrix) -> Result<Array1<usize>> {
        let scores = self.predict_scores(x)?;
        Ok(scores.map_axis(Axis(1), |row| {
            let mut best = 0;
            for (k, &value) in row.iter().enumerate() {
                if value > row[best] {
                    best = k;
                }
            }
            best
        }))
    }

    /// Mean accuracy of [`predict_labels`](Self::predict_labels) against `y`.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let predictions = self.predict_labels(x)?.mapv(|k| k as f64);
        accuracy_score(y, &predictions)
    }
}

impl Estimator for ElmClassifier {
    type Params = ElmParams;

    fn get_params(&self) -> ElmParams {
        ElmParams {
            n_hidden: self.n_hidden,
            dropout_prob: self.dropout_prob,
        }
    }

    /// Ignores `params`. Configuration is fixed at construction.
    // TODO: decide with downstream model-selection users whether this should
    // apply n_hidden and dropout_prob instead of ignoring them.
    fn set_params(&mut self, _params: ElmParams) -> &mut Self {
        self
    }

    fn fit(&mut self, x: &Matrix, y: Targets<'_>, sample_weight: Option<&Vector>) -> Result<&mut Self> {
        ElmClassifier::fit(self, x, y, sample_weight)
    }

    fn predict(&self, x: &Matrix, prob: bool) -> Result<Prediction> {
        ElmClassifier::predict(self, x, prob)
    }
}

fn normalize_sample_weight(weights: &Vector, n_samples: usize) -> Result<Vector> {
    if weights.len() != n_samples {
        return Err(ElmError::ShapeMismatch(format!(
            "sample_weight has {} entries, expected {}",
            weights.len(),
            n_samples
        )));
    }
    if weights.iter().any(|&w| !w.is_finite() || w < 0.0) {
        return Err(ElmError::InvalidSampleWeight(
            "weights must be finite and non-negative".to_string(),
        ));
    }

    let total = weights.sum();
    if total <= 0.0 {
        return Err(ElmError::InvalidSampleWeight("weights sum to zero".to_string()));
    }

    Ok(weights / total)
}
