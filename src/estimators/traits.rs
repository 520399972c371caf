use ndarray::{Array2, ArrayView1, ArrayView2};

use super::error::{EstimatorError, Result};
use crate::metrics;
use crate::{Float, Label};

/// Trainable predictor trait
///
/// The capability a ranked classifier needs from the model it wraps: learning
/// from a design matrix and its labels, exposing the ordered set of classes it
/// learned and, optionally, emitting one probability per class and sample.
/// Column `j` of the probability matrix refers to the `j`-th entry of
/// [`classes`](TrainablePredictor::classes).
pub trait TrainablePredictor<F: Float, L: Label> {
    /// Learns from the records `X` (one row per sample) and their labels `y`.
    fn fit(&mut self, X: ArrayView2<F>, y: ArrayView1<L>) -> Result<&mut Self>;

    /// The ordered, unique classes learned during `fit`, or `None` before.
    fn classes(&self) -> Option<ArrayView1<L>>;

    /// Predicts a `n_samples x n_classes` matrix of class probabilities.
    ///
    /// Estimators which cannot score every class keep this default, which
    /// reports the capability as missing.
    fn predict_proba(&self, _X: ArrayView2<F>) -> Result<Array2<F>> {
        Err(EstimatorError::NotImplemented(
            "the estimator does not predict class probabilities, \
             `predict_proba` should be implemented",
        ))
    }
}

/// Ranked scorer trait
///
/// A ranked scorer predicts, for each sample, the labels most likely to be
/// observed, most likely first. The provided scoring methods compare those
/// rankings to the true labels; from most to least permissive they are
/// [`top30_score`](RankedScorer::top30_score),
/// [`mrr_score`](RankedScorer::mrr_score) and
/// [`accuracy_score`](RankedScorer::accuracy_score).
pub trait RankedScorer<F: Float, L: Label> {
    /// Maximum number of labels returned per sample.
    fn ranking_size(&self) -> usize;

    /// Fails with [`EstimatorError::NotFitted`] until the scorer is fitted.
    fn check_is_fitted(&self) -> Result<()>;

    /// Predicts a `n_samples x min(ranking_size, n_classes)` matrix of labels.
    fn predict(&self, X: ArrayView2<F>) -> Result<Array2<L>> {
        self.predict_with_proba(X).map(|(labels, _)| labels)
    }

    /// Like [`predict`](RankedScorer::predict), also returning the
    /// probability of every ranked label, in the same order.
    fn predict_with_proba(&self, X: ArrayView2<F>) -> Result<(Array2<L>, Array2<F>)>;

    fn mrr_score(&self, y_true: ArrayView1<L>, y_pred: ArrayView2<L>) -> Result<F> {
        self.check_is_fitted()?;
        metrics::mrr_score(y_true, y_pred)
    }

    fn top30_score(&self, y_true: ArrayView1<L>, y_pred: ArrayView2<L>) -> Result<F> {
        self.check_is_fitted()?;
        metrics::top30_score(y_true, y_pred)
    }

    fn accuracy_score(&self, y_true: ArrayView1<L>, y_pred: ArrayView2<L>) -> Result<F> {
        self.check_is_fitted()?;
        metrics::accuracy_score(y_true, y_pred)
    }

    fn mean_rank_score(&self, y_true: ArrayView1<L>, y_pred: ArrayView2<L>) -> Result<Option<F>> {
        self.check_is_fitted()?;
        metrics::mean_rank_score(y_true, y_pred)
    }

    /// Confidence diagnostic, see [`metrics::mean_sum_proba_rank`].
    fn mean_sum_proba_rank(&self, proba_pred: ArrayView2<F>) -> Result<F> {
        self.check_is_fitted()?;
        metrics::mean_sum_proba_rank(proba_pred)
    }

    /// Objective used by model selection: the Top-30 score of the rankings
    /// predicted for `X` against the labels `y`.
    fn score(&self, X: ArrayView2<F>, y: ArrayView1<L>) -> Result<F> {
        let y_pred = self.predict(X)?;
        metrics::top30_score(y, y_pred.view())
    }
}
