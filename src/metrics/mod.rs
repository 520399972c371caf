//! Rank-based evaluation metrics.
//!
//! Every metric compares the true label of each sample to a row of ranked
//! predictions, most likely label first, as returned by
//! [`RankedScorer::predict`](crate::estimators::traits::RankedScorer::predict).
//! A true label missing from its ranking is never an error: it scores zero,
//! or is left out of [`mean_rank_score`].

use ndarray::{s, ArrayView1, ArrayView2, Axis};

use crate::estimators::error::{EstimatorError, Result};
use crate::Float;


/// Number of ranked predictions inspected by [`top30_score`].
pub const TOP30_WINDOW: usize = 30;

fn check_rankings<L>(y_true: ArrayView1<L>, y_pred: ArrayView2<L>) -> Result<()> {
    if y_true.len() != y_pred.nrows() {
        return Err(EstimatorError::SampleMismatch {
            records: y_pred.nrows(),
            labels: y_true.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EstimatorError::EmptyInput);
    }
    Ok(())
}

/// 0-based position of the first occurrence of `label` in `ranking`.
fn rank_of<L: PartialEq>(ranking: ArrayView1<L>, label: &L) -> Option<usize> {
    ranking.iter().position(|predicted| predicted == label)
}

/// Computes the mean reciprocal rank: the inverse of the rank of the true
/// label among the predicted labels, averaged over samples. The whole ranking
/// is searched.
///
/// Ranges from 0 (null prediction) to 1 (perfect prediction).
pub fn mrr_score<F: Float, L: PartialEq>(
    y_true: ArrayView1<L>,
    y_pred: ArrayView2<L>,
) -> Result<F> {
    check_rankings(y_true, y_pred)?;
    let score: F = y_true
        .iter()
        .zip(y_pred.rows())
        .filter_map(|(label, ranking)| rank_of(ranking, label))
        .map(|rank| F::one() / F::cast(rank + 1))
        .sum();
    Ok(score / F::cast(y_true.len()))
}

/// Fraction of samples whose true label is among the first `k` predicted
/// labels. Rankings narrower than `k` are searched entirely.
pub fn top_k_score<F: Float, L: PartialEq>(
    y_true: ArrayView1<L>,
    y_pred: ArrayView2<L>,
    k: usize,
) -> Result<F> {
    check_rankings(y_true, y_pred)?;
    let window = k.min(y_pred.ncols());
    let hits = y_true
        .iter()
        .zip(y_pred.slice(s![.., ..window]).rows())
        .filter(|(label, ranking)| rank_of(ranking.view(), *label).is_some())
        .count();
    Ok(F::cast(hits) / F::cast(y_true.len()))
}

/// The Top-30 score: the mean of the function scoring 1 when the true label is
/// in the 30 first answers, and 0 otherwise. The position inside the window
/// does not matter.
///
/// Ranges from 0 (null prediction) to 1 (perfect prediction).
pub fn top30_score<F: Float, L: PartialEq>(
    y_true: ArrayView1<L>,
    y_pred: ArrayView2<L>,
) -> Result<F> {
    top_k_score(y_true, y_pred, TOP30_WINDOW)
}

/// Fraction of samples whose first predicted label is the true label. Very
/// harsh metric.
pub fn accuracy_score<F: Float, L: PartialEq>(
    y_true: ArrayView1<L>,
    y_pred: ArrayView2<L>,
) -> Result<F> {
    check_rankings(y_true, y_pred)?;
    if y_pred.ncols() == 0 {
        return Err(EstimatorError::EmptyRanking);
    }
    let hits = y_true
        .iter()
        .zip(y_pred.column(0))
        .filter(|(label, first)| label == first)
        .count();
    Ok(F::cast(hits) / F::cast(y_true.len()))
}

/// Computes the mean of `rank + 1` over the samples whose true label appears in
/// their ranking. Samples whose label is missing are left out.
///
/// Returns `None` when no true label appears in any ranking.
pub fn mean_rank_score<F: Float, L: PartialEq>(
    y_true: ArrayView1<L>,
    y_pred: ArrayView2<L>,
) -> Result<Option<F>> {
    check_rankings(y_true, y_pred)?;
    let (score, n_predicted) = y_true
        .iter()
        .zip(y_pred.rows())
        .filter_map(|(label, ranking)| rank_of(ranking, label))
        .fold((F::zero(), 0usize), |(score, n), rank| {
            (score + F::cast(rank + 1), n + 1)
        });
    if n_predicted == 0 {
        return Ok(None);
    }
    Ok(Some(score / F::cast(n_predicted)))
}

/// Mean over samples of the summed probabilities of their ranked labels, as
/// returned by
/// [`RankedScorer::predict_with_proba`](crate::estimators::traits::RankedScorer::predict_with_proba).
///
/// This measures the confidence of a model in its rankings: perfect confidence
/// is a sum of 1. It is not a performance metric and must not be used to
/// compare the correctness of models, although low sums often go with low
/// scores.
pub fn mean_sum_proba_rank<F: Float>(proba_pred: ArrayView2<F>) -> Result<F> {
    proba_pred
        .sum_axis(Axis(1))
        .mean()
        .ok_or(EstimatorError::EmptyInput)
}
