use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_stats::DeviationExt;
use std::cmp::Ordering;

use super::error::{EstimatorError, Result};
use super::hyperparams::{KNeighborsParams, KNeighborsValidParams};
use super::traits::TrainablePredictor;
use crate::datasets::validation::{check_records, check_records_labels};
use crate::helpers::labels::{encode_labels, unique_labels};
use crate::helpers::sorting::argsort_by;
use crate::{Float, Label};

#[derive(Debug, Clone, PartialEq)]
struct Neighbors<F, L> {
    records: Array2<F>,
    targets: Vec<usize>,
    classes: Array1<L>,
}

/// The k-nearest neighbours estimator
///
/// The probability of a class for a sample is the share of its `n_neighbors`
/// closest training samples, in squared Euclidean distance, labelled with
/// that class. Ties in distance are broken by training order.
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighbors<F, L> {
    params: KNeighborsValidParams,
    fitted: Option<Neighbors<F, L>>,
}

impl<F: Float, L: Label> KNeighbors<F, L> {
    /// This method returns the default hyperparameters of the estimator.
    pub fn params() -> KNeighborsParams {
        KNeighborsParams::new()
    }

    /// This method instantiates an unfitted estimator.
    pub fn new(params: KNeighborsValidParams) -> Self {
        KNeighbors {
            params,
            fitted: None,
        }
    }

    pub fn n_neighbors(&self) -> usize {
        self.params.n_neighbors()
    }
}

impl<F: Float, L: Label> TrainablePredictor<F, L> for KNeighbors<F, L> {
    fn fit(&mut self, X: ArrayView2<F>, y: ArrayView1<L>) -> Result<&mut Self> {
        self.fitted = None;
        check_records_labels(X, y)?;
        if self.n_neighbors() > X.nrows() {
            return Err(EstimatorError::NotEnoughSamples {
                n_neighbors: self.n_neighbors(),
                n_samples: X.nrows(),
            });
        }

        let classes = unique_labels(y.iter());
        let targets = encode_labels(&classes, y.iter()).unwrap_or_default();

        debug!(
            "stored {} neighbours over {} classes",
            X.nrows(),
            classes.len()
        );
        self.fitted = Some(Neighbors {
            records: X.to_owned(),
            targets,
            classes: Array1::from(classes),
        });
        Ok(self)
    }

    fn classes(&self) -> Option<ArrayView1<L>> {
        self.fitted.as_ref().map(|fitted| fitted.classes.view())
    }

    fn predict_proba(&self, X: ArrayView2<F>) -> Result<Array2<F>> {
        let fitted = self.fitted.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_records(X)?;
        if X.ncols() != fitted.records.ncols() {
            return Err(EstimatorError::FeatureMismatch {
                expected: fitted.records.ncols(),
                got: X.ncols(),
            });
        }

        let k = self.n_neighbors();
        let vote = F::one() / F::cast(k);
        let mut proba = Array2::<F>::zeros((X.nrows(), fitted.classes.len()));

        for (xi, mut proba_i) in X.rows().into_iter().zip(proba.rows_mut()) {
            let distances = fitted
                .records
                .rows()
                .into_iter()
                .map(|aj| aj.sq_l2_dist(&xi))
                .collect::<std::result::Result<Array1<F>, _>>()
                .map_err(|_| EstimatorError::FeatureMismatch {
                    expected: fitted.records.ncols(),
                    got: X.ncols(),
                })?;

            let neighbours = argsort_by(&distances, |a, b| {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            });
            for &j in neighbours.iter().take(k) {
                proba_i[fitted.targets[j]] += vote;
            }
        }
        Ok(proba)
    }
}
