use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};
use std::cmp::Ordering;

use super::error::{EstimatorError, Result};
use super::hyperparams::{RankedClassifierParams, RankedClassifierValidParams};
use super::traits::{RankedScorer, TrainablePredictor};
use crate::datasets::validation::{check_records, check_records_labels};
use crate::datasets::DatasetBase;
use crate::helpers::labels::unique_labels;
use crate::helpers::sorting::argsort_by;
use crate::{Float, Label};

/// Placeholder estimator of a [`RankedClassifier`] which wraps no model.
///
/// The type has no values: such a classifier only records the label set at
/// fit time and reports ranked prediction as not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwrapped {}

impl<F: Float, L: Label> TrainablePredictor<F, L> for Unwrapped {
    fn fit(&mut self, _X: ArrayView2<F>, _y: ArrayView1<L>) -> Result<&mut Self> {
        match *self {}
    }

    fn classes(&self) -> Option<ArrayView1<L>> {
        match *self {}
    }
}

/// Data retained by a successful `fit`
#[derive(Debug, Clone, PartialEq)]
struct FittedState<F, L> {
    records: Array2<F>,
    labels: Array1<L>,
    classes: Array1<L>,
}

/// The ranked classifier
///
/// The ranked classifier turns a model predicting one probability per class
/// into a multi-label ranking: for every sample it returns the `ranking_size`
/// labels with the highest probabilities, most likely first.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedClassifier<F, L, E = Unwrapped> {
    params: RankedClassifierValidParams,
    estimator: Option<E>,
    state: Option<FittedState<F, L>>,
}

impl<F: Float, L: Label> RankedClassifier<F, L, Unwrapped> {
    /// This method instantiates a classifier without any wrapped model. It can
    /// be fitted, but predicting fails with
    /// [`EstimatorError::NotImplemented`].
    pub fn without_estimator(params: RankedClassifierValidParams) -> Self {
        RankedClassifier {
            params,
            estimator: None,
            state: None,
        }
    }
}

impl<F: Float, L: Label, E: TrainablePredictor<F, L>> RankedClassifier<F, L, E> {
    /// This method returns the default hyperparameters of a ranked classifier.
    pub fn params() -> RankedClassifierParams {
        RankedClassifierParams::new()
    }

    /// This method instantiates an unfitted classifier wrapping `estimator`.
    pub fn new(params: RankedClassifierValidParams, estimator: E) -> Self {
        RankedClassifier {
            params,
            estimator: Some(estimator),
            state: None,
        }
    }

    pub fn estimator(&self) -> Option<&E> {
        self.estimator.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// This method is a getter for the records seen during `fit`.
    pub fn training_records(&self) -> Result<ArrayView2<F>> {
        Ok(self.fitted_state()?.records.view())
    }

    /// This method is a getter for the labels seen during `fit`.
    pub fn training_labels(&self) -> Result<ArrayView1<L>> {
        Ok(self.fitted_state()?.labels.view())
    }

    /// This method fits the classifier to a dataset.
    pub fn fit_dataset<S, T>(
        &mut self,
        dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<&mut Self>
    where
        S: Data<Elem = F>,
        T: Data<Elem = L>,
    {
        self.fit(dataset.records().view(), dataset.targets().view())
    }

    /// This method computes the objective [`score`](RankedScorer::score) on
    /// a dataset.
    pub fn score_dataset<S, T>(
        &self,
        dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<F>
    where
        S: Data<Elem = F>,
        T: Data<Elem = L>,
    {
        self.score(dataset.records().view(), dataset.targets().view())
    }

    fn fitted_state(&self) -> Result<&FittedState<F, L>> {
        self.state.as_ref().ok_or(EstimatorError::NotFitted)
    }

    /// This method computes the probability matrix of the wrapped estimator
    /// and checks it is aligned with the fitted classes.
    fn class_probabilities(
        &self,
        state: &FittedState<F, L>,
        X: ArrayView2<F>,
    ) -> Result<Array2<F>> {
        let estimator = self.estimator.as_ref().ok_or(EstimatorError::NotImplemented(
            "no estimator is wrapped by the classifier, `predict` should be implemented",
        ))?;

        check_records(X)?;
        if X.ncols() != state.records.ncols() {
            return Err(EstimatorError::FeatureMismatch {
                expected: state.records.ncols(),
                got: X.ncols(),
            });
        }

        let proba = estimator.predict_proba(X)?;
        let expected = (X.nrows(), state.classes.len());
        if proba.dim() != expected {
            return Err(EstimatorError::ProbaShapeMismatch {
                expected,
                got: proba.dim(),
            });
        }
        if proba.iter().any(|p| !p.is_finite() || *p < F::zero()) {
            return Err(EstimatorError::InvalidProbabilities);
        }
        Ok(proba)
    }
}

impl<F: Float, L: Label, E: TrainablePredictor<F, L>> TrainablePredictor<F, L>
    for RankedClassifier<F, L, E>
{
    /// This method validates the inputs, fits the wrapped estimator if any and
    /// stores the records, the labels and the learned classes.
    fn fit(&mut self, X: ArrayView2<F>, y: ArrayView1<L>) -> Result<&mut Self> {
        check_records_labels(X, y)?;
        self.state = None;

        let classes = match self.estimator.as_mut() {
            Some(estimator) => {
                estimator.fit(X, y)?;
                match estimator.classes() {
                    Some(classes) => classes.to_owned(),
                    None => Array1::from(unique_labels(y.iter())),
                }
            }
            None => Array1::from(unique_labels(y.iter())),
        };

        debug!(
            "fitted ranked classifier on {} samples, {} features, {} classes",
            X.nrows(),
            X.ncols(),
            classes.len()
        );
        if classes.len() < self.params.ranking_size() {
            warn!(
                "ranking size {} exceeds the {} known classes, rankings are truncated",
                self.params.ranking_size(),
                classes.len()
            );
        }

        self.state = Some(FittedState {
            records: X.to_owned(),
            labels: y.to_owned(),
            classes,
        });
        Ok(self)
    }

    fn classes(&self) -> Option<ArrayView1<L>> {
        self.state.as_ref().map(|state| state.classes.view())
    }

    fn predict_proba(&self, X: ArrayView2<F>) -> Result<Array2<F>> {
        let state = self.fitted_state()?;
        self.class_probabilities(state, X)
    }
}

impl<F: Float, L: Label, E: TrainablePredictor<F, L>> RankedScorer<F, L>
    for RankedClassifier<F, L, E>
{
    fn ranking_size(&self) -> usize {
        self.params.ranking_size()
    }

    fn check_is_fitted(&self) -> Result<()> {
        self.fitted_state().map(|_| ())
    }

    /// This method ranks the classes of every sample by decreasing
    /// probability and keeps the `ranking_size` first ones.
    ///
    /// Class indices are sorted by increasing probability with a stable sort,
    /// then read from the end: among equal probabilities, the class with the
    /// larger index comes first.
    fn predict_with_proba(&self, X: ArrayView2<F>) -> Result<(Array2<L>, Array2<F>)> {
        let state = self.fitted_state()?;
        let proba = self.class_probabilities(state, X)?;

        let width = self.ranking_size().min(state.classes.len());
        let top_predictions: Vec<Vec<usize>> = proba
            .rows()
            .into_iter()
            .map(|row| {
                argsort_by(&row, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                    .into_iter()
                    .rev()
                    .take(width)
                    .collect()
            })
            .collect();

        let n_samples = top_predictions.len();
        let y_predicted = Array2::from_shape_fn((n_samples, width), |(i, r)| {
            state.classes[top_predictions[i][r]].clone()
        });
        let y_predicted_probas =
            Array2::from_shape_fn((n_samples, width), |(i, r)| proba[[i, top_predictions[i][r]]]);

        debug!("ranked {} samples over {} labels", n_samples, width);
        Ok((y_predicted, y_predicted_probas))
    }
}
