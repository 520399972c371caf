use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2, ArrayView1, ArrayView2};

use super::error::{ErrorKind, EstimatorError, Result};
use super::frequency::ClassFrequency;
use super::hyperparams::{KNeighborsParams, RankedClassifierParams};
use super::knn::KNeighbors;
use super::param_guard::ParamGuard;
use super::ranked::RankedClassifier;
use super::traits::{RankedScorer, TrainablePredictor};
use crate::datasets::Dataset;
use crate::helpers::test_helpers::{
    assert_array2d_all_close, assert_array_all_close, generate_random_blobs,
};

/// Returns the same probability row for every sample.
#[derive(Debug, Clone)]
struct FixedProba {
    classes: Array1<i32>,
    row: Array1<f64>,
    fitted: bool,
}

impl FixedProba {
    fn new(classes: Array1<i32>, row: Array1<f64>) -> Self {
        FixedProba {
            classes,
            row,
            fitted: false,
        }
    }
}

impl TrainablePredictor<f64, i32> for FixedProba {
    fn fit(&mut self, _X: ArrayView2<f64>, _y: ArrayView1<i32>) -> Result<&mut Self> {
        self.fitted = true;
        Ok(self)
    }

    fn classes(&self) -> Option<ArrayView1<i32>> {
        Some(self.classes.view())
    }

    fn predict_proba(&self, X: ArrayView2<f64>) -> Result<Array2<f64>> {
        Ok(Array2::from_shape_fn((X.nrows(), self.row.len()), |(_, j)| {
            self.row[j]
        }))
    }
}

/// Learns labels but cannot score classes.
#[derive(Debug, Clone, Default)]
struct LabelsOnly {
    classes: Option<Array1<i32>>,
}

impl TrainablePredictor<f64, i32> for LabelsOnly {
    fn fit(&mut self, _X: ArrayView2<f64>, y: ArrayView1<i32>) -> Result<&mut Self> {
        self.classes = Some(y.to_owned());
        Ok(self)
    }

    fn classes(&self) -> Option<ArrayView1<i32>> {
        self.classes.as_ref().map(|classes| classes.view())
    }
}

fn fixed_classifier(
    ranking_size: usize,
    row: Array1<f64>,
) -> RankedClassifier<f64, i32, FixedProba> {
    let params = RankedClassifierParams::new()
        .ranking_size(ranking_size)
        .check()
        .unwrap();
    let classes = Array1::from_shape_fn(row.len(), |j| 10 * (j as i32 + 1));
    RankedClassifier::new(params, FixedProba::new(classes, row))
}

fn toy_data() -> (Array2<f64>, Array1<i32>) {
    (array![[0., 1.], [1., 0.], [1., 1.]], array![10, 20, 30])
}

#[test]
fn test_ranking_size_must_be_positive() {
    let res = RankedClassifierParams::new().ranking_size(0).check();
    assert_eq!(res.unwrap_err(), EstimatorError::InvalidRankingSize(0));

    let params = RankedClassifierParams::default().check().unwrap();
    assert_eq!(params.ranking_size(), 30);
}

#[test]
fn test_n_neighbors_must_be_positive() {
    let res = KNeighbors::<f64, i32>::params().n_neighbors(0).check();
    assert_eq!(res.unwrap_err(), EstimatorError::InvalidNeighbors(0));
}

#[test]
fn test_predict_before_fit_is_not_fitted() {
    let (x, _) = toy_data();
    let clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);
    let err = clf.predict(x.view()).unwrap_err();
    assert_eq!(err, EstimatorError::NotFitted);
    assert_eq!(err.kind(), ErrorKind::NotFitted);

    let params = RankedClassifierParams::new().check().unwrap();
    let bare = RankedClassifier::<f64, i32>::without_estimator(params);
    assert_eq!(
        bare.predict(Array2::<f64>::zeros((0, 0)).view()).unwrap_err(),
        EstimatorError::NotFitted
    );
}

#[test]
fn test_scoring_before_fit_is_not_fitted() {
    let (x, y) = toy_data();
    let clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);
    let y_pred = array![[10, 20], [10, 20], [10, 20]];

    assert_eq!(
        clf.score(x.view(), y.view()).unwrap_err(),
        EstimatorError::NotFitted
    );
    assert_eq!(
        clf.mrr_score(y.view(), y_pred.view()).unwrap_err(),
        EstimatorError::NotFitted
    );
    assert_eq!(
        clf.mean_rank_score(y.view(), y_pred.view()).unwrap_err(),
        EstimatorError::NotFitted
    );
}

#[test]
fn test_fit_rejects_mismatched_samples() {
    let x = array![[0., 1.], [1., 0.], [1., 1.]];
    let y = array![10, 20];
    let mut clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);

    let err = clf.fit(x.view(), y.view()).unwrap_err();
    assert_eq!(
        err,
        EstimatorError::SampleMismatch {
            records: 3,
            labels: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!clf.is_fitted());
}

#[test]
fn test_fit_rejects_empty_records() {
    let x = Array2::<f64>::zeros((0, 2));
    let y = Array1::<i32>::zeros(0);
    let mut clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);
    assert_eq!(
        clf.fit(x.view(), y.view()).unwrap_err(),
        EstimatorError::EmptyInput
    );
}

#[test]
fn test_fit_stores_training_data() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);
    clf.fit(x.view(), y.view()).unwrap();

    assert!(clf.is_fitted());
    assert!(clf.estimator().unwrap().fitted);
    assert_eq!(clf.training_records().unwrap(), x.view());
    assert_eq!(clf.training_labels().unwrap(), y.view());
    assert_eq!(clf.classes().unwrap(), array![10, 20, 30].view());
}

#[test]
fn test_predict_ranks_by_decreasing_probability() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(3, array![0.1, 0.4, 0.2, 0.3]);

    let (y_pred, proba_pred) = clf
        .fit(x.view(), y.view())
        .unwrap()
        .predict_with_proba(x.view())
        .unwrap();

    assert_eq!(y_pred, array![[20, 40, 30], [20, 40, 30], [20, 40, 30]]);
    let expected = array![[0.4, 0.3, 0.2], [0.4, 0.3, 0.2], [0.4, 0.3, 0.2]];
    assert_array2d_all_close(proba_pred.view(), expected.view(), 1e-12);
}

#[test]
fn test_predict_returns_every_class_when_ranking_is_wider() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(10, array![0.1, 0.4, 0.2, 0.3]);
    clf.fit(x.view(), y.view()).unwrap();

    let y_pred = clf.predict(x.view()).unwrap();
    assert_eq!(y_pred.dim(), (3, 4));
    assert_eq!(y_pred.row(0), array![20, 40, 30, 10]);
}

#[test]
fn test_predict_breaks_ties_by_reversed_stable_order() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(2, array![0.5, 0.5, 0.0]);
    clf.fit(x.view(), y.view()).unwrap();

    let y_pred = clf.predict(x.view()).unwrap();
    assert_eq!(y_pred.row(0), array![20, 10]);
}

#[test]
fn test_predict_rejects_feature_mismatch() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(2, array![0.1, 0.5, 0.4]);
    clf.fit(x.view(), y.view()).unwrap();

    let err = clf.predict(array![[1., 2., 3.]].view()).unwrap_err();
    assert_eq!(err, EstimatorError::FeatureMismatch { expected: 2, got: 3 });
}

#[test]
fn test_predict_rejects_misaligned_probabilities() {
    let (x, y) = toy_data();
    let params = RankedClassifierParams::new().ranking_size(2).check().unwrap();
    let estimator = FixedProba::new(array![1, 2, 3], array![0.5, 0.5]);
    let mut clf = RankedClassifier::new(params, estimator);
    clf.fit(x.view(), y.view()).unwrap();

    assert_eq!(
        clf.predict(x.view()).unwrap_err(),
        EstimatorError::ProbaShapeMismatch {
            expected: (3, 3),
            got: (3, 2)
        }
    );
}

#[test]
fn test_predict_rejects_nan_probabilities() {
    let (x, y) = toy_data();
    let mut clf = fixed_classifier(2, array![0.1, f64::NAN, 0.9]);
    clf.fit(x.view(), y.view()).unwrap();

    let err = clf.predict(x.view()).unwrap_err();
    assert_eq!(err, EstimatorError::InvalidProbabilities);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        clf.predict_proba(x.view()).unwrap_err(),
        EstimatorError::InvalidProbabilities
    );
}

#[test]
fn test_predict_rejects_negative_and_infinite_probabilities() {
    let (x, y) = toy_data();
    for row in [array![0.5, -0.1, 0.6], array![0.2, f64::INFINITY, 0.1]] {
        let mut clf = fixed_classifier(3, row);
        clf.fit(x.view(), y.view()).unwrap();
        assert_eq!(
            clf.predict_with_proba(x.view()).unwrap_err(),
            EstimatorError::InvalidProbabilities
        );
    }
}

#[test]
fn test_without_estimator_records_sorted_labels() {
    let x = array![[0.], [1.], [2.], [3.]];
    let y = array![7, 3, 7, 5];
    let params = RankedClassifierParams::new().check().unwrap();
    let mut clf = RankedClassifier::<f64, i32>::without_estimator(params);

    clf.fit(x.view(), y.view()).unwrap();
    assert_eq!(clf.classes().unwrap(), array![3, 5, 7].view());

    let err = clf.predict(x.view()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
}

#[test]
fn test_estimator_without_probabilities_is_not_implemented() {
    let (x, y) = toy_data();
    let params = RankedClassifierParams::new().check().unwrap();
    let mut clf = RankedClassifier::new(params, LabelsOnly::default());
    clf.fit(x.view(), y.view()).unwrap();

    let err = clf.predict(x.view()).unwrap_err();
    assert!(matches!(err, EstimatorError::NotImplemented(_)));
}

#[test]
fn test_class_frequency() {
    let x = array![[0.], [1.], [2.], [3.], [4.]];
    let y = array![3, 1, 3, 3, 2];
    let mut estimator = ClassFrequency::<f64, i32>::new();
    estimator.fit(x.view(), y.view()).unwrap();

    assert_eq!(estimator.classes().unwrap(), array![1, 2, 3].view());
    assert_array_all_close(
        estimator.frequencies().unwrap(),
        array![0.2, 0.2, 0.6].view(),
        1e-12,
    );

    let params = RankedClassifierParams::new().ranking_size(2).check().unwrap();
    let mut clf = RankedClassifier::new(params, ClassFrequency::new());
    clf.fit(x.view(), y.view()).unwrap();
    let (y_pred, proba_pred) = clf.predict_with_proba(array![[9.]].view()).unwrap();
    assert_eq!(y_pred, array![[3, 2]]);
    assert_abs_diff_eq!(clf.mean_sum_proba_rank(proba_pred.view()).unwrap(), 0.8, epsilon = 1e-12);
}

#[test]
fn test_class_frequency_predict_before_fit() {
    let estimator = ClassFrequency::<f64, i32>::new();
    assert_eq!(
        estimator.predict_proba(array![[1.]].view()).unwrap_err(),
        EstimatorError::NotFitted
    );
}

#[test]
fn test_knn_needs_enough_samples() {
    let (x, y) = toy_data();
    let mut estimator = KNeighbors::new(KNeighborsParams::new().n_neighbors(4).check().unwrap());
    assert_eq!(
        estimator.fit(x.view(), y.view()).unwrap_err(),
        EstimatorError::NotEnoughSamples {
            n_neighbors: 4,
            n_samples: 3
        }
    );
}

#[test]
fn test_knn_probabilities_are_vote_shares() {
    let x = array![[0.], [1.], [2.], [10.], [11.]];
    let y = array![1, 1, 2, 2, 2];
    let mut estimator = KNeighbors::new(KNeighborsParams::new().n_neighbors(3).check().unwrap());
    estimator.fit(x.view(), y.view()).unwrap();

    let proba = estimator.predict_proba(array![[0.4], [10.5]].view()).unwrap();
    assert_array2d_all_close(
        proba.view(),
        array![[2. / 3., 1. / 3.], [0., 1.]].view(),
        1e-12,
    );
}

#[test]
fn test_knn_single_neighbour_recovers_training_labels() {
    let (x, y) = generate_random_blobs(30, 4, 5);
    let params = RankedClassifierParams::new().ranking_size(3).check().unwrap();
    let knn = KNeighbors::new(KNeighborsParams::new().n_neighbors(1).check().unwrap());
    let mut clf = RankedClassifier::new(params, knn);
    clf.fit(x.view(), y.view()).unwrap();

    let y_pred = clf.predict(x.view()).unwrap();
    assert_eq!(y_pred.dim(), (30, 3));
    assert_eq!(clf.accuracy_score(y.view(), y_pred.view()).unwrap(), 1.);
    assert_eq!(clf.mrr_score(y.view(), y_pred.view()).unwrap(), 1.);
    assert_eq!(clf.mean_rank_score(y.view(), y_pred.view()).unwrap(), Some(1.));
}

#[test]
fn test_knn_ranking_on_held_out_data() {
    let (x, y) = generate_random_blobs(90, 4, 3);
    let dataset = Dataset::from((x, y));
    let (train, test) = dataset.train_test_split(0.2, 42).unwrap();

    let params = RankedClassifierParams::new().check().unwrap();
    let knn = KNeighbors::new(KNeighborsParams::new().n_neighbors(5).check().unwrap());
    let mut clf = RankedClassifier::new(params, knn);
    clf.fit_dataset(&train).unwrap();

    let (y_pred, proba_pred) = clf.predict_with_proba(test.records().view()).unwrap();
    // every class is ranked, so the top-30 score is perfect
    assert_eq!(y_pred.ncols(), 3);
    assert_eq!(clf.score_dataset(&test).unwrap(), 1.);
    assert_abs_diff_eq!(clf.mean_sum_proba_rank(proba_pred.view()).unwrap(), 1., epsilon = 1e-12);

    for row in proba_pred.rows() {
        assert!(row.windows(2).into_iter().all(|w| w[0] >= w[1]));
    }

    let accuracy = clf.accuracy_score(test.targets().view(), y_pred.view()).unwrap();
    let mrr = clf.mrr_score(test.targets().view(), y_pred.view()).unwrap();
    assert!(accuracy > 0.9);
    assert!(mrr >= accuracy);
}

#[test]
fn test_refit_replaces_fitted_state() {
    let mut clf = RankedClassifier::new(
        RankedClassifierParams::new().check().unwrap(),
        ClassFrequency::<f64, i32>::new(),
    );
    clf.fit(array![[0.], [1.]].view(), array![1, 2].view())
        .unwrap();
    clf.fit(array![[0.], [1.], [2.]].view(), array![4, 4, 5].view())
        .unwrap();

    assert_eq!(clf.classes().unwrap(), array![4, 5].view());
    assert_eq!(clf.training_labels().unwrap().len(), 3);
    let y_pred = clf.predict(array![[0.]].view()).unwrap();
    assert_eq!(y_pred, array![[4, 5]]);
}

#[test]
fn test_failed_refit_clears_class_frequency() {
    let mut estimator = ClassFrequency::<f64, i32>::new();
    estimator
        .fit(array![[0.], [1.]].view(), array![1, 2].view())
        .unwrap();

    let err = estimator
        .fit(array![[0.], [1.]].view(), array![1, 2, 3].view())
        .unwrap_err();
    assert_eq!(
        err,
        EstimatorError::SampleMismatch {
            records: 2,
            labels: 3
        }
    );
    assert!(estimator.classes().is_none());
    assert!(estimator.frequencies().is_none());
    assert_eq!(
        estimator.predict_proba(array![[0.]].view()).unwrap_err(),
        EstimatorError::NotFitted
    );
}

#[test]
fn test_failed_refit_clears_knn() {
    let mut estimator = KNeighbors::new(KNeighborsParams::new().n_neighbors(3).check().unwrap());
    let x = array![[0.], [1.], [2.], [3.]];
    estimator.fit(x.view(), array![1, 1, 2, 2].view()).unwrap();
    assert!(estimator.predict_proba(array![[0.5]].view()).is_ok());

    let (x_small, y_small) = (array![[0.], [1.]], array![1, 2]);
    assert_eq!(
        estimator.fit(x_small.view(), y_small.view()).unwrap_err(),
        EstimatorError::NotEnoughSamples {
            n_neighbors: 3,
            n_samples: 2
        }
    );
    assert!(estimator.classes().is_none());
    assert_eq!(
        estimator.predict_proba(array![[0.5]].view()).unwrap_err(),
        EstimatorError::NotFitted
    );
}
