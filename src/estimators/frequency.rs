use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::error::{EstimatorError, Result};
use super::traits::TrainablePredictor;
use crate::datasets::validation::{check_records, check_records_labels};
use crate::helpers::labels::{encode_labels, unique_labels};
use crate::{Float, Label};

/// The class frequency estimator
///
/// Ignores the records and predicts, for every sample, the frequency of each
/// class in the training labels. Ranking with it always yields the most
/// common species first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFrequency<F, L> {
    classes: Option<Array1<L>>,
    frequencies: Option<Array1<F>>,
}

impl<F: Float, L: Label> Default for ClassFrequency<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> ClassFrequency<F, L> {
    pub fn new() -> Self {
        ClassFrequency {
            classes: None,
            frequencies: None,
        }
    }

    /// This method is a getter for the training frequency of each class.
    pub fn frequencies(&self) -> Option<ArrayView1<F>> {
        self.frequencies.as_ref().map(|frequencies| frequencies.view())
    }
}

impl<F: Float, L: Label> TrainablePredictor<F, L> for ClassFrequency<F, L> {
    fn fit(&mut self, X: ArrayView2<F>, y: ArrayView1<L>) -> Result<&mut Self> {
        self.classes = None;
        self.frequencies = None;
        check_records_labels(X, y)?;

        let classes = unique_labels(y.iter());
        let mut counts = Array1::<F>::zeros(classes.len());
        for j in encode_labels(&classes, y.iter()).unwrap_or_default() {
            counts[j] += F::one();
        }
        let frequencies = counts / F::cast(y.len());

        debug!("computed frequencies of {} classes", classes.len());
        self.classes = Some(Array1::from(classes));
        self.frequencies = Some(frequencies);
        Ok(self)
    }

    fn classes(&self) -> Option<ArrayView1<L>> {
        self.classes.as_ref().map(|classes| classes.view())
    }

    fn predict_proba(&self, X: ArrayView2<F>) -> Result<Array2<F>> {
        let frequencies = self.frequencies.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_records(X)?;
        Ok(Array2::from_shape_fn(
            (X.nrows(), frequencies.len()),
            |(_, j)| frequencies[j],
        ))
    }
}
