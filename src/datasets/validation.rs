//! Input validation shared by the estimators.

use ndarray::{ArrayView1, ArrayView2};

use crate::estimators::error::{EstimatorError, Result};
use crate::Float;

/// Checks that the records hold at least one sample and one feature, and
/// only finite values.
pub fn check_records<F: Float>(X: ArrayView2<F>) -> Result<()> {
    if X.nrows() == 0 || X.ncols() == 0 {
        return Err(EstimatorError::EmptyInput);
    }
    if X.iter().any(|x| !x.is_finite()) {
        return Err(EstimatorError::NonFiniteRecords);
    }
    Ok(())
}

/// Checks the records as [`check_records`] does, and that there is exactly
/// one label per sample.
pub fn check_records_labels<F: Float, L>(X: ArrayView2<F>, y: ArrayView1<L>) -> Result<()> {
    if X.nrows() != y.len() {
        return Err(EstimatorError::SampleMismatch {
            records: X.nrows(),
            labels: y.len(),
        });
    }
    check_records(X)
}
