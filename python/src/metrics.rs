use numpy::{PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use speciesrank::metrics;

use crate::to_py_err;

/// Mean reciprocal rank of the true labels in the rankings
#[pyfunction]
fn mrr_score(y_true: PyReadonlyArray1<i64>, y_pred: PyReadonlyArray2<i64>) -> PyResult<f64> {
    metrics::mrr_score(y_true.as_array(), y_pred.as_array()).map_err(to_py_err)
}

/// Fraction of true labels among the 30 first ranked labels
#[pyfunction]
fn top30_score(y_true: PyReadonlyArray1<i64>, y_pred: PyReadonlyArray2<i64>) -> PyResult<f64> {
    metrics::top30_score(y_true.as_array(), y_pred.as_array()).map_err(to_py_err)
}

#[pyfunction]
fn accuracy_score(y_true: PyReadonlyArray1<i64>, y_pred: PyReadonlyArray2<i64>) -> PyResult<f64> {
    metrics::accuracy_score(y_true.as_array(), y_pred.as_array()).map_err(to_py_err)
}

/// Mean rank of the true labels found in the rankings, `None` if none is found
#[pyfunction]
fn mean_rank_score(
    y_true: PyReadonlyArray1<i64>,
    y_pred: PyReadonlyArray2<i64>,
) -> PyResult<Option<f64>> {
    metrics::mean_rank_score(y_true.as_array(), y_pred.as_array()).map_err(to_py_err)
}

#[pyfunction]
fn mean_sum_proba_rank(proba_pred: PyReadonlyArray2<f64>) -> PyResult<f64> {
    metrics::mean_sum_proba_rank(proba_pred.as_array()).map_err(to_py_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mrr_score, m)?)?;
    m.add_function(wrap_pyfunction!(top30_score, m)?)?;
    m.add_function(wrap_pyfunction!(accuracy_score, m)?)?;
    m.add_function(wrap_pyfunction!(mean_rank_score, m)?)?;
    m.add_function(wrap_pyfunction!(mean_sum_proba_rank, m)?)?;
    Ok(())
}
