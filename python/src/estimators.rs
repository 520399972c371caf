use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use speciesrank::estimators::{
    frequency::ClassFrequency,
    hyperparams::{KNeighborsParams, RankedClassifierParams},
    knn::KNeighbors,
    param_guard::ParamGuard,
    ranked::RankedClassifier,
    traits::{RankedScorer, TrainablePredictor},
};

use crate::to_py_err;

/// __init__(self, ranking_size, n_neighbors)
///
/// Ranks species by their share among the nearest training samples
#[pyclass(module = "speciesrankpy")]
pub struct RankedKNeighborsWrapper {
    inner: RankedClassifier<f64, i64, KNeighbors<f64, i64>>,
}

#[pymethods]
impl RankedKNeighborsWrapper {
    #[new]
    fn new(ranking_size: usize, n_neighbors: usize) -> PyResult<Self> {
        let params = RankedClassifierParams::new()
            .ranking_size(ranking_size)
            .check()
            .map_err(to_py_err)?;
        let knn = KNeighborsParams::new()
            .n_neighbors(n_neighbors)
            .check()
            .map_err(to_py_err)?;
        Ok(RankedKNeighborsWrapper {
            inner: RankedClassifier::new(params, KNeighbors::new(knn)),
        })
    }

    fn fit(&mut self, X: PyReadonlyArray2<f64>, y: PyReadonlyArray1<i64>) -> PyResult<()> {
        self.inner
            .fit(X.as_array(), y.as_array())
            .map_err(to_py_err)?;
        Ok(())
    }

    fn predict<'py>(&self, py: Python<'py>, X: PyReadonlyArray2<f64>) -> PyResult<&'py PyArray2<i64>> {
        let y_pred = self.inner.predict(X.as_array()).map_err(to_py_err)?;
        Ok(y_pred.into_pyarray(py))
    }

    fn predict_with_proba<'py>(
        &self,
        py: Python<'py>,
        X: PyReadonlyArray2<f64>,
    ) -> PyResult<(&'py PyArray2<i64>, &'py PyArray2<f64>)> {
        let (y_pred, proba_pred) = self
            .inner
            .predict_with_proba(X.as_array())
            .map_err(to_py_err)?;
        Ok((y_pred.into_pyarray(py), proba_pred.into_pyarray(py)))
    }

    fn score(&self, X: PyReadonlyArray2<f64>, y: PyReadonlyArray1<i64>) -> PyResult<f64> {
        self.inner
            .score(X.as_array(), y.as_array())
            .map_err(to_py_err)
    }
}

/// __init__(self, ranking_size)
///
/// Ranks species by their frequency in the training labels
#[pyclass(module = "speciesrankpy")]
pub struct RankedFrequencyWrapper {
    inner: RankedClassifier<f64, i64, ClassFrequency<f64, i64>>,
}

#[pymethods]
impl RankedFrequencyWrapper {
    #[new]
    fn new(ranking_size: usize) -> PyResult<Self> {
        let params = RankedClassifierParams::new()
            .ranking_size(ranking_size)
            .check()
            .map_err(to_py_err)?;
        Ok(RankedFrequencyWrapper {
            inner: RankedClassifier::new(params, ClassFrequency::new()),
        })
    }

    fn fit(&mut self, X: PyReadonlyArray2<f64>, y: PyReadonlyArray1<i64>) -> PyResult<()> {
        self.inner
            .fit(X.as_array(), y.as_array())
            .map_err(to_py_err)?;
        Ok(())
    }

    fn predict<'py>(&self, py: Python<'py>, X: PyReadonlyArray2<f64>) -> PyResult<&'py PyArray2<i64>> {
        let y_pred = self.inner.predict(X.as_array()).map_err(to_py_err)?;
        Ok(y_pred.into_pyarray(py))
    }

    fn score(&self, X: PyReadonlyArray2<f64>, y: PyReadonlyArray1<i64>) -> PyResult<f64> {
        self.inner
            .score(X.as_array(), y.as_array())
            .map_err(to_py_err)
    }
}
