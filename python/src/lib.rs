use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use speciesrank::estimators::error::EstimatorError;

#[allow(non_snake_case)]
mod estimators;
mod metrics;

pub(crate) fn to_py_err(err: EstimatorError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

#[pymodule]
fn speciesrankpy(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<estimators::RankedKNeighborsWrapper>()?;
    m.add_class::<estimators::RankedFrequencyWrapper>()?;
    metrics::register(m)?;
    Ok(())
}
