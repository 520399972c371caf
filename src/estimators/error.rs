use thiserror::Error;

/// Simplified `Result` using [`EstimatorError`] as error type
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Coarse families of [`EstimatorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed hyperparameters or inputs
    Validation,
    /// The classifier has not been fitted yet
    NotFitted,
    /// No probability-emitting estimator is available
    NotImplemented,
}

/// Error variants from hyperparameter construction, input validation,
/// model estimation and scoring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid ranking size {0}, must be strictly positive")]
    InvalidRankingSize(usize),
    #[error("invalid number of neighbors {0}, must be strictly positive")]
    InvalidNeighbors(usize),
    #[error("invalid test ratio {0}, must lie in (0, 1)")]
    InvalidTestRatio(f32),
    /// The input has no samples
    #[error("empty input")]
    EmptyInput,
    #[error("found {records} samples in the records but {labels} labels")]
    SampleMismatch { records: usize, labels: usize },
    #[error("expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("records contain NaN or infinite values")]
    NonFiniteRecords,
    #[error("estimator returned a {got:?} probability matrix, expected {expected:?}")]
    ProbaShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("estimator returned a NaN, infinite or negative probability")]
    InvalidProbabilities,
    #[error("{n_neighbors} neighbors requested but only {n_samples} training samples")]
    NotEnoughSamples { n_neighbors: usize, n_samples: usize },
    #[error("cannot split {n_samples} samples with test ratio {test_ratio}, one side would be empty")]
    EmptySplit { n_samples: usize, test_ratio: f32 },
    #[error("ranked predictions have no columns")]
    EmptyRanking,
    #[error("this classifier is not fitted yet, call `fit` first")]
    NotFitted,
    #[error("{0}")]
    NotImplemented(&'static str),
}

impl EstimatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimatorError::NotFitted => ErrorKind::NotFitted,
            EstimatorError::NotImplemented(_) => ErrorKind::NotImplemented,
            _ => ErrorKind::Validation,
        }
    }
}
