use super::error::{EstimatorError, Result};
use super::param_guard::ParamGuard;

/// Number of labels returned per sample when the ranking size is not set.
pub const DEFAULT_RANKING_SIZE: usize = 30;

/// A verified hyperparameter set ready to build a [`RankedClassifier`](super::RankedClassifier)
#[derive(Debug, Clone, PartialEq)]
pub struct RankedClassifierValidParams {
    ranking_size: usize,
}

impl RankedClassifierValidParams {
    pub fn ranking_size(&self) -> usize {
        self.ranking_size
    }
}

/// A hyper-parameter set during construction
///
/// Configures how many labels a ranked classifier returns for each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedClassifierParams(RankedClassifierValidParams);

impl Default for RankedClassifierParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure a ranked classifier
impl RankedClassifierParams {
    /// Create default ranked classifier hyper parameters
    pub fn new() -> RankedClassifierParams {
        Self(RankedClassifierValidParams {
            ranking_size: DEFAULT_RANKING_SIZE,
        })
    }

    /// Set the maximum number of labels returned per sample, most likely
    /// first.
    /// Defaults to `30` if not set.
    pub fn ranking_size(mut self, ranking_size: usize) -> Self {
        self.0.ranking_size = ranking_size;
        self
    }
}

impl ParamGuard for RankedClassifierParams {
    type Checked = RankedClassifierValidParams;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.ranking_size == 0 {
            Err(EstimatorError::InvalidRankingSize(self.0.ranking_size))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the fitting of a k-nearest
/// neighbours estimator
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighborsValidParams {
    n_neighbors: usize,
}

impl KNeighborsValidParams {
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }
}

/// A hyper-parameter set during construction
///
/// The class probabilities of a sample are the vote shares of its
/// `n_neighbors` closest training samples.
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighborsParams(KNeighborsValidParams);

impl Default for KNeighborsParams {
    fn default() -> Self {
        Self::new()
    }
}

impl KNeighborsParams {
    /// Create default k-nearest neighbours hyper parameters
    pub fn new() -> KNeighborsParams {
        Self(KNeighborsValidParams { n_neighbors: 5 })
    }

    /// Set the number of neighbours voting for each sample.
    /// Defaults to `5` if not set.
    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.0.n_neighbors = n_neighbors;
        self
    }
}

impl ParamGuard for KNeighborsParams {
    type Checked = KNeighborsValidParams;
    type Error = EstimatorError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_neighbors == 0 {
            Err(EstimatorError::InvalidNeighbors(self.0.n_neighbors))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
