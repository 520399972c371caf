use super::{Dataset, DatasetBase, DatasetView, Records, Targets};
use crate::estimators::error::{EstimatorError, Result};
use ndarray::{ArrayBase, Axis, Data, Ix1, Ix2};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// This implementation block provides a method for the creation of datasets
/// from a pair of records and targets.
impl<R: Records, T: Targets> From<(R, T)> for DatasetBase<R, T> {
    fn from(data: (R, T)) -> Self {
        DatasetBase {
            records: data.0,
            targets: data.1,
        }
    }
}

/// This implementation block provides methods to get record and target objects
/// from the dataset.
impl<R: Records, T: Targets> DatasetBase<R, T> {
    /// This method instantiates a new dataset from records and targets.
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase { records, targets }
    }

    /// This method is a getter for the targets.
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// This method is a getter for the records.
    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn n_samples(&self) -> usize {
        self.records.n_samples()
    }

    pub fn n_features(&self) -> usize {
        self.records.n_features()
    }
}

impl<F, L, S, T> DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>
where
    F: Clone,
    L: Clone,
    S: Data<Elem = F>,
    T: Data<Elem = L>,
{
    /// This method borrows the records and targets of the dataset.
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase::new(self.records.view(), self.targets.view())
    }

    /// This method shuffles the samples with a generator seeded by `seed` and
    /// splits them in a training and a test dataset. The test dataset holds
    /// `ceil(n_samples * test_ratio)` samples.
    pub fn train_test_split(
        &self,
        test_ratio: f32,
        seed: u64,
    ) -> Result<(Dataset<F, L>, Dataset<F, L>)> {
        if !(test_ratio > 0. && test_ratio < 1.) {
            return Err(EstimatorError::InvalidTestRatio(test_ratio));
        }
        let n_samples = self.n_samples();
        if self.targets.n_samples() != n_samples {
            return Err(EstimatorError::SampleMismatch {
                records: n_samples,
                labels: self.targets.n_samples(),
            });
        }

        let n_test = (n_samples as f32 * test_ratio).ceil() as usize;
        if n_test == 0 || n_test >= n_samples {
            return Err(EstimatorError::EmptySplit {
                n_samples,
                test_ratio,
            });
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        let (test_indices, train_indices) = indices.split_at(n_test);

        let train = DatasetBase::new(
            self.records.select(Axis(0), train_indices),
            self.targets.select(Axis(0), train_indices),
        );
        let test = DatasetBase::new(
            self.records.select(Axis(0), test_indices),
            self.targets.select(Axis(0), test_indices),
        );
        Ok((train, test))
    }
}
