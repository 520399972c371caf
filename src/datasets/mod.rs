use ndarray::{Array1, Array2, ArrayView1, ArrayView2};


mod impl_datasets;
mod impl_records;
mod impl_targets;
pub mod validation;

/// A dataset pairs a design matrix (one row per sample) with the label of
/// every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// A dataset owning its records and labels
pub type Dataset<F, L> = DatasetBase<Array2<F>, Array1<L>>;

/// A dataset borrowing its records and labels
pub type DatasetView<'a, F, L> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, L>>;

/// Records are the rows of the design matrix.
pub trait Records: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
    fn n_features(&self) -> usize;
}

/// Targets hold one label per sample.
pub trait Targets: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
}
