use super::Records;
use ndarray::{ArrayBase, Axis, Data, Ix2};

/// This implements the [`Records`] trait for dense matrices.
impl<F, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn n_samples(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn n_features(&self) -> usize {
        self.len_of(Axis(1))
    }
}

/// This implements the [`Records`] trait for references.
impl<R: Records> Records for &R {
    type Elem = R::Elem;

    fn n_samples(&self) -> usize {
        (*self).n_samples()
    }

    fn n_features(&self) -> usize {
        (*self).n_features()
    }
}
