
/// This module contains the sorting routines used to turn class probabilities
/// into rankings.
pub mod sorting {
    use ndarray::{ArrayBase, Data, Ix1};
    use std::cmp::Ordering;

    /// This is a helper method that sorts the indices of an array based on some
    /// `compare` closure. The sort is stable: indices of equal elements keep
    /// their relative order.
    /// Reference: `https://github.com/rust-ndarray/ndarray/issues/1145`
    pub fn argsort_by<S, F>(arr: &ArrayBase<S, Ix1>, mut compare: F) -> Vec<usize>
    where
        S: Data,
        F: FnMut(&S::Elem, &S::Elem) -> Ordering,
    {
        let mut indices: Vec<usize> = (0..arr.len()).collect();
        indices.sort_by(move |&i, &j| compare(&arr[i], &arr[j]));
        indices
    }
}

/// This module contains helpers to build label sets.
pub mod labels {
    use crate::Label;

    /// This function returns the sorted unique values of `labels`.
    pub fn unique_labels<'a, L, I>(labels: I) -> Vec<L>
    where
        L: Label + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        let mut classes: Vec<L> = labels.into_iter().cloned().collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// This function maps every label to its index in the sorted `classes`,
    /// or `None` if a label is not a known class.
    pub fn encode_labels<'a, L, I>(classes: &[L], labels: I) -> Option<Vec<usize>>
    where
        L: Label + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        labels
            .into_iter()
            .map(|label| classes.binary_search(label).ok())
            .collect()
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn assert_array2d_all_close<F>(x: ArrayView2<F>, y: ArrayView2<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.dim(), y.dim());
        for ((i, j), &xij) in x.indexed_iter() {
            if xij.abs_diff_ne(&y[[i, j]], delta) {
                panic!(
                    "x: {}, y: {} ; with precision level {}",
                    xij,
                    y[[i, j]],
                    delta
                );
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, std_dev: f64, seed: u64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., std_dev).unwrap();

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..data_x.capacity() {
            data_x.push(normal.sample(&mut r));
        }
        data_x
    }

    /// Draws `n_samples` points around `n_classes` well separated centers. The
    /// label of the `i`-th sample is `i % n_classes`.
    pub fn generate_random_blobs(
        n_samples: usize,
        n_features: usize,
        n_classes: usize,
    ) -> (Array2<f64>, Array1<usize>) {
        let data_c = fill_random_vector(n_classes * n_features, 10., 42);
        let data_e = fill_random_vector(n_samples * n_features, 1., 43);
        let centers = Array2::from_shape_vec((n_classes, n_features), data_c).unwrap();
        let noise = Array2::from_shape_vec((n_samples, n_features), data_e).unwrap();

        let y = Array1::from_shape_fn(n_samples, |i| i % n_classes);
        let X = Array2::from_shape_fn((n_samples, n_features), |(i, j)| {
            centers[[y[i], j]] + noise[[i, j]]
        });

        (X, y)
    }
}
