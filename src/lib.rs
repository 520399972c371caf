#![allow(non_snake_case)]

use ndarray::ScalarOperand;

use num_traits::{FromPrimitive, NumAssignOps, NumCast, Signed};

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;

/// Float point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point
/// number and implement them for 32bit and 64bit float points.
/// Ref: https://github.com/rust-ml/linfa/blob/master/src/dataset/mod.rs#L36
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap_or_else(Self::nan)
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Class labels
///
/// Species identifiers are compared for equality when scoring and ordered
/// when the label set is derived from raw training labels.
pub trait Label: Clone + Ord + fmt::Debug {}

impl<L: Clone + Ord + fmt::Debug> Label for L {}

pub mod datasets;
pub mod estimators;
pub mod helpers;
pub mod metrics;
