//! Datasets
//!
//! This module implements the dataset struct, the index sets used to address subsets of its
//! samples and the floating point bound shared by all algorithms.
use ndarray::{ArrayBase, ArrayView, Ix1, Ix2, OwnedRepr, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast};
use rand::distributions::uniform::SampleUniform;

use std::fmt;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod impl_records;
mod indices;

pub use indices::SampleIndices;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a dataset
/// and for the class probabilities produced by a fitted model.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a matrix of records with
/// dimensionality (nsamples, nfeatures) and one class label per record.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array of class ids with dimensionality (nsamples)
///
/// No shape relation between records and targets is enforced on construction. Algorithms call
/// [`DatasetBase::check_classification`] before they read the data.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// Dataset
///
/// The most commonly used type of dataset: owned records of type `F` and owned class ids.
pub type Dataset<F> = DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<usize>, Ix1>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F> = DatasetBase<ArrayView<'a, F, Ix2>, ArrayView<'a, usize, Ix1>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
