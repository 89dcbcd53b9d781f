//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use crate::error::Result;
use ndarray::{ArrayBase, Data, Ix2};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a decision forest fits its trees to the labelled records.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> std::result::Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets
///
/// Prediction is fallible: a model may not be trained yet, or the records may not match the
/// schema the model was trained on.
pub trait PredictInplace<R: Records, T> {
    /// Predict something in place
    fn predict_inplace(&self, x: &R, y: &mut T) -> Result<()>;

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R: Records, T> {
    fn predict(&self, x: R) -> Result<T>;
}

impl<'a, F, D, T, O> Predict<&'a ArrayBase<D, Ix2>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> Result<T> {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets)?;
        Ok(targets)
    }
}

impl<'a, F, D, T, S, O> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, S>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, S>) -> Result<T> {
        let mut targets = self.default_target(&dataset.records);
        self.predict_inplace(&dataset.records, &mut targets)?;
        Ok(targets)
    }
}
