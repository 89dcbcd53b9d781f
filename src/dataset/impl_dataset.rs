use super::{Dataset, DatasetBase, DatasetView, Float, Records, SampleIndices};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};

impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase { records, targets }
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }
}

impl<F, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = usize>,
{
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase::new(self.records.view(), self.targets.view())
    }

    /// Smallest number of classes able to hold every label, `max(label) + 1`
    ///
    /// Returns zero for an empty target array.
    pub fn num_labels(&self) -> usize {
        self.targets.iter().max().map(|x| x + 1).unwrap_or(0)
    }

    /// Counts the occurrences of every class among the samples in `indices`
    ///
    /// Duplicated indices are counted once per occurrence. Every label must be smaller than
    /// `num_labels`, which [`check_classification`](Self::check_classification) guarantees.
    pub fn class_counts(&self, indices: &SampleIndices, num_labels: usize) -> Vec<usize> {
        let mut counts = vec![0; num_labels];
        for &idx in indices.iter() {
            counts[self.targets[idx]] += 1;
        }

        counts
    }
}

impl<F: Float, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = usize>,
{
    /// Checks that the dataset describes a valid classification problem with `num_labels`
    /// classes
    ///
    /// Fails with `Error::InvalidArgument` when there are no samples or no features, fewer than
    /// two classes, a target array of the wrong length, a label outside of `0..num_labels` or a
    /// feature value which is NaN.
    pub fn check_classification(&self, num_labels: usize) -> Result<()> {
        let (nsamples, nfeatures) = self.records.dim();

        if nsamples == 0 {
            return Err(Error::InvalidArgument(
                "the feature matrix has no samples".into(),
            ));
        }
        if nfeatures == 0 {
            return Err(Error::InvalidArgument(
                "the feature matrix has no features".into(),
            ));
        }
        if num_labels < 2 {
            return Err(Error::InvalidArgument(format!(
                "at least two labels are required, got {}",
                num_labels
            )));
        }
        if self.targets.len() != nsamples {
            return Err(Error::InvalidArgument(format!(
                "expected {} labels, one per sample, got {}",
                nsamples,
                self.targets.len()
            )));
        }
        if let Some((sample, label)) = self
            .targets
            .iter()
            .enumerate()
            .find(|&(_, &label)| label >= num_labels)
        {
            return Err(Error::InvalidArgument(format!(
                "label {} of sample {} is out of range 0..{}",
                label, sample, num_labels
            )));
        }
        if self.records.iter().any(|x| x.is_nan()) {
            return Err(Error::InvalidArgument(
                "the feature matrix contains NaN values".into(),
            ));
        }

        Ok(())
    }
}

impl<F: Float> From<(Array2<F>, Array1<usize>)> for Dataset<F> {
    fn from(rec_tar: (Array2<F>, Array1<usize>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
