use std::ops::Deref;

use crate::random::RandomSource;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// An ordered set of sample row indices
///
/// Every node of a decision tree owns the indices of the samples that reached it. Splitting a
/// node consumes its set and produces two disjoint children, so the sets of a tree never
/// overlap. Bootstrap sets drawn with [`SampleIndices::bootstrap`] are the exception and may
/// repeat an index.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleIndices(Vec<usize>);

impl SampleIndices {
    /// All rows of a dataset with `nsamples` samples, in ascending order
    pub fn all(nsamples: usize) -> Self {
        SampleIndices((0..nsamples).collect())
    }

    /// Draws `nsamples` indices with replacement from `0..nsamples`
    ///
    /// The draws are consumed from `rng` in order, one call to `uniform_index` per index.
    pub fn bootstrap<R: RandomSource + ?Sized>(nsamples: usize, rng: &mut R) -> Self {
        SampleIndices(
            (0..nsamples)
                .map(|_| rng.uniform_index(nsamples))
                .collect(),
        )
    }

    /// Splits the set into the indices for which `goes_left` holds and the rest
    ///
    /// The relative order of the indices is preserved on both sides.
    pub fn partition<P: FnMut(usize) -> bool>(self, mut goes_left: P) -> (Self, Self) {
        let (left, right): (Vec<usize>, Vec<usize>) =
            self.0.into_iter().partition(|&idx| goes_left(idx));

        (SampleIndices(left), SampleIndices(right))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SampleIndices {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for SampleIndices {
    fn from(indices: Vec<usize>) -> Self {
        SampleIndices(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn bootstrap_draws_with_replacement() {
        let mut rng = SmallRng::seed_from_u64(42);
        let indices = SampleIndices::bootstrap(50, &mut rng);

        assert_eq!(indices.len(), 50);
        assert!(indices.iter().all(|&idx| idx < 50));

        // 50 draws out of 50 without a single collision is astronomically unlikely
        let mut unique = indices.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert!(unique.len() < 50);
    }

    #[test]
    fn bootstrap_is_reproducible() {
        let first = SampleIndices::bootstrap(20, &mut SmallRng::seed_from_u64(7));
        let second = SampleIndices::bootstrap(20, &mut SmallRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn partition_keeps_order_and_is_disjoint() {
        let indices = SampleIndices::from(vec![5, 1, 4, 2, 3, 0]);
        let (even, odd) = indices.partition(|idx| idx % 2 == 0);

        assert_eq!(even.as_slice(), &[4, 2, 0]);
        assert_eq!(odd.as_slice(), &[5, 1, 3]);
    }

    #[test]
    fn all_covers_every_row() {
        assert_eq!(SampleIndices::all(4).into_inner(), vec![0, 1, 2, 3]);
        assert!(SampleIndices::all(0).is_empty());
    }
}
