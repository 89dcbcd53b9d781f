//! Split evaluation
//!
use std::cmp::Ordering;

use ndarray::{ArrayView1, ArrayView2};
use thicket::{DatasetView, Float, SampleIndices};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{DecisionTreeValidParams, SplitQuality};

/// The best split found for a node
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitCandidate<F> {
    /// Feature on which the node is split
    pub feature_idx: usize,
    /// Samples with `value <= threshold` go to the left child, the others to the right one
    pub threshold: F,
    /// `impurity(parent) - |L|/|P| impurity(L) - |R|/|P| impurity(R)`
    pub impurity_decrease: F,
}

/// Searches the best threshold over a set of candidate features
///
/// The evaluator only reads the dataset. It is shared by all nodes of a tree and can be shared
/// across threads.
pub struct SplitEvaluator<'a, F> {
    records: ArrayView2<'a, F>,
    targets: ArrayView1<'a, usize>,
    num_labels: usize,
    split_quality: SplitQuality,
    min_samples_leaf: usize,
    min_impurity_decrease: F,
}

impl<'a, F: Float> SplitEvaluator<'a, F> {
    pub fn new(
        dataset: &DatasetView<'a, F>,
        num_labels: usize,
        params: &DecisionTreeValidParams<F>,
    ) -> Self {
        SplitEvaluator {
            records: dataset.records,
            targets: dataset.targets,
            num_labels,
            split_quality: params.split_quality(),
            min_samples_leaf: params.min_samples_leaf(),
            min_impurity_decrease: params.min_impurity_decrease(),
        }
    }

    /// Finds the split with the largest impurity decrease
    ///
    /// Candidate features are scanned in ascending order and, for every feature, the
    /// boundaries between distinct consecutive values in ascending order. Only a strictly
    /// better score replaces the current best, so ties resolve to the first boundary found.
    ///
    /// Returns `None` if no boundary exists, i.e. every candidate feature is constant on the
    /// subset, or if the best decrease does not exceed the minimum impurity decrease. With the
    /// default minimum of zero only splits which do not improve the impurity are rejected.
    pub fn best_split(
        &self,
        indices: &SampleIndices,
        candidate_features: &[usize],
    ) -> Option<SplitCandidate<F>> {
        let nsamples = indices.len();
        if nsamples < 2 {
            return None;
        }

        let mut parent_counts = vec![0; self.num_labels];
        for &idx in indices.iter() {
            parent_counts[self.targets[idx]] += 1;
        }
        let parent_impurity: F = self.split_quality.impurity(&parent_counts, nsamples);
        let total = F::cast(nsamples);

        let mut features = candidate_features.to_vec();
        features.sort_unstable();

        let mut best: Option<SplitCandidate<F>> = None;
        let mut sorted_values = Vec::with_capacity(nsamples);

        for &feature_idx in &features {
            // (value of the feature, label) for all samples of the node, sorted by value.
            // The sort is stable, equal values keep the order of `indices`.
            sorted_values.clear();
            sorted_values.extend(
                indices
                    .iter()
                    .map(|&idx| (self.records[(idx, feature_idx)], self.targets[idx])),
            );
            sorted_values.sort_by(|a: &(F, usize), b| {
                a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
            });

            // All samples start in the right child and move one by one to the left child
            let mut left_counts = vec![0; self.num_labels];
            let mut right_counts = parent_counts.clone();

            for i in 0..nsamples - 1 {
                let (value, label) = sorted_values[i];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                // equal values end up in the same child
                let next_value = sorted_values[i + 1].0;
                if value >= next_value {
                    continue;
                }

                let nleft = i + 1;
                let nright = nsamples - nleft;
                if nleft < self.min_samples_leaf || nright < self.min_samples_leaf {
                    continue;
                }

                let left_impurity: F = self.split_quality.impurity(&left_counts, nleft);
                let right_impurity: F = self.split_quality.impurity(&right_counts, nright);
                let impurity_decrease = parent_impurity
                    - F::cast(nleft) / total * left_impurity
                    - F::cast(nright) / total * right_impurity;

                let improves = best
                    .as_ref()
                    .map(|best| impurity_decrease > best.impurity_decrease)
                    .unwrap_or(true);

                if improves {
                    best = Some(SplitCandidate {
                        feature_idx,
                        threshold: midpoint(value, next_value),
                        impurity_decrease,
                    });
                }
            }
        }

        best.filter(|best| best.impurity_decrease > self.min_impurity_decrease)
    }
}

/// Threshold between two distinct consecutive values
///
/// The midpoint is used unless rounding pushes it onto `upper`, in which case `lower` keeps
/// `upper` in the right child.
fn midpoint<F: Float>(lower: F, upper: F) -> F {
    let mid = lower + (upper - lower) / F::cast(2.0);
    if mid < upper {
        mid
    } else {
        lower
    }
}
