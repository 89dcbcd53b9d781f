//! Randomized decision trees
//!
use std::collections::BTreeSet;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix1, Ix2};
use rand::{rngs::StdRng, SeedableRng};
use tracing::trace;

use super::{DecisionTreeValidParams, NodeIter, SplitEvaluator};
use thicket::{
    dataset::Records,
    error::{Error, Result},
    random::{choose_prefix, RandomSource},
    traits::*,
    DatasetBase, DatasetView, Float, SampleIndices,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Handle of a node in the arena of a [`DecisionTree`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in [`DecisionTree::nodes`]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The rule which turned a node into a leaf
///
/// Rules are checked in declaration order and the first one that holds wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopRule {
    /// Fewer samples than `min_samples_split`
    TooFewSamples,
    /// Every sample carries the same label
    Homogeneous,
    /// The node reached `max_depth`
    MaxDepth,
    /// No split decreases the impurity
    NoValidSplit,
}

impl StopRule {
    /// Checks the rules which do not need a split search
    fn before_split<F: Float>(
        params: &DecisionTreeValidParams<F>,
        class_counts: &[usize],
        nsamples: usize,
        depth: usize,
    ) -> Option<StopRule> {
        if nsamples < params.min_samples_split() {
            Some(StopRule::TooFewSamples)
        } else if class_counts.iter().filter(|&&count| count > 0).count() <= 1 {
            Some(StopRule::Homogeneous)
        } else if params
            .max_depth()
            .map(|max_depth| depth >= max_depth)
            .unwrap_or(false)
        {
            Some(StopRule::MaxDepth)
        } else {
            None
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
pub enum TreeNode<F> {
    /// An internal node with exactly two children
    Split {
        feature_idx: usize,
        threshold: F,
        impurity_decrease: F,
        nsamples: usize,
        depth: usize,
        left: NodeId,
        right: NodeId,
    },
    /// A terminal node holding the class frequencies of its samples
    Leaf {
        probabilities: Array1<F>,
        nsamples: usize,
        depth: usize,
    },
}

impl<F: Float> TreeNode<F> {
    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns the depth of the node in the decision tree
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Split { depth, .. } | TreeNode::Leaf { depth, .. } => *depth,
        }
    }

    /// Returns the number of training samples which reached the node, counting bootstrap
    /// duplicates
    pub fn nsamples(&self) -> usize {
        match self {
            TreeNode::Split { nsamples, .. } | TreeNode::Leaf { nsamples, .. } => *nsamples,
        }
    }

    /// Returns `Some(probabilities)` for leaf nodes and `None` for internal nodes.
    pub fn probabilities(&self) -> Option<ArrayView1<'_, F>> {
        match self {
            TreeNode::Leaf { probabilities, .. } => Some(probabilities.view()),
            TreeNode::Split { .. } => None,
        }
    }

    /// Returns both children, first left then right, for internal nodes
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            TreeNode::Split { left, right, .. } => Some((*left, *right)),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Return the split (feature index, threshold) and its impurity decrease
    pub fn split(&self) -> Option<(usize, F, F)> {
        match self {
            TreeNode::Split {
                feature_idx,
                threshold,
                impurity_decrease,
                ..
            } => Some((*feature_idx, *threshold, *impurity_decrease)),
            TreeNode::Leaf { .. } => None,
        }
    }
}

/// Grows the node arena of a single tree
struct TreeGrower<'a, 'd, 'r, F, R: ?Sized> {
    dataset: &'a DatasetView<'d, F>,
    params: &'a DecisionTreeValidParams<F>,
    evaluator: SplitEvaluator<'d, F>,
    num_labels: usize,
    max_features: usize,
    feature_pool: Vec<usize>,
    rng: &'r mut R,
    nodes: Vec<TreeNode<F>>,
}

impl<'a, 'd, 'r, F: Float, R: RandomSource + ?Sized> TreeGrower<'a, 'd, 'r, F, R> {
    /// Grows the tree of the samples in `indices` and returns its root
    ///
    /// Pending nodes are kept on an explicit stack, so the depth of the tree is not bounded by
    /// the call stack. The left child is popped before the right one and candidate features
    /// are drawn in depth-first order, left subtree first.
    fn grow(&mut self, indices: SampleIndices) -> NodeId {
        let root = self.reserve();
        let mut pending = vec![(indices, 0, root)];

        while let Some((indices, depth, id)) = pending.pop() {
            let nsamples = indices.len();
            let class_counts = self.dataset.class_counts(&indices, self.num_labels);

            let split = match StopRule::before_split(self.params, &class_counts, nsamples, depth)
            {
                Some(rule) => Err(rule),
                None => {
                    let candidates =
                        choose_prefix(&mut self.feature_pool, self.max_features, &mut *self.rng)
                            .to_vec();
                    self.evaluator
                        .best_split(&indices, &candidates)
                        .ok_or(StopRule::NoValidSplit)
                }
            };

            let node = match split {
                Err(rule) => self.leaf(&class_counts, nsamples, depth, rule),
                Ok(split) => {
                    let records = self.dataset.records;
                    let (left_indices, right_indices) = indices
                        .partition(|idx| records[(idx, split.feature_idx)] <= split.threshold);

                    let left = self.reserve();
                    let right = self.reserve();
                    pending.push((right_indices, depth + 1, right));
                    pending.push((left_indices, depth + 1, left));

                    TreeNode::Split {
                        feature_idx: split.feature_idx,
                        threshold: split.threshold,
                        impurity_decrease: split.impurity_decrease,
                        nsamples,
                        depth,
                        left,
                        right,
                    }
                }
            };

            self.nodes[id.index()] = node;
        }

        root
    }

    fn leaf(
        &self,
        class_counts: &[usize],
        nsamples: usize,
        depth: usize,
        rule: StopRule,
    ) -> TreeNode<F> {
        trace!(?rule, nsamples, depth, "leaf");

        let total = F::cast(nsamples);
        let probabilities = class_counts
            .iter()
            .map(|&count| F::cast(count) / total)
            .collect();

        TreeNode::Leaf {
            probabilities,
            nsamples,
            depth,
        }
    }

    /// Allocates the slot of a node which is still on the pending stack
    ///
    /// Every reserved slot is overwritten once its node is popped.
    fn reserve(&mut self) -> NodeId {
        self.nodes.push(TreeNode::Leaf {
            probabilities: Array1::zeros(0),
            nsamples: 0,
            depth: 0,
        });
        NodeId(self.nodes.len() - 1)
    }
}

/// A fitted decision tree model for classification.
///
/// ### Structure
/// A decision tree structure is a strict binary tree where:
/// * Each internal node specifies a decision, represented by a choice of a feature and a "threshold" such that all observations for which
/// `feature <= threshold` is true fall in the left subtree, while the others fall in the right subtree.
///
/// * leaf nodes hold the class frequencies of the training samples which reached them
///
/// Nodes live in an arena and refer to their children through [`NodeId`] handles.
///
/// ### Algorithm
///
/// Starting with a single root node holding all training samples, the tree is grown recursively by applying the following rules to every
/// node considered:
///
/// * If the node has fewer than `min_samples_split` samples, all of its samples share a label or it reached `max_depth`, it becomes a leaf;
/// * Otherwise a random subset of `max_features` candidate features is drawn and the best threshold over these features is searched;
/// * If a split decreases the [impurity](enum.SplitQuality.html) by more than `min_impurity_decrease`, two child nodes are generated, the left one
///   containing all samples with `feature <= threshold` and the right one containing the rest;
/// * If no split is found, the node becomes a leaf.
///
/// There is no depth limit unless `max_depth` is set in the [parameters](struct.DecisionTreeParams.html).
///
/// ### Predictions
///
/// A sample is routed from the root to a leaf according to its feature values. The prediction is the probability vector of the
/// reached leaf, with one entry per class.
///
/// ### Example
///
/// ```rust
/// use thicket_trees::{DecisionTree, MaxFeatures};
/// use thicket::prelude::*;
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 1.], [1., 2.], [2., 1.], [2., 2.]],
///     array![0, 0, 1, 2],
/// );
/// let tree = DecisionTree::params()
///     .max_features(MaxFeatures::All)
///     .fit(&dataset)
///     .unwrap();
///
/// // the tree memorizes the training data
/// let probabilities = tree.predict(&dataset).unwrap();
/// assert_eq!(probabilities.column(2).to_vec(), vec![0., 0., 0., 1.]);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<F> {
    nodes: Vec<TreeNode<F>>,
    root: NodeId,
    num_features: usize,
    num_labels: usize,
}

impl<F: Float> DecisionTree<F> {
    /// Grows a tree on the samples in `indices`
    ///
    /// The dataset must have passed `check_classification(num_labels)` and `indices` must be
    /// non-empty.
    pub(crate) fn grow<R: RandomSource + ?Sized>(
        params: &DecisionTreeValidParams<F>,
        dataset: &DatasetView<'_, F>,
        num_labels: usize,
        indices: SampleIndices,
        rng: &mut R,
    ) -> Self {
        let num_features = dataset.nfeatures();
        let mut grower = TreeGrower {
            dataset,
            params,
            evaluator: SplitEvaluator::new(dataset, num_labels, params),
            num_labels,
            max_features: params.max_features().resolve(num_features),
            feature_pool: (0..num_features).collect(),
            rng,
            nodes: Vec::new(),
        };
        let root = grower.grow(indices);

        DecisionTree {
            nodes: grower.nodes,
            root,
            num_features,
            num_labels,
        }
    }

    /// Routes `row` to a leaf and returns its class probabilities
    ///
    /// `row` must hold at least `num_features` entries, the `predict_inplace` impls check this
    /// before routing.
    pub(crate) fn leaf_probabilities<D: Data<Elem = F>>(
        &self,
        row: &ArrayBase<D, Ix1>,
    ) -> ArrayView1<'_, F> {
        let mut node = self.root_node();
        loop {
            match node {
                TreeNode::Leaf { probabilities, .. } => return probabilities.view(),
                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let next = if row[*feature_idx] <= *threshold {
                        left
                    } else {
                        right
                    };
                    node = self.node(*next);
                }
            }
        }
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<'_, F> {
        NodeIter::new(self)
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F> {
        self.node(self.root)
    }

    /// Return the node behind a handle
    ///
    /// ### Panics
    ///
    /// If the handle belongs to another tree with more nodes
    pub fn node(&self, id: NodeId) -> &TreeNode<F> {
        &self.nodes[id.0]
    }

    /// All nodes in arena order, children before their parents
    pub fn nodes(&self) -> &[TreeNode<F>] {
        &self.nodes
    }

    /// Number of features of the training records
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of classes, the length of every leaf probability vector
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth()).max().unwrap_or(0)
    }

    /// Return the indices of the features used by at least one split, in ascending order
    pub fn features(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter_map(|node| node.split())
            .map(|(feature_idx, _, _)| feature_idx)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return the feature importance for each feature
    ///
    /// The importance of a feature is the impurity decrease of all splits on it, weighted by the
    /// fraction of samples reaching the split and normalized to sum to one over all features.
    /// A tree without splits has zero importance everywhere.
    pub fn feature_importance(&self) -> Vec<F> {
        let mut importance = vec![F::zero(); self.num_features];
        let total = F::cast(self.root_node().nsamples());

        for node in &self.nodes {
            if let TreeNode::Split {
                feature_idx,
                impurity_decrease,
                nsamples,
                ..
            } = node
            {
                importance[*feature_idx] += F::cast(*nsamples) / total * *impurity_decrease;
            }
        }

        let sum = importance.iter().cloned().sum::<F>();
        if sum > F::zero() {
            importance.iter_mut().for_each(|x| *x /= sum);
        }

        importance
    }

    fn check_records<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<()> {
        if x.ncols() != self.num_features {
            return Err(Error::ShapeMismatch {
                expected: format!("{} features", self.num_features),
                found: format!("{} features", x.ncols()),
            });
        }

        Ok(())
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array2<F>> for DecisionTree<F> {
    /// Write the class probabilities of each row of `x` into the rows of `y`.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array2<F>) -> Result<()> {
        self.check_records(x)?;
        check_output(y, x.nrows(), self.num_labels)?;

        for (row, mut target) in x.rows().into_iter().zip(y.rows_mut()) {
            target.assign(&self.leaf_probabilities(&row));
        }

        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        Array2::zeros((x.nrows(), self.num_labels))
    }
}

impl<F, D, S> Fit<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>, Error> for DecisionTreeValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    S: Data<Elem = usize>,
{
    type Object = DecisionTree<F>;

    /// Grow a single decision tree on all samples of the dataset, without bootstrapping.
    ///
    /// Candidate features are drawn from a generator seeded with `seed`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>) -> Result<Self::Object> {
        let num_labels = self.num_labels().unwrap_or_else(|| dataset.num_labels());
        dataset.check_classification(num_labels)?;

        let mut rng = StdRng::seed_from_u64(self.seed());
        let indices = SampleIndices::all(dataset.nsamples());

        Ok(DecisionTree::grow(
            self,
            &dataset.view(),
            num_labels,
            indices,
            &mut rng,
        ))
    }
}

/// Checks that an output buffer has one row per sample and one column per class
pub(crate) fn check_output<F>(y: &Array2<F>, nrows: usize, num_labels: usize) -> Result<()> {
    if y.dim() != (nrows, num_labels) {
        return Err(Error::ShapeMismatch {
            expected: format!("output of shape ({}, {})", nrows, num_labels),
            found: format!("output of shape {:?}", y.dim()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{MaxFeatures, SplitQuality};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s, Array, Array1};
    use rand::rngs::SmallRng;
    use thicket::{Dataset, ParamGuard};

    use ndarray_rand::{rand_distr::Uniform, RandomExt};

    /// Checks the strict binary tree invariant and the leaf probability vectors
    fn assert_well_formed(tree: &DecisionTree<f64>) {
        let mut referenced = vec![0; tree.num_nodes()];
        for node in tree.nodes() {
            match node {
                TreeNode::Split {
                    left, right, depth, ..
                } => {
                    referenced[left.index()] += 1;
                    referenced[right.index()] += 1;
                    assert_eq!(tree.node(*left).depth(), depth + 1);
                    assert_eq!(tree.node(*right).depth(), depth + 1);
                }
                TreeNode::Leaf { probabilities, .. } => {
                    assert_eq!(probabilities.len(), tree.num_labels());
                    assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
                    assert_abs_diff_eq!(probabilities.sum(), 1.0, epsilon = 1e-12);
                }
            }
        }

        // every node except the root has exactly one parent
        for (idx, count) in referenced.iter().enumerate() {
            let expected = if idx == tree.root.index() { 0 } else { 1 };
            assert_eq!(*count, expected);
        }
        assert_eq!(tree.num_leaves(), tree.num_nodes() - tree.num_leaves() + 1);
    }

    #[test]
    fn homogeneous_root_is_a_pure_leaf() -> Result<()> {
        let dataset = Dataset::new(array![[1., 2.], [3., 4.], [5., 6.]], array![1, 1, 1]);
        let tree = DecisionTree::params().num_labels(Some(3)).fit(&dataset)?;

        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(
            tree.root_node().probabilities().unwrap().to_vec(),
            vec![0.0, 1.0, 0.0]
        );

        Ok(())
    }

    #[test]
    fn identical_features_with_mixed_labels_become_a_leaf() -> Result<()> {
        let dataset = Dataset::new(
            array![[0.5, 2.], [0.5, 2.], [0.5, 2.], [0.5, 2.]],
            array![0, 1, 1, 1],
        );
        let tree = DecisionTree::params()
            .max_features(MaxFeatures::All)
            .fit(&dataset)?;

        assert!(tree.root_node().is_leaf());
        let probabilities = tree.root_node().probabilities().unwrap();
        assert_eq!(probabilities.to_vec(), vec![0.25, 0.75]);

        Ok(())
    }

    #[test]
    fn single_sample_is_a_leaf() -> Result<()> {
        let dataset = Dataset::new(array![[1.]], array![1]);
        let tree = DecisionTree::params().num_labels(Some(2)).fit(&dataset)?;

        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.root_node().nsamples(), 1);

        Ok(())
    }

    #[test]
    /// Small perfectly separable dataset test
    ///
    /// This dataset of three elements is perfectly separable using the second feature.
    fn perfectly_separable_small() -> Result<()> {
        let data = array![[1., 2., 3.], [1., 2., 4.], [1., 3., 3.5]];
        let targets = array![0, 0, 1];

        let dataset = Dataset::new(data.clone(), targets);
        let model = DecisionTree::params()
            .max_features(MaxFeatures::All)
            .max_depth(Some(1))
            .fit(&dataset)?;

        let probabilities = model.predict(&data)?;
        assert_eq!(probabilities, array![[1., 0.], [1., 0.], [0., 1.]]);
        assert_eq!(model.features(), vec![1]);

        Ok(())
    }

    #[test]
    /// Single feature test
    ///
    /// Generate a dataset where a single feature perfectly correlates
    /// with the target while the remaining features are random uniform
    /// noise and do not add any information.
    fn single_feature_random_noise_binary() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);

        // generate data with 9 white noise and a single correlated feature
        let mut data = Array::random_using((50, 10), Uniform::new(-4., 4.), &mut rng);
        data.slice_mut(s![.., 8]).assign(
            &(0..50)
                .map(|x| if x < 25 { 0.0 } else { 1.0 })
                .collect::<Array1<_>>(),
        );

        let targets = (0..50).map(|x| (x >= 25) as usize).collect::<Array1<_>>();
        let dataset = Dataset::new(data, targets);

        let model = DecisionTree::params()
            .max_features(MaxFeatures::All)
            .fit(&dataset)?;

        // the perfect split is found at the root and nothing else is needed
        assert_eq!(model.features(), vec![8]);
        assert_eq!(model.num_leaves(), 2);

        let ground_truth = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for (imp, truth) in model.feature_importance().iter().zip(&ground_truth) {
            assert_abs_diff_eq!(imp, truth, epsilon = 1e-15);
        }

        Ok(())
    }

    #[test]
    /// Check that for random data the max depth is used
    fn check_max_depth() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);

        // create very sparse data
        let data = Array::random_using((50, 50), Uniform::new(-1., 1.), &mut rng);
        let targets = (0..50).collect::<Array1<usize>>();

        let dataset = Dataset::new(data, targets);

        // check that the provided depth is actually used
        for max_depth in &[1, 2, 4, 5] {
            let model = DecisionTree::params()
                .max_features(MaxFeatures::All)
                .max_depth(Some(*max_depth))
                .fit(&dataset)?;
            assert_eq!(model.max_depth(), *max_depth);
            assert_well_formed(&model);
        }

        Ok(())
    }

    #[test]
    fn unbounded_tree_memorizes_distinct_samples() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);

        let data = Array::random_using((60, 3), Uniform::new(0., 1.), &mut rng);
        let targets = Array::random_using(60, Uniform::new(0, 3), &mut rng);
        let dataset = Dataset::new(data, targets);

        for quality in &[SplitQuality::Gini, SplitQuality::Entropy] {
            let tree = DecisionTree::params()
                .split_quality(*quality)
                .fit(&dataset)?;
            assert_well_formed(&tree);

            // every leaf is pure, so every training sample gets its own label with certainty
            let probabilities = tree.predict(&dataset)?;
            for (row, &label) in probabilities.rows().into_iter().zip(dataset.targets()) {
                assert_eq!(row[label], 1.0);
            }
        }

        Ok(())
    }

    #[test]
    fn same_seed_grows_the_same_tree() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(3);
        let data = Array::random_using((40, 6), Uniform::new(0., 1.), &mut rng);
        let targets = Array::random_using(40, Uniform::new(0, 2), &mut rng);
        let dataset = Dataset::new(data, targets);

        let params = DecisionTree::params().seed(11).check()?;
        assert_eq!(params.fit(&dataset)?, params.fit(&dataset)?);

        Ok(())
    }

    #[test]
    /// Alternating labels along a single feature peel off one sample per level, so the depth
    /// of the tree grows with the number of samples
    fn deep_chain_does_not_exhaust_the_stack() {
        let nsamples = 5000;

        let grower = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                let data = Array::from_shape_fn((nsamples, 1), |(i, _)| i as f64);
                let targets = (0..nsamples).map(|i| i % 2).collect::<Array1<usize>>();
                let dataset = Dataset::new(data, targets);

                let tree = DecisionTree::params()
                    .max_features(MaxFeatures::All)
                    .fit(&dataset)
                    .unwrap();
                let probabilities = tree.predict(&dataset).unwrap();
                let memorized = probabilities
                    .rows()
                    .into_iter()
                    .zip(dataset.targets())
                    .all(|(row, &label)| row[label] == 1.0);

                (tree, memorized)
            })
            .unwrap();
        let (tree, memorized) = grower.join().unwrap();

        assert_eq!(tree.max_depth(), nsamples - 1);
        assert_eq!(tree.num_leaves(), nsamples);
        assert!(memorized);
        assert_well_formed(&tree);
    }

    #[test]
    fn iter_nodes_visits_every_node_level_by_level() -> Result<()> {
        let dataset = Dataset::new(array![[1.], [2.], [3.], [4.]], array![0, 1, 0, 1]);
        let tree = DecisionTree::params().fit(&dataset)?;

        let depths = tree.iter_nodes().map(|node| node.depth()).collect::<Vec<_>>();
        assert_eq!(depths.len(), tree.num_nodes());
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(depths[0], 0);

        Ok(())
    }

    #[test]
    fn wrong_number_of_features_is_rejected() -> Result<()> {
        let dataset = Dataset::new(array![[1., 0.], [2., 0.]], array![0, 1]);
        let tree = DecisionTree::params().fit(&dataset)?;

        let result = tree.predict(&array![[1.0, 2.0, 3.0]]);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

        let result = tree.predict(&array![[1.0]]);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

        let mut output = Array2::zeros((2, 3));
        let result = tree.predict_inplace(dataset.records(), &mut output);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

        Ok(())
    }

    #[test]
    fn invalid_labels_are_rejected() {
        let dataset = Dataset::new(array![[1.], [2.]], array![0, 5]);
        let result = DecisionTree::<f64>::params()
            .num_labels(Some(2))
            .fit(&dataset);

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
