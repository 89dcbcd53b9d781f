//! Decision Forest Classifier
//!
//! An ensemble of randomized decision trees, each grown on a bootstrap sample of the data. The
//! forest predicts the average of the class probabilities of its trees.

use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2, Zip};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use thicket::{
    dataset::Records,
    error::{Error, Result},
    traits::*,
    DatasetBase, DatasetView, Float, ParamGuard, SampleIndices,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::algorithm::check_output;
use super::{DecisionTree, DecisionTreeParams, MaxFeatures, SplitQuality};

/// A fitted decision forest
///
/// A forest is created untrained by [`DecisionForest::new`] and trained with
/// [`learn`](DecisionForest::learn), or fitted directly from its [parameters](DecisionForestParams).
/// Training again replaces all trees.
///
/// ### Example
///
/// ```rust
/// use thicket::prelude::*;
/// use thicket_trees::DecisionForest;
/// use ndarray::array;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let records = array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
/// let labels = array![0, 1, 1, 0];
///
/// let mut forest = DecisionForest::new();
/// forest.learn(&records, &labels, 2, 10, &mut StdRng::seed_from_u64(42)).unwrap();
///
/// let probabilities = forest.predict(&records).unwrap();
/// assert_eq!(probabilities.dim(), (4, 2));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionForest<F> {
    trees: Vec<DecisionTree<F>>,
    num_features: usize,
    num_labels: usize,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionForestValidParams<F> {
    n_trees: usize,
    seed: u64,
    tree_params: DecisionTreeParams<F>,
}

impl<F: Float> DecisionForestValidParams<F> {
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tree_params(&self) -> &DecisionTreeParams<F> {
        &self.tree_params
    }
}

/// The set of hyperparameters of a [decision forest](struct.DecisionForest.html)
///
/// Besides the number of trees and the seed, every hyperparameter of the individual
/// [trees](struct.DecisionTreeParams.html) can be set here. The `seed` of the tree parameters is
/// ignored, trees draw their seeds from the forest generator.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionForestParams<F>(DecisionForestValidParams<F>);

impl<F: Float> DecisionForestParams<F> {
    pub fn new() -> Self {
        Self(DecisionForestValidParams {
            n_trees: 100,
            seed: 42,
            tree_params: DecisionTreeParams::new(),
        })
    }

    /// Sets the number of trees
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.0.n_trees = n_trees;
        self
    }

    /// Sets the seed of the generator used by `fit`
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    /// Replaces the parameters of the individual trees
    pub fn tree_params(mut self, tree_params: DecisionTreeParams<F>) -> Self {
        self.0.tree_params = tree_params;
        self
    }

    /// Sets the number of classes, inferred from the labels when unset
    pub fn num_labels(mut self, num_labels: Option<usize>) -> Self {
        self.0.tree_params = self.0.tree_params.num_labels(num_labels);
        self
    }

    pub fn split_quality(mut self, split_quality: SplitQuality) -> Self {
        self.0.tree_params = self.0.tree_params.split_quality(split_quality);
        self
    }

    /// Sets an optional depth limit for every tree, trees are unbounded by default
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.tree_params = self.0.tree_params.max_depth(max_depth);
        self
    }

    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.0.tree_params = self.0.tree_params.min_samples_split(min_samples_split);
        self
    }

    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.tree_params = self.0.tree_params.min_samples_leaf(min_samples_leaf);
        self
    }

    pub fn min_impurity_decrease(mut self, min_impurity_decrease: F) -> Self {
        self.0.tree_params = self
            .0
            .tree_params
            .min_impurity_decrease(min_impurity_decrease);
        self
    }

    /// Sets the number of candidate features drawn at every node
    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.0.tree_params = self.0.tree_params.max_features(max_features);
        self
    }
}

impl<F: Float> Default for DecisionForestParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> ParamGuard for DecisionForestParams<F> {
    type Checked = DecisionForestValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_trees == 0 {
            return Err(Error::InvalidArgument(
                "n_trees must be at least 1".into(),
            ));
        }
        self.0.tree_params.check_ref()?;

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> DecisionForestValidParams<F> {
    /// Grows all trees in parallel
    ///
    /// One seed per tree is drawn from `rng` before the trees are distributed over the rayon
    /// thread pool, so the result does not depend on the number of threads.
    #[instrument(skip_all, fields(n_trees = self.n_trees, nsamples = dataset.nsamples()))]
    fn grow_forest<R: Rng>(
        &self,
        dataset: &DatasetView<'_, F>,
        rng: &mut R,
    ) -> Result<DecisionForest<F>> {
        let tree_params = self.tree_params.check_ref()?;
        let num_labels = tree_params
            .num_labels()
            .unwrap_or_else(|| dataset.num_labels());
        dataset.check_classification(num_labels)?;

        let (nsamples, num_features) = dataset.records.dim();
        info!(
            n_trees = self.n_trees,
            nsamples,
            num_features,
            num_labels,
            max_features = tree_params.max_features().resolve(num_features),
            "growing decision forest"
        );

        let seeds: Vec<u64> = (0..self.n_trees).map(|_| rng.gen()).collect();
        let trees = seeds
            .into_par_iter()
            .enumerate()
            .map(|(tree_idx, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                let indices = SampleIndices::bootstrap(nsamples, &mut rng);
                let tree = DecisionTree::grow(tree_params, dataset, num_labels, indices, &mut rng);

                debug!(
                    tree_idx,
                    nodes = tree.num_nodes(),
                    leaves = tree.num_leaves(),
                    depth = tree.max_depth(),
                    "grew decision tree"
                );
                tree
            })
            .collect::<Vec<_>>();

        Ok(DecisionForest {
            trees,
            num_features,
            num_labels,
        })
    }
}

impl<F, D, S> Fit<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>, Error> for DecisionForestValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    S: Data<Elem = usize>,
{
    type Object = DecisionForest<F>;

    /// Grow a decision forest on the dataset, drawing all randomness from a generator seeded
    /// with `seed`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>) -> Result<Self::Object> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.grow_forest(&dataset.view(), &mut rng)
    }
}

impl<F: Float> Default for DecisionForest<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DecisionForest<F> {
    /// Creates an untrained forest
    pub fn new() -> Self {
        DecisionForest {
            trees: Vec::new(),
            num_features: 0,
            num_labels: 0,
        }
    }

    /// Defaults are provided if the optional parameters are not specified:
    /// * `n_trees = 100`
    /// * `seed = 42`
    /// * the defaults of [`DecisionTree::params`]
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionForestParams<F> {
        DecisionForestParams::new()
    }

    /// Trains `n_trees` trees on the records and their labels in `0..num_labels`
    ///
    /// All randomness is drawn from `rng`. On success the previous trees are replaced, on
    /// failure the forest is left untouched. Fails with `Error::InvalidArgument` if there are
    /// no samples, no features, fewer than two labels, no trees or malformed labels.
    pub fn learn<D, S, R>(
        &mut self,
        records: &ArrayBase<D, Ix2>,
        labels: &ArrayBase<S, Ix1>,
        num_labels: usize,
        n_trees: usize,
        rng: &mut R,
    ) -> Result<()>
    where
        D: Data<Elem = F>,
        S: Data<Elem = usize>,
        R: Rng,
    {
        let params = Self::params()
            .n_trees(n_trees)
            .num_labels(Some(num_labels))
            .check()?;
        let dataset = DatasetBase::new(records.view(), labels.view());

        self.learn_with(&params, &dataset, rng)
    }

    /// Trains the forest with custom parameters, drawing all randomness from `rng`
    ///
    /// The `seed` of the parameters is ignored. On failure the forest is left untouched.
    pub fn learn_with<R: Rng>(
        &mut self,
        params: &DecisionForestValidParams<F>,
        dataset: &DatasetView<'_, F>,
        rng: &mut R,
    ) -> Result<()> {
        *self = params.grow_forest(dataset, rng)?;
        Ok(())
    }

    /// Returns true once the forest holds trees
    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn trees(&self) -> &[DecisionTree<F>] {
        &self.trees
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of features of the training records, zero while untrained
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of classes, zero while untrained
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Predicts the most probable class of every row
    ///
    /// Ties resolve to the smallest class id.
    pub fn predict_labels<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<usize>> {
        let probabilities: Array2<F> = self.predict(x)?;

        Ok(probabilities
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, F::neg_infinity()), |best, (label, &p)| {
                        if p > best.1 {
                            (label, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }

    /// Return the feature importance averaged over all trees
    pub fn feature_importance(&self) -> Result<Vec<F>> {
        if !self.is_trained() {
            return Err(Error::NotTrained);
        }

        let mut importance = vec![F::zero(); self.num_features];
        for tree in &self.trees {
            for (total, imp) in importance.iter_mut().zip(tree.feature_importance()) {
                *total += imp;
            }
        }
        let n_trees = F::cast(self.trees.len());
        importance.iter_mut().for_each(|x| *x /= n_trees);

        Ok(importance)
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array2<F>> for DecisionForest<F> {
    /// Write the averaged class probabilities of each row of `x` into the rows of `y`.
    ///
    /// Rows are processed in parallel. Fails with `Error::NotTrained` before training and with
    /// `Error::ShapeMismatch` if `x` has the wrong number of features or `y` the wrong shape.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array2<F>) -> Result<()> {
        if !self.is_trained() {
            return Err(Error::NotTrained);
        }
        if x.ncols() != self.num_features {
            return Err(Error::ShapeMismatch {
                expected: format!("{} features", self.num_features),
                found: format!("{} features", x.ncols()),
            });
        }
        check_output(y, x.nrows(), self.num_labels)?;

        let n_trees = F::cast(self.trees.len());
        Zip::from(y.rows_mut())
            .and(x.rows())
            .par_for_each(|mut target, row| {
                target.fill(F::zero());
                for tree in &self.trees {
                    target += &tree.leaf_probabilities(&row);
                }
                target /= n_trees;
            });

        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        Array2::zeros((x.nrows(), self.num_labels))
    }
}
