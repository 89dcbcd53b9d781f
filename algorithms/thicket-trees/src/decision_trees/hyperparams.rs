use thicket::{
    error::{Error, Result},
    Float, ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// The metric used to determine the feature by which a node is split
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitQuality {
    /// Measures the degree of probability of a randomly chosen point in the subtree being misclassified, defined as
    /// one minus the sum over all labels of the squared probability of encountering that label.
    /// The Gini index of the root is given by the weighted sum of the indexes of its two subtrees.
    /// At each step the split is applied to the feature which decreases the most the Gini impurity of the root.
    Gini,
    /// Measures the entropy of a subtree, defined as the sum over all labels of the probability of encountering that label in the
    /// subtree times its logarithm in base two, with negative sign. The entropy of the root minus the weighted sum of the entropy
    /// of its two subtrees defines the "information gain" obtained by applying the split. At each step the split is applied to the
    /// feature with the biggest information gain
    Entropy,
}

impl SplitQuality {
    /// Impurity of a subset from its class histogram
    ///
    /// `nsamples` is the sum of `class_counts`. An empty subset has zero impurity.
    pub fn impurity<F: Float>(&self, class_counts: &[usize], nsamples: usize) -> F {
        if nsamples == 0 {
            return F::zero();
        }
        let n = F::cast(nsamples);

        match self {
            SplitQuality::Gini => {
                let purity = class_counts
                    .iter()
                    .map(|&c| F::cast(c) / n)
                    .map(|p| p * p)
                    .sum::<F>();

                F::one() - purity
            }
            SplitQuality::Entropy => class_counts
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| F::cast(c) / n)
                .map(|p| -p * p.log2())
                .sum(),
        }
    }
}

/// Number of features drawn as split candidates at every node
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaxFeatures {
    /// `ceil(sqrt(nfeatures))`
    Sqrt,
    /// `ceil(log2(nfeatures))`, at least one
    Log2,
    /// Every feature is a candidate, which removes the feature randomization
    All,
    /// A fixed count, clamped to the number of features
    Fixed(usize),
    /// A fraction in `(0, 1]` of the features, rounded up
    Fraction(f32),
}

impl MaxFeatures {
    /// Resolves the candidate count for a dataset with `nfeatures` features
    ///
    /// The result lies in `1..=nfeatures` whenever `nfeatures` is positive.
    pub fn resolve(&self, nfeatures: usize) -> usize {
        let n = nfeatures as f64;
        let count = match *self {
            MaxFeatures::Sqrt => n.sqrt().ceil() as usize,
            MaxFeatures::Log2 => n.log2().ceil() as usize,
            MaxFeatures::All => nfeatures,
            MaxFeatures::Fixed(count) => count,
            MaxFeatures::Fraction(ratio) => (n * ratio as f64).ceil() as usize,
        };

        count.max(1).min(nfeatures)
    }
}

/// The set of hyperparameters that can be specified for growing a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use thicket_trees::{DecisionTree, MaxFeatures, SplitQuality};
/// use thicket::prelude::*;
/// use ndarray::array;
///
/// let params = DecisionTree::<f64>::params()
///     .split_quality(SplitQuality::Entropy)
///     .max_features(MaxFeatures::All)
///     .max_depth(Some(3));
///
/// let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![0, 0, 1, 1]);
/// let tree = params.fit(&dataset).unwrap();
///
/// let probabilities = tree.predict(&dataset).unwrap();
/// assert_eq!(probabilities.row(0).to_vec(), vec![1.0, 0.0]);
/// assert_eq!(probabilities.row(3).to_vec(), vec![0.0, 1.0]);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeValidParams<F> {
    split_quality: SplitQuality,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    min_impurity_decrease: F,
    max_features: MaxFeatures,
    num_labels: Option<usize>,
    seed: u64,
}

impl<F: Float> DecisionTreeValidParams<F> {
    pub fn split_quality(&self) -> SplitQuality {
        self.split_quality
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn min_impurity_decrease(&self) -> F {
        self.min_impurity_decrease
    }

    pub fn max_features(&self) -> MaxFeatures {
        self.max_features
    }

    pub fn num_labels(&self) -> Option<usize> {
        self.num_labels
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeParams<F>(DecisionTreeValidParams<F>);

impl<F: Float> DecisionTreeParams<F> {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            split_quality: SplitQuality::Gini,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            min_impurity_decrease: F::zero(),
            max_features: MaxFeatures::Sqrt,
            num_labels: None,
            seed: 42,
        })
    }

    /// Sets the metric used to decide the feature on which to split a node
    pub fn split_quality(mut self, split_quality: SplitQuality) -> Self {
        self.0.split_quality = split_quality;
        self
    }

    /// Sets the optional limit to the depth of the decision tree
    ///
    /// Trees are unbounded by default and grow until every leaf is pure or cannot be split.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Sets the minimum number of samples required to split a node
    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.0.min_samples_split = min_samples_split;
        self
    }

    /// Sets the minimum number of samples that a split has to place in each child
    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Sets the decrease in impurity that a split has to exceed in order to be applied
    pub fn min_impurity_decrease(mut self, min_impurity_decrease: F) -> Self {
        self.0.min_impurity_decrease = min_impurity_decrease;
        self
    }

    /// Sets the number of candidate features drawn at every node
    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.0.max_features = max_features;
        self
    }

    /// Sets the number of classes, which is the length of every leaf probability vector
    ///
    /// When unset, it is inferred from the training labels as the largest label plus one.
    pub fn num_labels(mut self, num_labels: Option<usize>) -> Self {
        self.0.num_labels = num_labels;
        self
    }

    /// Sets the seed of the generator drawing candidate features when fitting a single tree
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }
}

impl<F: Float> Default for DecisionTreeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DecisionTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `split_quality = SplitQuality::Gini`
    /// * `max_depth = None`
    /// * `min_samples_split = 2`
    /// * `min_samples_leaf = 1`
    /// * `min_impurity_decrease = 0`, any split with a positive decrease is accepted
    /// * `max_features = MaxFeatures::Sqrt`
    /// * `num_labels = None`
    /// * `seed = 42`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams<F> {
        DecisionTreeParams::new()
    }
}

impl<F: Float> ParamGuard for DecisionTreeParams<F> {
    type Checked = DecisionTreeValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;

        if params.min_samples_split < 2 {
            return Err(Error::InvalidArgument(format!(
                "min_samples_split must be at least 2, got {}",
                params.min_samples_split
            )));
        }
        if params.min_samples_leaf == 0 {
            return Err(Error::InvalidArgument(
                "min_samples_leaf must be at least 1".into(),
            ));
        }
        if params.max_depth == Some(0) {
            return Err(Error::InvalidArgument(
                "max_depth must be at least 1 when set".into(),
            ));
        }
        if !params.min_impurity_decrease.is_finite() || params.min_impurity_decrease < F::zero() {
            return Err(Error::InvalidArgument(format!(
                "min_impurity_decrease must be a finite non-negative number, got {}",
                params.min_impurity_decrease
            )));
        }
        match params.max_features {
            MaxFeatures::Fixed(0) => {
                return Err(Error::InvalidArgument(
                    "max_features must draw at least one feature".into(),
                ))
            }
            MaxFeatures::Fraction(ratio) if !(ratio > 0.0 && ratio <= 1.0) => {
                return Err(Error::InvalidArgument(format!(
                    "max_features fraction must be in (0, 1], got {}",
                    ratio
                )))
            }
            _ => {}
        }
        if let Some(num_labels) = params.num_labels {
            if num_labels < 2 {
                return Err(Error::InvalidArgument(format!(
                    "at least two labels are required, got {}",
                    num_labels
                )));
            }
        }

        Ok(params)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
