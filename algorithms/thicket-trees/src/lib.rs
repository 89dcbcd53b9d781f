//!
//! # Decision forests
//! `thicket-trees` provides pure Rust implementations of randomized decision tree learning and of
//! a bagged ensemble of such trees for classification.
//!
//! # The big picture
//!
//! A [decision tree](DecisionTree) recursively partitions the samples with axis-aligned threshold
//! tests and stores the class distribution of the training samples in every leaf. At each node
//! only a random subset of the features is searched for the best split.
//!
//! A [decision forest](DecisionForest) grows many such trees, each on its own bootstrap sample
//! of the training data, and predicts the average of their class probabilities. Trees are grown
//! in parallel with `rayon`, yet a forest is fully determined by its seed.
//!
//! # Current state
//!
//! `thicket-trees` currently provides single-tree fitting, forest training with Gini or entropy
//! impurity and probability prediction.
//!

mod decision_trees;

pub use decision_trees::*;

pub use thicket::error::Result;
