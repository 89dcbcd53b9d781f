//! `thicket` grows randomized decision forests for classification of tabular data.
//!
//! This crate holds the pieces shared by the algorithm crates of the workspace:
//!
//! * the [`Dataset`] container pairing a feature matrix with integer class labels, and the
//!   [`SampleIndices`] used to address subsets of its rows
//! * the [`RandomSource`](random::RandomSource) through which all training randomness flows
//! * the error taxonomy in [`error`]
//! * the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits implemented by models,
//!   together with the [`ParamGuard`] pattern for checked hyperparameters
//!
//! The decision tree and forest implementations live in `thicket-trees`.

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod random;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, SampleIndices};
pub use error::Error;
pub use param_guard::ParamGuard;
