//! Error types in thicket
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("model is not trained, call `learn` or `fit` first")]
    NotTrained,
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
