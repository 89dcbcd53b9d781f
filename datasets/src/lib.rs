//! `thicket-datasets` provides synthetic classification datasets ready to be used in tests,
//! benchmarks and demos.
//!
//! ## Current State
//!
//! Currently the following generators are provided in [`generate`]:
//!
//! * [`generate::xor`]: uniform samples in the unit square labelled by the quadrant pattern
//! * [`generate::blobs`]: gaussian blobs around given centroids, one class per blob
//!
//! Generators draw from a caller provided random number generator, so a seeded generator
//! reproduces the same dataset.
//!
//! ```
//! use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
//!
//! let dataset = thicket_datasets::generate::xor(100, &mut StdRng::seed_from_u64(42));
//! assert_eq!(dataset.records().dim(), (100, 2));
//! ```

pub mod generate;
