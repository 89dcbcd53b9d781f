//! Utility functions for randomly generating datasets

use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal, Uniform},
    RandomExt,
};
use thicket::Dataset;

/// Draws `nsamples` points uniformly from the unit square
///
/// A point is labelled `0` when both coordinates lie on the same side of `0.5` and `1`
/// otherwise. No single axis-aligned threshold separates the classes, but two levels of splits
/// do.
pub fn xor(nsamples: usize, rng: &mut impl Rng) -> Dataset<f64> {
    let records: Array2<f64> = Array::random_using((nsamples, 2), Uniform::new(0., 1.), rng);
    let targets = records
        .rows()
        .into_iter()
        .map(|row| ((row[0] > 0.5) != (row[1] > 0.5)) as usize)
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

/// Special case of `blobs_with_distribution` with a standard normal distribution.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Dataset<f64> {
    blobs_with_distribution(blob_size, blob_centroids, StandardNormal, rng)
}

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// The points of the blob around the `i`-th centroid are labelled with class `i`.
pub fn blobs_with_distribution(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    distribution: impl Distribution<f64> + Clone,
    rng: &mut impl Rng,
) -> Dataset<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut records: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));
    let mut targets: Array1<usize> = Array1::zeros(n_centroids * blob_size);

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, distribution.clone(), rng);

        let range = blob_index * blob_size..(blob_index + 1) * blob_size;
        records.slice_mut(s![range.clone(), ..]).assign(&blob);
        targets.slice_mut(s![range]).fill(blob_index);
    }

    Dataset::new(records, targets)
}

/// Generate `blob_size` data points (a "blob") around `blob_centroid` using the given distribution.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

/// Draws labels uniformly from `0..num_labels` for `nsamples` records of pure noise
///
/// Useful to check that a classifier does not find structure where there is none.
///
/// ### Panics
///
/// If `num_labels` is zero
pub fn noise(
    nsamples: usize,
    nfeatures: usize,
    num_labels: usize,
    rng: &mut impl Rng,
) -> Dataset<f64> {
    let records: Array2<f64> = Array::random_using((nsamples, nfeatures), StandardNormal, rng);
    let targets = (0..nsamples)
        .map(|_| rng.gen_range(0..num_labels))
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_rand::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn xor_labels_follow_quadrants() {
        let dataset = xor(200, &mut StdRng::seed_from_u64(7));

        assert_eq!(dataset.records().dim(), (200, 2));
        for (row, &label) in dataset.records().rows().into_iter().zip(dataset.targets()) {
            assert!(row.iter().all(|&x| (0.0..1.0).contains(&x)));
            let expected = if (row[0] > 0.5) == (row[1] > 0.5) { 0 } else { 1 };
            assert_eq!(label, expected);
        }
    }

    #[test]
    fn blobs_are_labelled_by_centroid() {
        let centroids = array![[0., 0.], [10., 10.], [-10., 10.]];
        let dataset = blobs(20, &centroids, &mut StdRng::seed_from_u64(7));

        assert_eq!(dataset.records().dim(), (60, 2));
        assert_eq!(dataset.targets().slice(s![..20]), Array1::<usize>::zeros(20));
        assert_eq!(dataset.targets().slice(s![40..]), Array1::<usize>::from_elem(20, 2));
        assert_eq!(dataset.num_labels(), 3);
    }

    #[test]
    fn noise_labels_are_in_range() {
        let dataset = noise(50, 4, 3, &mut StdRng::seed_from_u64(7));

        assert_eq!(dataset.records().dim(), (50, 4));
        assert!(dataset.targets().iter().all(|&label| label < 3));
    }
}
