use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thicket::prelude::*;
use thicket_datasets::generate;
use thicket_trees::{DecisionForest, MaxFeatures, SplitQuality};

fn trained_on_xor(n_trees: usize, seed: u64) -> (Dataset<f64>, DecisionForest<f64>) {
    let dataset = generate::xor(100, &mut StdRng::seed_from_u64(seed));

    let mut forest = DecisionForest::new();
    forest
        .learn(
            dataset.records(),
            dataset.targets(),
            2,
            n_trees,
            &mut StdRng::seed_from_u64(seed),
        )
        .expect("Training failed");

    (dataset, forest)
}

#[test]
fn xor_quadrants_are_recovered() {
    let (dataset, forest) = trained_on_xor(10, 42);

    let probabilities = forest.predict(dataset.records()).unwrap();
    let correct = probabilities
        .rows()
        .into_iter()
        .zip(dataset.targets())
        .filter(|(row, label)| row[**label] > 0.5)
        .count();

    assert!(
        correct >= 80,
        "Expected at least 80 of 100 samples to be recovered, got {}",
        correct
    );
}

#[test]
fn same_seed_gives_identical_probabilities() {
    let (dataset, first) = trained_on_xor(10, 5);
    let (_, second) = trained_on_xor(10, 5);

    let first = first.predict(dataset.records()).unwrap();
    let second = second.predict(dataset.records()).unwrap();

    // bit-for-bit, not approximately
    assert_eq!(first, second);
}

#[test]
fn different_seeds_grow_different_forests() {
    let dataset = generate::xor(100, &mut StdRng::seed_from_u64(1));

    let mut first = DecisionForest::new();
    first
        .learn(dataset.records(), dataset.targets(), 2, 10, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let mut second = DecisionForest::new();
    second
        .learn(dataset.records(), dataset.targets(), 2, 10, &mut StdRng::seed_from_u64(2))
        .unwrap();

    assert_ne!(first, second);
}

#[test]
fn probabilities_are_distributions() -> Result<()> {
    let centroids = array![[0., 0., 0.], [3., 3., 0.], [0., 3., 3.], [3., 0., 3.]];
    let dataset = generate::blobs(25, &centroids, &mut StdRng::seed_from_u64(3));

    let forest = DecisionForest::params()
        .n_trees(25)
        .split_quality(SplitQuality::Entropy)
        .max_depth(Some(4))
        .fit(&dataset)?;

    let queries = generate::noise(40, 3, 4, &mut StdRng::seed_from_u64(4));
    let probabilities = forest.predict(queries.records())?;

    assert_eq!(probabilities.dim(), (40, 4));
    for row in probabilities.rows() {
        assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn well_separated_blobs_are_classified() -> Result<()> {
    let centroids = array![[-20., -20.], [20., 20.], [-20., 20.]];
    let dataset = generate::blobs(30, &centroids, &mut StdRng::seed_from_u64(9));

    let forest = DecisionForest::params()
        .n_trees(20)
        .max_features(MaxFeatures::All)
        .fit(&dataset)?;

    assert_eq!(forest.predict_labels(&centroids)?, array![0, 1, 2]);

    Ok(())
}

#[test]
fn untrained_forest_fails_to_predict() {
    let forest = DecisionForest::<f64>::new();

    let result = forest.predict(&array![[0.1, 0.2], [0.3, 0.4]]);
    assert!(matches!(result, Err(Error::NotTrained)));
    assert!(matches!(
        forest.predict_labels(&array![[0.1, 0.2]]),
        Err(Error::NotTrained)
    ));
}

#[test]
fn shape_contract_is_enforced() {
    let (_, forest) = trained_on_xor(3, 42);

    let probabilities = forest.predict(&Array2::<f64>::zeros((7, 2))).unwrap();
    assert_eq!(probabilities.dim(), (7, 2));

    let result = forest.predict(&Array2::<f64>::zeros((7, 3)));
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

    // rows shorter than the training schema are rejected instead of indexed out of bounds
    let result = forest.predict(&Array2::<f64>::zeros((7, 1)));
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

    let mut output = Array2::zeros((6, 2));
    let result = forest.predict_inplace(&Array2::<f64>::zeros((7, 2)), &mut output);
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn invalid_training_input_is_rejected() {
    let records = array![[0., 1.], [1., 0.], [1., 1.]];
    let labels = array![0, 1, 0];
    let mut rng = StdRng::seed_from_u64(42);
    let mut forest = DecisionForest::new();

    let no_trees = forest.learn(&records, &labels, 2, 0, &mut rng);
    assert!(matches!(no_trees, Err(Error::InvalidArgument(_))));

    let single_label = forest.learn(&records, &labels, 1, 5, &mut rng);
    assert!(matches!(single_label, Err(Error::InvalidArgument(_))));

    let no_samples = forest.learn(
        &Array2::<f64>::zeros((0, 2)),
        &Array1::<usize>::zeros(0),
        2,
        5,
        &mut rng,
    );
    assert!(matches!(no_samples, Err(Error::InvalidArgument(_))));

    let no_features = forest.learn(&Array2::<f64>::zeros((3, 0)), &labels, 2, 5, &mut rng);
    assert!(matches!(no_features, Err(Error::InvalidArgument(_))));

    let out_of_range = forest.learn(&records, &array![0, 2, 1], 2, 5, &mut rng);
    assert!(matches!(out_of_range, Err(Error::InvalidArgument(_))));

    let wrong_length = forest.learn(&records, &array![0, 1], 2, 5, &mut rng);
    assert!(matches!(wrong_length, Err(Error::InvalidArgument(_))));

    let nan = forest.learn(&array![[0., f64::NAN], [1., 0.]], &array![0, 1], 2, 5, &mut rng);
    assert!(matches!(nan, Err(Error::InvalidArgument(_))));

    assert!(!forest.is_trained());
}

#[test]
fn failed_training_keeps_previous_trees() {
    let (dataset, mut forest) = trained_on_xor(4, 42);
    let before = forest.clone();

    let result = forest.learn(
        dataset.records(),
        dataset.targets(),
        2,
        0,
        &mut StdRng::seed_from_u64(0),
    );

    assert!(result.is_err());
    assert_eq!(forest, before);
}

#[test]
fn training_again_replaces_the_trees() {
    let (_, mut forest) = trained_on_xor(4, 42);
    assert_eq!(forest.num_trees(), 4);

    let records = array![[0., 0., 0.], [1., 1., 1.], [2., 2., 2.]];
    forest
        .learn(&records, &array![0, 1, 2], 3, 7, &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(forest.num_trees(), 7);
    assert_eq!(forest.num_features(), 3);
    assert_eq!(forest.num_labels(), 3);
    assert!(forest.trees().iter().all(|tree| tree.num_labels() == 3));
}

#[test]
fn unused_labels_keep_zero_probability() {
    let records = array![[0.], [1.], [2.], [3.]];
    let labels = array![0, 0, 1, 1];

    let mut forest = DecisionForest::new();
    forest
        .learn(&records, &labels, 4, 10, &mut StdRng::seed_from_u64(42))
        .unwrap();

    let probabilities = forest.predict(&records).unwrap();
    assert_eq!(probabilities.ncols(), 4);
    assert!(probabilities.column(2).iter().all(|&p| p == 0.0));
    assert!(probabilities.column(3).iter().all(|&p| p == 0.0));
}
