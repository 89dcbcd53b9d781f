use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thicket::prelude::*;
use thicket_datasets::generate;
use thicket_trees::{DecisionForest, DecisionTree, MaxFeatures};

fn accuracy(predicted: &ndarray::Array1<usize>, dataset: &Dataset<f64>) -> f64 {
    let correct = predicted
        .iter()
        .zip(dataset.targets())
        .filter(|(a, b)| a == b)
        .count();
    correct as f64 / dataset.nsamples() as f64
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=thicket_trees=debug shows every grown tree
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "thicket_trees=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let train = generate::xor(500, &mut rng);
    let valid = generate::xor(200, &mut rng);

    // 1. Single-tree baseline
    let tree = DecisionTree::params()
        .max_features(MaxFeatures::All)
        .fit(&train)?;
    let probabilities: Array2<f64> = tree.predict(valid.records())?;
    let tree_labels = probabilities
        .rows()
        .into_iter()
        .map(|row| (row[1] > row[0]) as usize)
        .collect();
    println!(
        "Single-tree accuracy: {:.2} ({} leaves, depth {})",
        accuracy(&tree_labels, &valid),
        tree.num_leaves(),
        tree.max_depth()
    );

    // 2. Decision forest
    let mut forest = DecisionForest::new();
    forest.learn(train.records(), train.targets(), 2, 50, &mut rng)?;
    let forest_labels = forest.predict_labels(valid.records())?;
    println!(
        "Forest accuracy: {:.2} ({} trees)",
        accuracy(&forest_labels, &valid),
        forest.num_trees()
    );
    println!("Feature importance: {:?}", forest.feature_importance()?);

    Ok(())
}
