use thiserror::Error;

use super::features::FeatureRecord;

// ---------------------------------------------------------------------------
// Predictor trait – the seam between the UI controller and the model
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("tree {tree}: node {node} references out-of-range child {child}")]
    CorruptTree { tree: usize, node: usize, child: i32 },
    #[error("tree {tree}: traversal did not reach a leaf")]
    NoLeaf { tree: usize },
    #[error("{0}")]
    Inference(String),
}

/// One inference call: a fixed-shape record in, one scalar out.
/// Implementations must be pure and stateless across calls.
pub trait Predictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError>;
}

// ---------------------------------------------------------------------------
// ForestPredictor – validated in-memory form of the loaded artifact
// ---------------------------------------------------------------------------

/// A single validated tree, parallel arrays in BFS order.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<u32>,
    pub split_conditions: Vec<f64>,
    pub default_left: Vec<bool>,
    pub base_weights: Vec<f64>,
}

/// The deserialized regression model: an additive tree ensemble.
/// Created once by the loader, shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ForestPredictor {
    pub(crate) trees: Vec<Tree>,
    pub(crate) base_score: f64,
    /// Maps the artifact's feature index to the canonical
    /// [`super::features::FEATURE_NAMES`] position.
    pub(crate) feature_map: [usize; 3],
}

impl ForestPredictor {
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn eval_tree(&self, tree_idx: usize, record: &FeatureRecord) -> Result<f64, PredictError> {
        let tree = &self.trees[tree_idx];
        let n = tree.left_children.len();
        let mut node = 0usize;

        // A well-formed tree reaches a leaf in at most `n` steps; more means
        // the child links form a cycle.
        for _ in 0..n {
            let left = tree.left_children[node];
            if left == -1 {
                return Ok(tree.base_weights[node]);
            }
            let right = tree.right_children[node];

            let feature = tree.split_indices[node] as usize;
            let value = record.value(self.feature_map[feature]);

            let go_left = if value.is_nan() {
                tree.default_left[node]
            } else {
                value < tree.split_conditions[node]
            };
            let child = if go_left { left } else { right };

            if child < 0 || child as usize >= n {
                return Err(PredictError::CorruptTree {
                    tree: tree_idx,
                    node,
                    child,
                });
            }
            node = child as usize;
        }
        Err(PredictError::NoLeaf { tree: tree_idx })
    }
}

impl Predictor for ForestPredictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError> {
        let mut sum = self.base_score;
        for tree_idx in 0..self.trees.len() {
            sum += self.eval_tree(tree_idx, record)?;
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::features::{AIR_FLOW, AMINE_FLOW, IRON_CONCENTRATE};

    fn record(amine: f64, air: f64, iron: f64) -> FeatureRecord {
        FeatureRecord::builder()
            .set(AMINE_FLOW, amine)
            .unwrap()
            .set(AIR_FLOW, air)
            .unwrap()
            .set(IRON_CONCENTRATE, iron)
            .unwrap()
            .build()
            .unwrap()
    }

    /// Root split on feature 0 at the given threshold, leaves `lo`/`hi`.
    fn stump(feature: u32, threshold: f64, lo: f64, hi: f64) -> Tree {
        Tree {
            left_children: vec![1, -1, -1],
            right_children: vec![2, -1, -1],
            split_indices: vec![feature, 0, 0],
            split_conditions: vec![threshold, 0.0, 0.0],
            default_left: vec![true, false, false],
            base_weights: vec![0.0, lo, hi],
        }
    }

    fn forest(trees: Vec<Tree>, base_score: f64) -> ForestPredictor {
        ForestPredictor {
            trees,
            base_score,
            feature_map: [0, 1, 2],
        }
    }

    #[test]
    fn single_stump_routes_by_threshold() {
        let model = forest(vec![stump(0, 490.0, 0.85, -0.55)], 2.0);
        let low = model.predict(&record(480.0, 280.0, 65.0)).unwrap();
        assert!((low - 2.85).abs() < 1e-12);
        let high = model.predict(&record(500.0, 280.0, 65.0)).unwrap();
        assert!((high - 1.45).abs() < 1e-12);
        // Exactly at the threshold goes right (split is `value < threshold`).
        let at = model.predict(&record(490.0, 280.0, 65.0)).unwrap();
        assert!((at - 1.45).abs() < 1e-12);
    }

    #[test]
    fn ensemble_sums_leaves_and_base_score() {
        let model = forest(
            vec![stump(0, 490.0, 0.85, -0.55), stump(2, 66.0, 0.3, -0.2)],
            2.2,
        );
        // amine < 490 (+0.85), iron >= 66 (-0.2)
        let got = model.predict(&record(480.0, 280.0, 67.0)).unwrap();
        assert!((got - 2.85).abs() < 1e-12);
    }

    #[test]
    fn feature_map_reorders_artifact_columns() {
        // Artifact declared its columns as [iron, amine, air]; a split on
        // artifact feature 0 must read the iron value.
        let model = ForestPredictor {
            trees: vec![stump(0, 66.0, 1.0, -1.0)],
            base_score: 0.0,
            feature_map: [2, 0, 1],
        };
        assert_eq!(model.predict(&record(480.0, 280.0, 65.0)), Ok(1.0));
        assert_eq!(model.predict(&record(480.0, 280.0, 67.0)), Ok(-1.0));
    }

    #[test]
    fn nan_follows_default_direction() {
        // The builder rejects NaN, so feed the traversal a raw record.
        let rec = FeatureRecord::from_raw([480.0, f64::NAN, 65.0]);

        let mut left_default = stump(1, 280.0, 0.5, -0.5);
        left_default.default_left[0] = true;
        let model = forest(vec![left_default], 0.0);
        assert_eq!(model.predict(&rec), Ok(0.5));

        let mut right_default = stump(1, 280.0, 0.5, -0.5);
        right_default.default_left[0] = false;
        let model = forest(vec![right_default], 0.0);
        assert_eq!(model.predict(&rec), Ok(-0.5));
    }

    #[test]
    fn corrupt_child_index_errors_instead_of_panicking() {
        let mut bad = stump(0, 490.0, 0.85, -0.55);
        bad.left_children[0] = 7;
        let model = forest(vec![bad], 0.0);
        assert_eq!(
            model.predict(&record(480.0, 280.0, 65.0)),
            Err(PredictError::CorruptTree {
                tree: 0,
                node: 0,
                child: 7
            })
        );
    }

    #[test]
    fn cyclic_tree_errors_instead_of_looping() {
        let cycle = Tree {
            left_children: vec![1, 0],
            right_children: vec![1, 0],
            split_indices: vec![0, 0],
            split_conditions: vec![1.0, 1.0],
            default_left: vec![true, true],
            base_weights: vec![0.0, 0.0],
        };
        let model = forest(vec![cycle], 0.0);
        assert_eq!(
            model.predict(&record(480.0, 280.0, 65.0)),
            Err(PredictError::NoLeaf { tree: 0 })
        );
    }
}
