use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// On-disk model schema (JSON)
// ---------------------------------------------------------------------------

/// Serialized gradient-boosted regression model.
///
/// The layout mirrors the XGBoost JSON dump: each tree stores its nodes as
/// parallel arrays in BFS order, with `left_children[i] == -1` marking a
/// leaf. The prediction for a record is `base_score` plus the sum of the
/// reached leaf weights over all trees.
///
/// ```json
/// {
///   "feature_names": ["Amina Flow", "Flotation Column 01 Air Flow", "% Iron Concentrate"],
///   "base_score": 2.2,
///   "objective": "reg:squarederror",
///   "trees": [
///     {
///       "left_children":    [1, -1, -1],
///       "right_children":   [2, -1, -1],
///       "split_indices":    [0, 0, 0],
///       "split_conditions": [490.0, 0.0, 0.0],
///       "default_left":     [true, false, false],
///       "base_weights":     [0.0, 0.85, -0.55]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Column names the model was trained with, in the model's own order.
    pub feature_names: Vec<String>,
    /// Global bias added to every prediction.
    #[serde(default)]
    pub base_score: f64,
    /// Training objective, informational only.
    #[serde(default)]
    pub objective: Option<String>,
    pub trees: Vec<TreeArtifact>,
}

/// One tree, nodes as parallel arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    /// Index into `feature_names` for split nodes; ignored for leaves.
    pub split_indices: Vec<u32>,
    pub split_conditions: Vec<f64>,
    /// Which branch a missing (NaN) value takes at each split.
    pub default_left: Vec<bool>,
    /// Leaf weight for leaves; ignored for split nodes.
    pub base_weights: Vec<f64>,
}

impl TreeArtifact {
    pub fn num_nodes(&self) -> usize {
        self.left_children.len()
    }

    /// All parallel arrays must agree on the node count.
    pub fn is_consistent(&self) -> bool {
        let n = self.num_nodes();
        self.right_children.len() == n
            && self.split_indices.len() == n
            && self.split_conditions.len() == n
            && self.default_left.len() == n
            && self.base_weights.len() == n
    }
}
