use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::artifact::ModelArtifact;
use super::features::FEATURE_NAMES;
use super::predictor::{ForestPredictor, Tree};

/// Artifact filename looked up in the working directory when no path is
/// given on the command line.
pub const DEFAULT_MODEL_PATH: &str = "flotation_model.json";

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("reading model file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing model file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model was trained on columns {found:?}, expected {FEATURE_NAMES:?}")]
    FeatureMismatch { found: Vec<String> },
    #[error("model has no trees")]
    EmptyModel,
    #[error("tree {0} has no nodes")]
    EmptyTree(usize),
    #[error("tree {0}: node arrays have inconsistent lengths")]
    RaggedTree(usize),
    #[error("tree {tree}: node {node} references child {child} but tree has {num_nodes} nodes")]
    InvalidNodeIndex {
        tree: usize,
        node: usize,
        child: i32,
        num_nodes: usize,
    },
    #[error("tree {tree}: node {node} splits on feature {feature} but the model declares {num_features} features")]
    InvalidFeatureIndex {
        tree: usize,
        node: usize,
        feature: u32,
        num_features: usize,
    },
}

// ---------------------------------------------------------------------------
// Loading + validation
// ---------------------------------------------------------------------------

/// Read, parse and validate a model artifact.
///
/// A missing file is the one expected failure mode (the app keeps running
/// with inference disabled); every other variant means a broken artifact.
pub fn load_model(path: &Path) -> Result<ForestPredictor, ModelError> {
    if !path.is_file() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&text).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&artifact)
}

/// Check the artifact against the feature contract and structural
/// invariants, producing the in-memory predictor.
fn validate(artifact: &ModelArtifact) -> Result<ForestPredictor, ModelError> {
    // The artifact may list the columns in any order, but the set must be
    // exactly the three the sliders are bound to. Anything else would line
    // the values up against the wrong columns.
    let mut feature_map = [usize::MAX; 3];
    if artifact.feature_names.len() != FEATURE_NAMES.len() {
        return Err(ModelError::FeatureMismatch {
            found: artifact.feature_names.clone(),
        });
    }
    for (artifact_idx, name) in artifact.feature_names.iter().enumerate() {
        match FEATURE_NAMES.iter().position(|&n| n == name) {
            // A repeated column would alias two artifact features onto the
            // same slider value, so each canonical index may be taken once.
            Some(canonical_idx) if !feature_map[..artifact_idx].contains(&canonical_idx) => {
                feature_map[artifact_idx] = canonical_idx;
            }
            _ => {
                return Err(ModelError::FeatureMismatch {
                    found: artifact.feature_names.clone(),
                });
            }
        }
    }

    if artifact.trees.is_empty() {
        return Err(ModelError::EmptyModel);
    }

    let mut trees = Vec::with_capacity(artifact.trees.len());
    for (tree_idx, tree) in artifact.trees.iter().enumerate() {
        let num_nodes = tree.num_nodes();
        if num_nodes == 0 {
            return Err(ModelError::EmptyTree(tree_idx));
        }
        if !tree.is_consistent() {
            return Err(ModelError::RaggedTree(tree_idx));
        }

        for node in 0..num_nodes {
            let left = tree.left_children[node];
            if left == -1 {
                continue;
            }
            for child in [left, tree.right_children[node]] {
                if child < 0 || child as usize >= num_nodes {
                    return Err(ModelError::InvalidNodeIndex {
                        tree: tree_idx,
                        node,
                        child,
                        num_nodes,
                    });
                }
            }
            let feature = tree.split_indices[node];
            if feature as usize >= FEATURE_NAMES.len() {
                return Err(ModelError::InvalidFeatureIndex {
                    tree: tree_idx,
                    node,
                    feature,
                    num_features: FEATURE_NAMES.len(),
                });
            }
        }

        trees.push(Tree {
            left_children: tree.left_children.clone(),
            right_children: tree.right_children.clone(),
            split_indices: tree.split_indices.clone(),
            split_conditions: tree.split_conditions.clone(),
            default_left: tree.default_left.clone(),
            base_weights: tree.base_weights.clone(),
        });
    }

    Ok(ForestPredictor {
        trees,
        base_score: artifact.base_score,
        feature_map,
    })
}

// ---------------------------------------------------------------------------
// ModelCache – memoized loading, keyed by path
// ---------------------------------------------------------------------------

/// Loads each artifact at most once per process and hands out shared
/// references. Owned by the application root; the UI never touches the
/// filesystem directly.
#[derive(Debug, Default)]
pub struct ModelCache {
    models: HashMap<PathBuf, Arc<ForestPredictor>>,
}

impl ModelCache {
    /// Return the cached predictor for `path`, loading it on first use.
    /// Failed loads are not cached, so a fixed artifact can be retried.
    ///
    /// Keyed by canonical path, so relative and absolute spellings of the
    /// same artifact share one entry. The as-given path is kept as an alias
    /// so cache hits survive even when the file is later removed and
    /// canonicalization stops working.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ForestPredictor>, ModelError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if let Some(model) = self.models.get(&key).or_else(|| self.models.get(path)) {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(load_model(path)?);
        if key != path {
            self.models.insert(path.to_path_buf(), Arc::clone(&model));
        }
        self.models.insert(key, Arc::clone(&model));
        Ok(model)
    }
}
