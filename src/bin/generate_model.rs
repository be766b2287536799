//! Writes a small demo model artifact (`flotation_model.json`) so the
//! dashboard can be exercised end to end without the real trained model.
//!
//! The artifact follows the schema the loader expects: XGBoost-style trees
//! as parallel node arrays, `left_children[i] == -1` marking a leaf.

use anyhow::{Context, Result};
use serde_json::json;

fn main() -> Result<()> {
    // Tree 1: more amine pushes silica down.
    let amine_tree = json!({
        "left_children":    [1, -1, -1],
        "right_children":   [2, -1, -1],
        "split_indices":    [0, 0, 0],
        "split_conditions": [490.0, 0.0, 0.0],
        "default_left":     [true, false, false],
        "base_weights":     [0.0, 0.85, -0.55]
    });

    // Tree 2: air flow, refined by iron concentrate on the low-air branch.
    let air_tree = json!({
        "left_children":    [1, 3, -1, -1, -1],
        "right_children":   [2, 4, -1, -1, -1],
        "split_indices":    [1, 2, 0, 0, 0],
        "split_conditions": [280.0, 65.0, 0.0, 0.0, 0.0],
        "default_left":     [true, true, false, false, false],
        "base_weights":     [0.0, 0.0, -0.35, 0.45, 0.1]
    });

    // Tree 3: iron concentrate is inversely related to silica quality.
    let iron_tree = json!({
        "left_children":    [1, -1, -1],
        "right_children":   [2, -1, -1],
        "split_indices":    [2, 0, 0],
        "split_conditions": [66.2, 0.0, 0.0],
        "default_left":     [true, false, false],
        "base_weights":     [0.0, 0.3, -0.2]
    });

    let artifact = json!({
        "feature_names": [
            "Amina Flow",
            "Flotation Column 01 Air Flow",
            "% Iron Concentrate"
        ],
        "base_score": 2.2,
        "objective": "reg:squarederror",
        "trees": [amine_tree, air_tree, iron_tree]
    });

    let output_path = "flotation_model.json";
    let text = serde_json::to_string_pretty(&artifact)?;
    std::fs::write(output_path, text).context("writing model artifact")?;

    println!(
        "Wrote demo model with {} trees to {output_path}",
        artifact["trees"].as_array().map(|t| t.len()).unwrap_or(0)
    );
    Ok(())
}
