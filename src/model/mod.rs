/// Model layer: feature contract, artifact schema, loading, and inference.
///
/// Architecture:
/// ```text
///  flotation_model.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read + parse + validate → ForestPredictor (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ForestPredictor│  sum of tree leaves + base_score
///   └───────────────┘
///        ▲
///        │
///   ┌──────────┐
///   │ features  │  slider table + FeatureRecord (exact column names)
///   └──────────┘
/// ```

pub mod artifact;
pub mod features;
pub mod loader;
pub mod predictor;
