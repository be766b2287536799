use std::path::PathBuf;
use std::sync::Arc;

use crate::model::features::{FeatureError, FeatureRecord, FEATURES};
use crate::model::predictor::{ForestPredictor, Predictor};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Outcome of the most recent predict action.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Predicted(f64),
    Failed(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current slider values, in [`FEATURES`] order.
    pub inputs: [f64; 3],

    /// Loaded model (None when loading failed; inference stays disabled).
    pub predictor: Option<Arc<ForestPredictor>>,

    /// Path the current (or attempted) model came from.
    pub model_path: PathBuf,

    /// Why the model is unavailable, shown as a persistent warning.
    pub model_error: Option<String>,

    /// Result of the last predict action, if any.
    pub outcome: Option<PredictionOutcome>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            predictor: None,
            model_path: PathBuf::new(),
            model_error: None,
            outcome: None,
        }
    }
}

fn default_inputs() -> [f64; 3] {
    [FEATURES[0].default, FEATURES[1].default, FEATURES[2].default]
}

/// Two-decimal rendering used for the predicted percentage.
pub fn format_prediction(value: f64) -> String {
    format!("{value:.2}")
}

impl AppState {
    /// Ingest a successfully loaded model.
    pub fn set_model(&mut self, path: PathBuf, model: Arc<ForestPredictor>) {
        self.model_path = path;
        self.predictor = Some(model);
        self.model_error = None;
        self.outcome = None;
    }

    /// Record a failed load; inference is disabled until a model arrives.
    pub fn set_model_error(&mut self, path: PathBuf, error: String) {
        self.model_path = path;
        self.predictor = None;
        self.model_error = Some(error);
        self.outcome = None;
    }

    /// Put every slider back to its configured default.
    pub fn reset_inputs(&mut self) {
        self.inputs = default_inputs();
    }

    /// Build the labeled record from the current slider values.
    /// Each slider is bound to its model column through [`FEATURES`], so the
    /// identifiers can never drift from the contract.
    pub fn feature_record(&self) -> Result<FeatureRecord, FeatureError> {
        let mut builder = FeatureRecord::builder();
        for (spec, &value) in FEATURES.iter().zip(&self.inputs) {
            builder = builder.set(spec.field, value)?;
        }
        builder.build()
    }

    /// One predict action: read sliders, assemble the record, run the model,
    /// store the outcome. Synchronous, fire-once, never panics; any failure
    /// lands in [`PredictionOutcome::Failed`] and the app stays usable.
    pub fn run_prediction(&mut self, predictor: &dyn Predictor) {
        let record = match self.feature_record() {
            Ok(record) => record,
            Err(e) => {
                log::error!("Invalid inputs: {e}");
                self.outcome = Some(PredictionOutcome::Failed(format!("Invalid inputs: {e}")));
                return;
            }
        };
        match predictor.predict(&record) {
            Ok(value) => {
                log::info!("Predicted silica concentrate: {}%", format_prediction(value));
                self.outcome = Some(PredictionOutcome::Predicted(value));
            }
            Err(e) => {
                log::error!("Prediction failed: {e}");
                self.outcome = Some(PredictionOutcome::Failed(format!(
                    "An error occurred during prediction: {e}"
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::features::{AIR_FLOW, AMINE_FLOW, FEATURE_NAMES, IRON_CONCENTRATE};
    use crate::model::predictor::PredictError;

    /// Stub that returns the same value for any record.
    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, PredictError> {
            Ok(self.0)
        }
    }

    /// Stub that always fails.
    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, PredictError> {
            Err(PredictError::Inference("feature shape mismatch".into()))
        }
    }

    #[test]
    fn defaults_sit_inside_the_slider_bounds() {
        let state = AppState::default();
        for (spec, &value) in FEATURES.iter().zip(&state.inputs) {
            assert!(value >= spec.min && value <= spec.max);
        }
    }

    #[test]
    fn record_carries_the_slider_values_under_the_contract_names() {
        let mut state = AppState::default();
        state.inputs = [300.0, 200.0, 64.0];
        let record = state.feature_record().unwrap();
        assert_eq!(record.get(AMINE_FLOW), Some(300.0));
        assert_eq!(record.get(AIR_FLOW), Some(200.0));
        assert_eq!(record.get(IRON_CONCENTRATE), Some(64.0));
        assert_eq!(record.names(), &FEATURE_NAMES);
    }

    #[test]
    fn successful_prediction_formats_to_two_decimals() {
        let mut state = AppState::default();
        state.run_prediction(&FixedPredictor(65.4321));
        match state.outcome {
            Some(PredictionOutcome::Predicted(v)) => {
                assert_eq!(format_prediction(v), "65.43");
            }
            ref other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn formatting_pads_and_rounds() {
        assert_eq!(format_prediction(2.0), "2.00");
        assert_eq!(format_prediction(2.349), "2.35");
        assert_eq!(format_prediction(65.4321), "65.43");
    }

    #[test]
    fn predictor_error_is_caught_and_surfaced() {
        let mut state = AppState::default();
        state.run_prediction(&FailingPredictor);
        match &state.outcome {
            Some(PredictionOutcome::Failed(msg)) => {
                assert!(msg.contains("feature shape mismatch"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // The failure is terminal for that action only.
        state.run_prediction(&FixedPredictor(1.5));
        assert_eq!(state.outcome, Some(PredictionOutcome::Predicted(1.5)));
    }

    #[test]
    fn failed_load_disables_inference_and_keeps_the_reason() {
        let mut state = AppState::default();
        state.set_model_error(
            PathBuf::from("flotation_model.json"),
            "model file not found: flotation_model.json".into(),
        );
        assert!(state.predictor.is_none());
        assert!(state
            .model_error
            .as_deref()
            .unwrap()
            .contains("flotation_model.json"));
        assert_eq!(state.outcome, None);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = AppState::default();
        state.inputs = [250.0, 180.0, 63.0];
        state.reset_inputs();
        assert_eq!(state.inputs[0], FEATURES[0].default);
        assert_eq!(state.inputs[1], FEATURES[1].default);
        assert_eq!(state.inputs[2], FEATURES[2].default);
    }
}
