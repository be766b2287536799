mod app;
mod model;
mod state;
mod ui;

use std::path::PathBuf;

use app::SilicaPredictorApp;
use eframe::egui;
use model::loader::{ModelCache, DEFAULT_MODEL_PATH};
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Model path: first CLI argument, else the default artifact next to the
    // working directory.
    let model_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

    let mut cache = ModelCache::default();
    let mut state = AppState::default();
    match cache.get_or_load(&model_path) {
        Ok(model) => {
            log::info!(
                "Loaded model from {} ({} trees)",
                model_path.display(),
                model.num_trees()
            );
            state.set_model(model_path, model);
        }
        Err(e) => {
            // Not fatal: the app starts with inference disabled and a
            // persistent warning naming the path.
            log::error!("Failed to load model: {e}");
            state.set_model_error(model_path, e.to_string());
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Silica Concentrate Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(SilicaPredictorApp::new(state, cache)))),
    )
}
