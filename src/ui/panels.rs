use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::model::features::FEATURES;
use crate::model::loader::ModelCache;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – process parameter sliders
// ---------------------------------------------------------------------------

/// Render the input panel: one bounded slider per model feature.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Process parameters");
    ui.label(
        RichText::new("Adjust the sliders to match the current flotation process conditions.")
            .weak(),
    );
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, spec) in FEATURES.iter().enumerate() {
                ui.strong(spec.label);
                ui.add(
                    egui::Slider::new(&mut state.inputs[i], spec.min..=spec.max)
                        .step_by(spec.step)
                        .fixed_decimals(2),
                );
                ui.label(RichText::new(spec.caption).weak().small());
                ui.add_space(8.0);
                ui.separator();
            }

            if ui.small_button("Reset to defaults").clicked() {
                state.reset_inputs();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, cache: &mut ModelCache) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open model…").clicked() {
                open_model_dialog(state, cache);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.predictor {
            Some(model) => {
                ui.label(format!(
                    "Model: {} ({} trees)",
                    state.model_path.display(),
                    model.num_trees()
                ));
            }
            None => {
                ui.label(RichText::new("No model loaded").color(Color32::RED));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Let the user pick a model artifact; loads go through the cache so a
/// previously opened artifact is never deserialized twice.
pub fn open_model_dialog(state: &mut AppState, cache: &mut ModelCache) {
    let file = rfd::FileDialog::new()
        .set_title("Open model artifact")
        .add_filter("Model artifact", &["json"])
        .pick_file();

    if let Some(path) = file {
        match cache.get_or_load(&path) {
            Ok(model) => {
                log::info!(
                    "Loaded model from {} ({} trees)",
                    path.display(),
                    model.num_trees()
                );
                state.set_model(path, model);
            }
            Err(e) => {
                log::error!("Failed to load model: {e}");
                state.set_model_error(path, e.to_string());
            }
        }
    }
}
