use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{format_prediction, AppState, PredictionOutcome};

// ---------------------------------------------------------------------------
// Central panel – predict action and result
// ---------------------------------------------------------------------------

/// Render the main page: intro, predict button, result or warning.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Silica concentrate predictor");
    ui.label(
        "This tool uses a pre-trained regression model to predict the silica \
         concentration after froth flotation in iron ore processing.",
    );
    ui.label(
        RichText::new(
            "Use it to optimise operating conditions, estimate the impact of \
             process changes before applying them, and simulate scenarios \
             when troubleshooting.",
        )
        .weak(),
    );
    ui.separator();

    match state.predictor.clone() {
        Some(model) => {
            // One synchronous inference per click, no retries.
            if ui
                .button(RichText::new("Predict silica concentrate").strong())
                .clicked()
            {
                state.run_prediction(model.as_ref());
            }

            ui.add_space(8.0);
            match &state.outcome {
                Some(PredictionOutcome::Predicted(value)) => {
                    ui.strong(
                        RichText::new(format!(
                            "Predicted silica concentrate: {}%",
                            format_prediction(*value)
                        ))
                        .color(Color32::DARK_GREEN)
                        .size(18.0),
                    );
                    ui.label(
                        "This is the estimated silica percentage in the \
                         concentrate after the flotation process.",
                    );
                }
                Some(PredictionOutcome::Failed(msg)) => {
                    ui.colored_label(Color32::RED, msg);
                }
                None => {
                    ui.label(RichText::new("No prediction yet.").weak());
                }
            }
        }
        None => {
            // Inference is disabled until a model loads; keep the reason
            // visible so the user can fix the path without digging in logs.
            ui.colored_label(
                Color32::YELLOW,
                format!(
                    "The model could not be loaded from '{}'. Predictions are \
                     disabled until a valid model artifact is opened \
                     (File → Open model…).",
                    state.model_path.display()
                ),
            );
            if let Some(reason) = &state.model_error {
                ui.label(RichText::new(reason).weak());
            }
        }
    }

    ui.separator();

    egui::CollapsingHeader::new("About this tool")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("1. Set the key operating parameters with the sliders on the left.");
            ui.label(
                "2. The pre-trained model evaluates them against the patterns \
                 it learned from historical plant data.",
            );
            ui.label("3. The estimated silica concentrate percentage is shown above.");
            ui.add_space(4.0);
            ui.label(
                RichText::new(
                    "Model: gradient-boosted regression over amine flow, \
                     column 1 air flow and iron concentrate percentage.",
                )
                .weak()
                .small(),
            );
        });
}
