use eframe::egui;

use crate::model::loader::ModelCache;
use crate::state::AppState;
use crate::ui::{panels, result};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SilicaPredictorApp {
    pub state: AppState,
    /// Composition root owns the cache; loaded models are shared read-only.
    pub cache: ModelCache,
}

impl SilicaPredictorApp {
    pub fn new(state: AppState, cache: ModelCache) -> Self {
        Self { state, cache }
    }
}

impl eframe::App for SilicaPredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut self.cache);
        });

        // ---- Left side panel: parameter sliders ----
        egui::SidePanel::left("parameter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: predict action and result ----
        egui::CentralPanel::default().show(ctx, |ui| {
            result::central_panel(ui, &mut self.state);
        });
    }
}
