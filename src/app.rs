use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, predict};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinApp {
    pub state: AppState,
}

impl PenguinApp {
    /// Load the dataset and pipeline once and build the app.
    pub fn startup() -> Self {
        PenguinApp {
            state: AppState::startup(),
        }
    }
}

impl eframe::App for PenguinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(message) = self.state.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_error_panel(ui, &message);
            });
            return;
        }

        // ---- Top panel: title + tab bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let AppState {
                data,
                tab,
                form,
                prediction,
                snow,
                ..
            } = &mut self.state;
            let Some(data) = data else { return };

            match *tab {
                Tab::Summary => panels::summary_panel(ui),
                Tab::Dataset => panels::dataset_panel(ui, data),
                Tab::Model => predict::model_panel(ui, data, form, prediction, snow),
            }
        });

        self.state.snow.show(ctx);
    }
}
