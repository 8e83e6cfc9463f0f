use eframe::egui;

use crate::config::DatasetSource;
use crate::state::AppState;
use crate::ui::{home, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BrowserApp {
    pub state: AppState,
}

impl BrowserApp {
    pub fn new(datasets: Vec<DatasetSource>) -> Self {
        Self {
            state: AppState::new(datasets),
        }
    }
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: home and dataset tabs, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if self.state.show_home {
            egui::CentralPanel::default().show(ctx, |ui| {
                home::home_panel(ui);
            });
            return;
        }

        // First access to a dataset fetches it synchronously.
        self.state.ensure_loaded();

        // ---- Left side panel: column selection and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table view and download ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_panel(ui, &mut self.state);
        });
    }
}
