use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::{pages, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AqSolApp {
    pub state: AppState,
}

impl AqSolApp {
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_initial();
        AqSolApp { state }
    }
}

impl eframe::App for AqSolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: page directory + settings ----
        egui::SidePanel::left("directory_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => pages::home(ui),
            Page::Searcher => pages::searcher(ui, &mut self.state),
            Page::Scatter2d => plot::scatter_2d(ui, &mut self.state),
            Page::Scatter3d => plot::scatter_3d(ui, &mut self.state),
            Page::Comparison => pages::comparison(ui, &mut self.state),
            Page::Molecule => pages::molecule(ui, &mut self.state),
        });
    }
}
