use eframe::egui;

use crate::data::model::SurfaceGrid;
use crate::state::AppState;
use crate::ui::{panels, surface};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GridSurfApp {
    pub state: AppState,
}

impl GridSurfApp {
    pub fn new(grid: SurfaceGrid) -> Self {
        Self {
            state: AppState::new(grid),
        }
    }
}

impl eframe::App for GridSurfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view controls ----
        egui::SidePanel::left("controls_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: 3D surface ----
        egui::CentralPanel::default().show(ctx, |ui| {
            surface::show_surface(
                ui,
                &self.state.grid,
                &self.state.options,
                &mut self.state.view,
            );
        });
    }
}
