use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – view controls
// ---------------------------------------------------------------------------

/// Render the left controls panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("View");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Mesh sampling");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Row stride:");
                ui.add(egui::Slider::new(&mut state.options.row_stride, 1..=20));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Col stride:");
                ui.add(egui::Slider::new(&mut state.options.col_stride, 1..=20));
            });
            ui.separator();

            ui.strong("Appearance");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Opacity:");
                ui.add(egui::Slider::new(&mut state.options.opacity, 0.05..=1.0));
            });
            ui.checkbox(&mut state.options.draw_edges, "Draw cell edges");
            ui.separator();

            ui.strong("Camera");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Azimuth:");
                ui.add(egui::Slider::new(&mut state.view.azimuth, 0.0..=360.0).suffix("°"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Elevation:");
                ui.add(egui::Slider::new(&mut state.view.elevation, 5.0..=85.0).suffix("°"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Z scale:");
                ui.add(egui::Slider::new(&mut state.view.z_scale, 0.1..=5.0));
            });
            ui.separator();

            // ---- Grid summary ----
            ui.strong("Grid");
            let n = state.grid.side();
            ui.label(format!("{n} × {n}  ({} samples)", state.grid.sample_count()));
            if let Some((z_min, z_max)) = state.grid.z.value_range() {
                ui.label(format!("z range: {z_min:.4} … {z_max:.4}"));
            } else {
                ui.label("z range: no finite values");
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.grid.source.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Open a different grid CSV. A load failure keeps the current grid on
/// screen and reports the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open grid data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_grid(&path) {
            Ok(grid) => {
                log::info!(
                    "Loaded {}×{} grid from {}",
                    grid.side(),
                    grid.side(),
                    path.display()
                );
                state.set_grid(grid);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
