mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::GridSurfApp;
use eframe::egui;

/// Input path: first CLI argument, or the conventional grid file in the
/// working directory.
const DEFAULT_INPUT: &str = "xor_grid.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    // Load fully before the window opens; any load error exits non-zero
    // without entering the event loop.
    let grid = data::loader::load_grid(&path)
        .with_context(|| format!("loading grid from {}", path.display()))?;
    log::info!(
        "Loaded {}×{} grid ({} samples) from {}",
        grid.side(),
        grid.side(),
        grid.sample_count(),
        path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // Blocks until the user closes the window.
    eframe::run_native(
        "gridsurf – 3D Surface Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(GridSurfApp::new(grid)))),
    )
    .map_err(|e| anyhow::anyhow!("display failed: {e}"))
}
