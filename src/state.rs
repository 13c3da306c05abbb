use std::path::Path;

use crate::data::model::SurfaceGrid;
use crate::ui::surface::{RenderOptions, ViewState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Unlike a viewer that starts
/// empty, a grid is always present: the loader runs to completion before the
/// window opens.
pub struct AppState {
    /// Currently displayed grid.
    pub grid: SurfaceGrid,

    /// Rendering configuration (strides, opacity, edges, labels, title).
    pub options: RenderOptions,

    /// Camera state for the surface view.
    pub view: ViewState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(grid: SurfaceGrid) -> Self {
        let options = RenderOptions {
            title: title_for(&grid.source),
            ..RenderOptions::default()
        };
        Self {
            grid,
            options,
            view: ViewState::default(),
            status_message: None,
        }
    }

    /// Replace the displayed grid with a newly loaded one and retitle the
    /// plot. Render options and camera are kept as the user set them.
    pub fn set_grid(&mut self, grid: SurfaceGrid) {
        self.options.title = title_for(&grid.source);
        self.grid = grid;
        self.status_message = None;
    }
}

/// Plot title derived from the source file name.
fn title_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("3D Decision Surface from {name}")
}
