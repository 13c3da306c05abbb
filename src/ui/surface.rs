//! 3D surface view of the loaded grid, rendered via egui `Painter` with an
//! azimuth/elevation projection and painter's-algorithm depth sorting.

use eframe::egui::{self, Align2, Color32, Pos2, Sense, Shape, Stroke, Ui};

use crate::color::height_color;
use crate::data::model::{GridError, Matrix, SurfaceGrid};

// ---------------------------------------------------------------------------
// Render options
// ---------------------------------------------------------------------------

/// Static rendering configuration. Defaults mirror the classic invocation:
/// every 5th row/column, no mesh edges, 70% opacity.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Sample every N-th grid row.
    pub row_stride: usize,
    /// Sample every N-th grid column.
    pub col_stride: usize,
    /// Stroke cell boundaries instead of a smooth surface.
    pub draw_edges: bool,
    /// Alpha blending factor in [0, 1].
    pub opacity: f32,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            row_stride: 5,
            col_stride: 5,
            draw_edges: false,
            opacity: 0.7,
            x_label: "x".to_owned(),
            y_label: "y".to_owned(),
            z_label: "Probability of Class 1".to_owned(),
            title: "3D Decision Surface".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Camera state
// ---------------------------------------------------------------------------

/// Persistent view state; drag on the canvas rotates the camera.
pub struct ViewState {
    /// Camera azimuth in degrees.
    pub azimuth: f32,
    /// Camera elevation angle in degrees (0 = side, 90 = top).
    pub elevation: f32,
    /// Vertical exaggeration factor.
    pub z_scale: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            azimuth: 235.0,
            elevation: 30.0,
            z_scale: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Mesh building (pure, render-backend-free)
// ---------------------------------------------------------------------------

/// One surface quad in normalized model space: corner coordinates in
/// [-1, 1]³ and the mean normalized height in [0, 1] used for coloring.
#[derive(Debug, Clone)]
pub struct Cell {
    pub corners: [[f64; 3]; 4],
    pub height: f64,
}

/// Grid indices sampled at `stride`, always including the final row/column so
/// the surface reaches the data boundary.
fn sampled_indices(side: usize, stride: usize) -> Vec<usize> {
    if side == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..side).step_by(stride.max(1)).collect();
    if *indices.last().unwrap_or(&0) != side - 1 {
        indices.push(side - 1);
    }
    indices
}

/// Build the stride-sampled quad mesh from the three matrices.
///
/// Fails with `ShapeMismatch` when the matrices disagree on side length;
/// this is checked before any work even though grids built by the loader
/// cannot trigger it. Cells touching a non-finite z sample are skipped.
pub fn surface_cells(
    x: &Matrix,
    y: &Matrix,
    z: &Matrix,
    options: &RenderOptions,
) -> Result<Vec<Cell>, GridError> {
    if x.side() != y.side() || x.side() != z.side() {
        return Err(GridError::ShapeMismatch {
            x: x.side(),
            y: y.side(),
            z: z.side(),
        });
    }

    let side = x.side();
    if side < 2 {
        return Ok(Vec::new());
    }

    // Normalize each axis from its own finite range; a flat axis collapses
    // to the centre instead of dividing by zero.
    let norm = |m: &Matrix| {
        let (min, max) = m.value_range().unwrap_or((0.0, 0.0));
        let range = max - min;
        move |v: f64| {
            if range.abs() < 1e-12 {
                0.0
            } else {
                (v - min) / range
            }
        }
    };
    let nx = norm(x);
    let ny = norm(y);
    let nz = norm(z);
    let z_flat = z.value_range().map(|(min, max)| max - min <= 1e-12).unwrap_or(true);

    let rows = sampled_indices(side, options.row_stride);
    let cols = sampled_indices(side, options.col_stride);

    let mut cells = Vec::with_capacity((rows.len() - 1) * (cols.len() - 1));

    for ij in rows.windows(2) {
        let (i0, i1) = (ij[0], ij[1]);
        for jk in cols.windows(2) {
            let (j0, j1) = (jk[0], jk[1]);

            let idx = [(i0, j0), (i0, j1), (i1, j1), (i1, j0)];
            if idx.iter().any(|&(i, j)| !z.get(i, j).is_finite()) {
                continue;
            }

            let mut corners = [[0.0f64; 3]; 4];
            let mut height_sum = 0.0;
            for (c, &(i, j)) in idx.iter().enumerate() {
                let t = if z_flat { 0.5 } else { nz(z.get(i, j)) };
                corners[c] = [
                    nx(x.get(i, j)) * 2.0 - 1.0,
                    ny(y.get(i, j)) * 2.0 - 1.0,
                    t * 2.0 - 1.0,
                ];
                height_sum += t;
            }

            cells.push(Cell {
                corners,
                height: height_sum / 4.0,
            });
        }
    }

    Ok(cells)
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Render the surface into the available space. Dragging the canvas rotates
/// the camera.
pub fn show_surface(
    ui: &mut Ui,
    grid: &SurfaceGrid,
    options: &RenderOptions,
    view: &mut ViewState,
) {
    let available = ui.available_size();
    let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());

    painter.rect_filled(response.rect, 0.0, Color32::from_gray(20));

    if response.dragged() {
        let delta = response.drag_delta();
        view.azimuth = (view.azimuth + delta.x * 0.5).rem_euclid(360.0);
        view.elevation = (view.elevation - delta.y * 0.3).clamp(5.0, 85.0);
    }

    let cells = match surface_cells(&grid.x, &grid.y, &grid.z, options) {
        Ok(cells) => cells,
        Err(e) => {
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                e.to_string(),
                egui::FontId::proportional(14.0),
                Color32::RED,
            );
            return;
        }
    };

    if cells.is_empty() {
        painter.text(
            response.rect.center(),
            Align2::CENTER_CENTER,
            "Grid too small (or all no-data) for a surface.",
            egui::FontId::proportional(14.0),
            Color32::GRAY,
        );
        return;
    }

    // Orthographic projection: rotate around Z by azimuth, then tilt by
    // elevation. Model z is compressed to roughly a 0.5 box ratio.
    let az = (view.azimuth as f64).to_radians();
    let el = (view.elevation as f64).to_radians();
    let (sin_az, cos_az) = az.sin_cos();
    let (sin_el, cos_el) = el.sin_cos();
    let z_scale = view.z_scale as f64 * 0.5;

    let cx = response.rect.center().x as f64;
    let cy = response.rect.center().y as f64;
    let canvas_scale = (available.x.min(available.y) * 0.40) as f64;

    let project = |p: [f64; 3]| -> (Pos2, f64) {
        let z3 = p[2] * z_scale;
        let xr = p[0] * cos_az - p[1] * sin_az;
        let yr = p[0] * sin_az + p[1] * cos_az;

        let x_screen = xr;
        let y_screen = -yr * sin_el - z3 * cos_el;
        // Distance along the view direction; larger = further from camera.
        let depth = yr * cos_el - z3 * sin_el;

        (
            Pos2::new(
                (cx + x_screen * canvas_scale) as f32,
                (cy + y_screen * canvas_scale) as f32,
            ),
            depth,
        )
    };

    // Painter's algorithm: project every quad, then fill back to front.
    let mut projected: Vec<(Vec<Pos2>, f64, f64)> = cells
        .iter()
        .map(|cell| {
            let mut points = Vec::with_capacity(4);
            let mut depth_sum = 0.0;
            for &corner in &cell.corners {
                let (pos, depth) = project(corner);
                points.push(pos);
                depth_sum += depth;
            }
            (points, depth_sum / 4.0, cell.height)
        })
        .collect();
    projected.sort_by(|a, b| b.1.total_cmp(&a.1));

    let alpha = (options.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let edge_stroke = if options.draw_edges {
        Stroke::new(1.0, Color32::from_gray(35))
    } else {
        Stroke::NONE
    };

    for (points, _, height) in projected {
        let c = height_color(height);
        let fill = Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha);
        painter.add(Shape::convex_polygon(points, fill, edge_stroke));
    }

    draw_axes(&painter, options, &project);

    painter.text(
        Pos2::new(response.rect.center().x, response.rect.top() + 8.0),
        Align2::CENTER_TOP,
        &options.title,
        egui::FontId::proportional(16.0),
        Color32::WHITE,
    );
}

/// Axis tripod at the (-1, -1, -1) corner of model space, with labels just
/// past each axis end.
fn draw_axes(
    painter: &egui::Painter,
    options: &RenderOptions,
    project: &dyn Fn([f64; 3]) -> (Pos2, f64),
) {
    let origin = [-1.0, -1.0, -1.0];
    let axes = [
        ([1.0, -1.0, -1.0], [1.25, -1.0, -1.0], &options.x_label),
        ([-1.0, 1.0, -1.0], [-1.0, 1.25, -1.0], &options.y_label),
        ([-1.0, -1.0, 1.0], [-1.0, -1.0, 1.35], &options.z_label),
    ];

    let (o, _) = project(origin);
    let stroke = Stroke::new(1.0, Color32::from_gray(120));

    for (end, label_at, label) in axes {
        let (e, _) = project(end);
        let (l, _) = project(label_at);
        painter.line_segment([o, e], stroke);
        painter.text(
            l,
            Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(12.0),
            Color32::LIGHT_GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Matrix;

    /// 3×3 grid: x = column index, y = row index, z as given.
    fn grid_3x3(z: [f64; 9]) -> (Matrix, Matrix, Matrix) {
        let x = Matrix::from_flat(vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0], 3);
        let y = Matrix::from_flat(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0], 3);
        (x, y, Matrix::from_flat(z.to_vec(), 3))
    }

    fn unit_stride() -> RenderOptions {
        RenderOptions {
            row_stride: 1,
            col_stride: 1,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn mismatched_matrices_are_rejected() {
        let a = Matrix::from_flat(vec![0.0; 9], 3);
        let b = Matrix::from_flat(vec![0.0; 16], 4);
        let c = Matrix::from_flat(vec![0.0; 9], 3);
        match surface_cells(&a, &b, &c, &unit_stride()) {
            Err(GridError::ShapeMismatch { x: 3, y: 4, z: 3 }) => {}
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn full_stride_mesh_covers_every_cell() {
        let (x, y, z) = grid_3x3([0.0, 0.5, 1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 0.0]);
        let cells = surface_cells(&x, &y, &z, &unit_stride()).unwrap();
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn oversized_stride_still_reaches_the_boundary() {
        // Stride 5 on a 3×3 grid samples rows {0, 2}: one boundary cell.
        let (x, y, z) = grid_3x3([0.0, 0.5, 1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 0.0]);
        let cells = surface_cells(&x, &y, &z, &RenderOptions::default()).unwrap();
        assert_eq!(cells.len(), 1);

        // Corners span the full normalized extent in x and y.
        let xs: Vec<f64> = cells[0].corners.iter().map(|c| c[0]).collect();
        assert!(xs.contains(&-1.0) && xs.contains(&1.0));
    }

    #[test]
    fn sampled_indices_include_last() {
        assert_eq!(sampled_indices(6, 2), vec![0, 2, 4, 5]);
        assert_eq!(sampled_indices(3, 5), vec![0, 2]);
        assert_eq!(sampled_indices(1, 1), vec![0]);
        assert!(sampled_indices(0, 3).is_empty());
    }

    #[test]
    fn flat_surface_sits_at_mid_height() {
        let (x, y, z) = grid_3x3([0.25; 9]);
        let cells = surface_cells(&x, &y, &z, &unit_stride()).unwrap();
        assert!(cells.iter().all(|c| (c.height - 0.5).abs() < 1e-12));
        assert!(cells.iter().all(|c| c.corners.iter().all(|p| p[2] == 0.0)));
    }

    #[test]
    fn cells_touching_nan_are_skipped() {
        let (x, y, z) = grid_3x3([0.0, 0.5, 1.0, 0.5, f64::NAN, 0.5, 1.0, 0.5, 0.0]);
        let cells = surface_cells(&x, &y, &z, &unit_stride()).unwrap();
        // Every 1-stride cell touches the centre sample.
        assert!(cells.is_empty());
    }

    #[test]
    fn single_sample_grid_has_no_mesh() {
        let x = Matrix::from_flat(vec![0.5], 1);
        let y = Matrix::from_flat(vec![0.5], 1);
        let z = Matrix::from_flat(vec![0.9], 1);
        assert!(surface_cells(&x, &y, &z, &unit_stride()).unwrap().is_empty());
    }

    #[test]
    fn heights_normalize_to_unit_range() {
        let (x, y, z) = grid_3x3([0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
        let cells = surface_cells(&x, &y, &z, &unit_stride()).unwrap();
        for cell in &cells {
            assert!(cell.height >= 0.0 && cell.height <= 1.0);
            for p in &cell.corners {
                assert!(p[2] >= -1.0 && p[2] <= 1.0);
            }
        }
    }
}
