use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Height colormap: normalized z in [0, 1] → Color32
// ---------------------------------------------------------------------------

/// Control stops of the gradient, low to high, interpolated in linear RGB.
/// Cool blue at the bottom through green to warm orange at the top.
const STOPS: [(f32, f32, f32); 5] = [
    (0.09, 0.21, 0.48), // deep blue
    (0.13, 0.44, 0.55), // teal
    (0.13, 0.44, 0.10), // green
    (0.78, 0.60, 0.05), // amber
    (0.85, 0.25, 0.05), // orange-red
];

/// Map a normalized height to a gradient colour. Values outside [0, 1] are
/// clamped.
pub fn height_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;

    let segments = (STOPS.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - idx as f32;

    let lo = LinSrgb::new(STOPS[idx].0, STOPS[idx].1, STOPS[idx].2);
    let hi = LinSrgb::new(STOPS[idx + 1].0, STOPS[idx + 1].1, STOPS[idx + 1].2);
    let rgb: Srgb = Srgb::from_linear(lo.mix(hi, frac));

    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
