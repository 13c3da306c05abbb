//! Demo-data generator: writes `xor_grid.csv`, an n×n sweep of the unit
//! square with a smooth XOR-like probability surface, so the viewer has
//! something to display out of the box.
//!
//! Usage: `cargo run --bin generate_grid [side]` (default side = 41).

use anyhow::{Context, Result, bail};

const OUTPUT: &str = "xor_grid.csv";
const DEFAULT_SIDE: usize = 41;

/// Logistic squash of a unit-interval coordinate around 0.5.
fn soft_bit(v: f64) -> f64 {
    1.0 / (1.0 + (-8.0 * (v - 0.5)).exp())
}

/// Probability that exactly one of two independent soft bits fires:
/// a(1-b) + b(1-a). Peaks near (0,1) and (1,0), dips near (0,0) and (1,1).
fn xor_probability(x: f64, y: f64) -> f64 {
    let a = soft_bit(x);
    let b = soft_bit(y);
    a + b - 2.0 * a * b
}

fn main() -> Result<()> {
    env_logger::init();

    let side: usize = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid grid side {arg:?}"))?,
        None => DEFAULT_SIDE,
    };
    if side < 2 {
        bail!("grid side must be at least 2, got {side}");
    }

    let mut writer = csv::Writer::from_path(OUTPUT)
        .with_context(|| format!("creating {OUTPUT}"))?;
    writer.write_record(["x", "y", "prob"])?;

    // x varies slowest, matching the upstream producer's row order.
    let step = 1.0 / (side - 1) as f64;
    for i in 0..side {
        let x = i as f64 * step;
        for j in 0..side {
            let y = j as f64 * step;
            let z = xor_probability(x, y);
            writer.write_record([
                format!("{x:.6}"),
                format!("{y:.6}"),
                format!("{z:.6}"),
            ])?;
        }
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {side}×{side} grid ({} samples) to {OUTPUT}", side * side);
    println!("Wrote {side}×{side} grid to {OUTPUT}");
    Ok(())
}
