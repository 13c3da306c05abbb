use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// GridError – everything that can go wrong between file and surface
// ---------------------------------------------------------------------------

/// Load / reshape / render-precondition failures. All of these are fatal at
/// program scope: no retry, no partial rendering.
#[derive(Debug, Error)]
pub enum GridError {
    /// The input path does not exist or cannot be opened for reading.
    #[error("file not found: cannot open {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be decoded into three numbers.
    #[error("parse error at line {line}: {reason} (row: {row:?})")]
    Parse {
        /// 1-based line number in the source file (header is line 1).
        line: u64,
        /// Raw row content, for the error message.
        row: String,
        reason: String,
    },

    /// The sample count is not a perfect square, so no n×n reshape exists.
    #[error("shape error: {count} samples is not a perfect square (sqrt = {root:.4})")]
    Shape { count: usize, root: f64 },

    /// The three matrices handed to the renderer disagree on dimensions.
    /// Unreachable for grids built by the loader.
    #[error("shape mismatch: x is {x}×{x}, y is {y}×{y}, z is {z}×{z}")]
    ShapeMismatch { x: usize, y: usize, z: usize },
}

// ---------------------------------------------------------------------------
// Matrix – a square, row-major matrix of f64
// ---------------------------------------------------------------------------

/// Square matrix with row-major `Vec<f64>` storage: element (i, j) lives at
/// `values[i * side + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    side: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Reinterpret a flat column as a `side × side` matrix. The flat order is
    /// preserved exactly; `as_flat` returns the same sequence back.
    ///
    /// Precondition (enforced by the loader): `values.len() == side * side`.
    pub fn from_flat(values: Vec<f64>, side: usize) -> Self {
        debug_assert_eq!(values.len(), side * side);
        Matrix { side, values }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Element at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.side + j]
    }

    /// Row-major view of the underlying values.
    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }

    /// (min, max) over finite values, or None if every value is NaN/inf.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// SurfaceGrid – the three reshaped columns plus provenance
// ---------------------------------------------------------------------------

/// The loaded dataset: three matrices of identical side length. Built once by
/// the loader, replaced wholesale when the user opens another file, never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    pub x: Matrix,
    pub y: Matrix,
    pub z: Matrix,
    /// Path the grid was loaded from (used for the plot title).
    pub source: PathBuf,
}

impl SurfaceGrid {
    /// Side length n of the n×n grid.
    pub fn side(&self) -> usize {
        self.x.side()
    }

    /// Total number of samples (n²).
    pub fn sample_count(&self) -> usize {
        self.x.as_flat().len()
    }
}
