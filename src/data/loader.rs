use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::model::{GridError, Matrix, SurfaceGrid};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a surface grid from a CSV file.
///
/// Expected layout: one header row (skipped, names not validated) followed by
/// N data rows of exactly three numeric fields `x,y,z`. N must be a perfect
/// square n²; each column is then reinterpreted as an n×n matrix in row-major
/// order. The file handle is scoped to this call and released before the
/// grid is returned.
pub fn load_grid(path: &Path) -> Result<SurfaceGrid, GridError> {
    let file = File::open(path).map_err(|source| GridError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(BufReader::new(file), path.to_path_buf())
}

// ---------------------------------------------------------------------------
// CSV parsing and reshape
// ---------------------------------------------------------------------------

/// Parse grid CSV from any reader. Split out from [`load_grid`] so tests can
/// feed in-memory data.
pub fn parse_grid<R: Read>(reader: R, source: PathBuf) -> Result<SurfaceGrid, GridError> {
    // `flexible` so rows with the wrong field count reach our own check and
    // get reported with line number and content instead of a csv-crate error.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    let mut zs: Vec<f64> = Vec::new();

    for (row_no, result) in csv_reader.records().enumerate() {
        // Header is line 1, so data row i sits at line i + 2 (no embedded
        // newlines possible without quoting support).
        let fallback_line = row_no as u64 + 2;

        let record = result.map_err(|e| GridError::Parse {
            line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
            row: String::new(),
            reason: e.to_string(),
        })?;

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);
        let raw = record.iter().collect::<Vec<_>>().join(",");

        if record.len() != 3 {
            return Err(GridError::Parse {
                line,
                row: raw,
                reason: format!("expected 3 fields, found {}", record.len()),
            });
        }

        let mut fields = [0.0f64; 3];
        for (k, tok) in record.iter().enumerate() {
            fields[k] = tok.parse::<f64>().map_err(|_| GridError::Parse {
                line,
                row: raw.clone(),
                reason: format!("field {} ({tok:?}) is not a number", k + 1),
            })?;
        }

        xs.push(fields[0]);
        ys.push(fields[1]);
        zs.push(fields[2]);
    }

    let side = infer_side(xs.len())?;

    Ok(SurfaceGrid {
        x: Matrix::from_flat(xs, side),
        y: Matrix::from_flat(ys, side),
        z: Matrix::from_flat(zs, side),
        source,
    })
}

/// Strict squareness check: n such that n² == count, or a Shape error.
/// Near-squares (e.g. 99 rows) are rejected outright, never floor-truncated.
fn infer_side(count: usize) -> Result<usize, GridError> {
    let root = (count as f64).sqrt();
    let side = root.round() as usize;
    if count == 0 || side * side != count {
        return Err(GridError::Shape { count, root });
    }
    Ok(side)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::GridError;

    fn parse(text: &str) -> Result<SurfaceGrid, GridError> {
        parse_grid(Cursor::new(text.to_string()), PathBuf::from("test.csv"))
    }

    #[test]
    fn loads_a_3x3_grid() {
        let text = "x,y,z\n\
                    0,0,0.1\n0,1,0.9\n0,2,0.2\n\
                    1,0,0.8\n1,1,0.3\n1,2,0.7\n\
                    2,0,0.4\n2,1,0.6\n2,2,0.5\n";
        let grid = parse(text).unwrap();
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.sample_count(), 9);

        // Row-major unflattening: row r of the file lands at (r / 3, r % 3).
        assert_eq!(grid.x.get(0, 0), 0.0);
        assert_eq!(grid.x.get(1, 2), 1.0);
        assert_eq!(grid.y.get(1, 2), 2.0);
        assert_eq!(grid.z.get(1, 2), 0.7);
        assert_eq!(grid.z.get(2, 2), 0.5);
    }

    #[test]
    fn reshape_round_trips_flat_columns() {
        let text = "x,y,z\n1,10,0.1\n2,20,0.2\n3,30,0.3\n4,40,0.4\n";
        let grid = parse(text).unwrap();
        assert_eq!(grid.x.as_flat(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.y.as_flat(), &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(grid.z.as_flat(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn single_sample_is_a_1x1_grid() {
        let grid = parse("x,y,z\n0.5,0.5,0.42\n").unwrap();
        assert_eq!(grid.side(), 1);
        assert_eq!(grid.z.get(0, 0), 0.42);
    }

    #[test]
    fn eight_rows_fail_with_shape_error() {
        let mut text = String::from("x,y,z\n");
        for i in 0..8 {
            text.push_str(&format!("{i},0,0.5\n"));
        }
        match parse(&text) {
            Err(GridError::Shape { count, root }) => {
                assert_eq!(count, 8);
                assert!((root - 8f64.sqrt()).abs() < 1e-12);
            }
            other => panic!("expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn near_square_count_is_rejected_not_truncated() {
        // 99 rows would floor to 9×9 = 81; that must be an error.
        let mut text = String::from("x,y,z\n");
        for i in 0..99 {
            text.push_str(&format!("{i},1,0.5\n"));
        }
        assert!(matches!(parse(&text), Err(GridError::Shape { count: 99, .. })));
    }

    #[test]
    fn empty_file_fails_with_shape_error() {
        assert!(matches!(parse("x,y,z\n"), Err(GridError::Shape { count: 0, .. })));
    }

    #[test]
    fn wrong_field_count_names_the_line() {
        let text = "x,y,z\n0,0,0.1\n1,1,0.2,extra\n";
        match parse(text) {
            Err(GridError::Parse { line, row, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(row, "1,1,0.2,extra");
                assert!(reason.contains("expected 3 fields"), "reason: {reason}");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_field_names_the_line() {
        let text = "x,y,z\n0,0,0.1\n0,oops,0.2\n";
        match parse(text) {
            Err(GridError::Parse { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("oops"), "reason: {reason}");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load_grid(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, GridError::FileNotFound { .. }));
    }
}
