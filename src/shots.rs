//! Shot records and ingestion from the stats API tabular payload
//!
//! The stats API returns result sets as a header row plus untyped value
//! rows. Records are built here by named header lookup so the rest of the
//! pipeline never touches positional response indices.

use serde_json::Value;

use crate::error::ChartError;

const COL_LOC_X: &str = "LOC_X";
const COL_LOC_Y: &str = "LOC_Y";
const COL_SHOT_MADE: &str = "SHOT_MADE_FLAG";

/// One shot attempt: court location plus the make/miss outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotRecord {
    pub x: i32,
    pub y: i32,
    pub made: bool,
}

/// Build shot records from a result set's header and row arrays.
///
/// Rejects a missing column or a malformed cell with a descriptive error
/// rather than coercing; a single bad row fails the whole ingestion since
/// partial results are not rendered.
pub fn from_rows(headers: &[String], rows: &[Vec<Value>]) -> Result<Vec<ShotRecord>, ChartError> {
    let x_idx = column_index(headers, COL_LOC_X)?;
    let y_idx = column_index(headers, COL_LOC_Y)?;
    let made_idx = column_index(headers, COL_SHOT_MADE)?;

    let mut shots = Vec::with_capacity(rows.len());
    for (row_num, row) in rows.iter().enumerate() {
        let x = coord_cell(row, x_idx, row_num, COL_LOC_X)?;
        let y = coord_cell(row, y_idx, row_num, COL_LOC_Y)?;
        let made_flag = int_cell(row, made_idx, row_num, COL_SHOT_MADE)?;
        shots.push(ShotRecord {
            x,
            y,
            made: made_flag != 0,
        });
    }
    Ok(shots)
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, ChartError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(ChartError::MissingColumn(name))
}

fn int_cell(row: &[Value], idx: usize, row_num: usize, col: &str) -> Result<i64, ChartError> {
    let cell = row.get(idx).ok_or_else(|| ChartError::MalformedShot {
        row: row_num,
        reason: format!("row has no {} cell", col),
    })?;

    // The API emits these as integers but has been seen to send
    // whole-number floats; accept both, never a fractional value.
    cell.as_i64()
        .or_else(|| {
            cell.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| ChartError::MalformedShot {
            row: row_num,
            reason: format!("{} is not a whole number: {}", col, cell),
        })
}

fn coord_cell(row: &[Value], idx: usize, row_num: usize, col: &str) -> Result<i32, ChartError> {
    let value = int_cell(row, idx, row_num, col)?;
    i32::try_from(value).map_err(|_| ChartError::MalformedShot {
        row: row_num,
        reason: format!("{} is out of coordinate range: {}", col, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers() -> Vec<String> {
        ["GRID_TYPE", "LOC_X", "LOC_Y", "SHOT_MADE_FLAG"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn parses_rows_by_header_name() {
        let rows = vec![
            vec![json!("Shot Chart Detail"), json!(-12), json!(88), json!(1)],
            vec![json!("Shot Chart Detail"), json!(230), json!(5), json!(0)],
        ];
        let shots = from_rows(&headers(), &rows).expect("parse shots");
        assert_eq!(
            shots,
            vec![
                ShotRecord { x: -12, y: 88, made: true },
                ShotRecord { x: 230, y: 5, made: false },
            ]
        );
    }

    #[test]
    fn accepts_whole_number_floats() {
        let rows = vec![vec![json!("x"), json!(-12.0), json!(88.0), json!(1)]];
        let shots = from_rows(&headers(), &rows).expect("parse shots");
        assert_eq!(shots[0].x, -12);
    }

    #[test]
    fn missing_column_is_rejected() {
        let headers: Vec<String> = ["GRID_TYPE", "LOC_X"].iter().map(|s| s.to_string()).collect();
        let err = from_rows(&headers, &[]).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn("LOC_Y")));
    }

    #[test]
    fn fractional_coordinate_is_rejected() {
        let rows = vec![vec![json!("x"), json!(12.7), json!(88.4), json!(1)]];
        let err = from_rows(&headers(), &rows).unwrap_err();
        match err {
            ChartError::MalformedShot { row: 0, reason } => {
                assert!(reason.contains("LOC_X"), "unexpected reason: {}", reason);
            }
            other => panic!("expected malformed shot, got {}", other),
        }
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let rows = vec![vec![json!("x"), json!(5_000_000_000i64), json!(88), json!(1)]];
        let err = from_rows(&headers(), &rows).unwrap_err();
        assert!(matches!(err, ChartError::MalformedShot { row: 0, .. }));
    }

    #[test]
    fn malformed_cell_is_rejected() {
        let rows = vec![vec![json!("x"), json!("left"), json!(88), json!(1)]];
        let err = from_rows(&headers(), &rows).unwrap_err();
        assert!(matches!(err, ChartError::MalformedShot { row: 0, .. }));
    }

    #[test]
    fn short_row_is_rejected() {
        let rows = vec![vec![json!("x"), json!(-12)]];
        let err = from_rows(&headers(), &rows).unwrap_err();
        assert!(matches!(err, ChartError::MalformedShot { .. }));
    }
}
