//! Two-column CSV ingestion for digitised literature data.
//!
//! Files are plain `<value>,<value>` rows:
//! ```text
//! 350.0,0.02
//! 400.0,0.85
//! 450.0,0.40
//! ```
//!
//! There is no header or comment handling; a header line is just a malformed
//! row, and so is a line starting with `#`. Quote characters carry no
//! meaning. Each row is validated on its own: rows without two numeric fields
//! are skipped, and a single warning with the skipped count is logged once
//! the whole file has been read. Columns beyond the second are ignored and
//! fields are trimmed. Blank lines are not rows at all.
//!
//! Each column is multiplied by a unit factor from [`crate::units`] so the
//! values come out in canonical units.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use thiserror::Error;

use crate::dispersion::LiteratureTable;
use crate::error::OpticsError;

/// Errors while reading a CSV file. Malformed rows are not errors.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed columns plus the number of rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvColumns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub skipped: usize,
}

impl CsvColumns {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Treat the first column as photon energy in ascending order.
    pub fn into_table(self) -> Result<LiteratureTable, OpticsError> {
        LiteratureTable::new(self.x, self.y)
    }

    /// Treat the first column as ascending wavelength in nm.
    pub fn into_table_from_wavelengths(self) -> Result<LiteratureTable, OpticsError> {
        LiteratureTable::from_wavelengths(&self.x, &self.y)
    }
}

/// Read a two-column CSV file, scaling the columns by `x_unit` and `y_unit`.
pub fn read_two_column_csv(
    path: impl AsRef<Path>,
    x_unit: f64,
    y_unit: f64,
) -> Result<CsvColumns, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let columns = parse_two_column_csv(file, x_unit, y_unit)?;
    debug!(
        "Read {} rows from {} ({} skipped)",
        columns.len(),
        path.display(),
        columns.skipped
    );
    Ok(columns)
}

/// Parse two-column CSV data from any reader.
pub fn parse_two_column_csv<R: Read>(
    source: R,
    x_unit: f64,
    y_unit: f64,
) -> Result<CsvColumns, ReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(source);

    let mut columns = CsvColumns::default();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(ReadError::Csv(e)),
            // Invalid UTF-8 and the like: the row is malformed, not the file.
            Err(_) => {
                columns.skipped += 1;
                continue;
            }
        };
        match parse_row(&record) {
            Some((x, y)) => {
                columns.x.push(x * x_unit);
                columns.y.push(y * y_unit);
            }
            None => columns.skipped += 1,
        }
    }

    if columns.skipped > 0 {
        warn!(
            "A total of {} ill-formed rows were not read. Every row must match the <number>,<number> format.",
            columns.skipped
        );
    }
    Ok(columns)
}

/// Append the rows of a CSV file to the given accumulators.
///
/// Both accumulators must start empty. Otherwise a warning is logged, they
/// are left unchanged and 0 is returned. Returns the number of rows read.
pub fn append_two_column_csv(
    path: impl AsRef<Path>,
    x_unit: f64,
    y_unit: f64,
    x: &mut Vec<f64>,
    y: &mut Vec<f64>,
) -> Result<usize, ReadError> {
    if !x.is_empty() || !y.is_empty() {
        warn!(
            "The provided containers must be empty; {} will not be read and the containers remain unchanged.",
            path.as_ref().display()
        );
        return Ok(0);
    }
    let columns = read_two_column_csv(path, x_unit, y_unit)?;
    let n = columns.len();
    *x = columns.x;
    *y = columns.y;
    Ok(n)
}

fn parse_row(record: &StringRecord) -> Option<(f64, f64)> {
    let x: f64 = record.get(0)?.parse().ok()?;
    let y: f64 = record.get(1)?.parse().ok()?;
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{CM, M};

    #[test]
    fn test_parses_and_scales() {
        let data = "1.5,2\n2.5,3\n";
        let cols = parse_two_column_csv(data.as_bytes(), CM, M).unwrap();
        assert_eq!(cols.x, vec![15.0, 25.0]);
        assert_eq!(cols.y, vec![2000.0, 3000.0]);
        assert_eq!(cols.skipped, 0);
    }

    #[test]
    fn test_skips_rows_without_comma_or_numbers() {
        let data = "wavelength,intensity\n400,1\n450\n500, 2 \n550,nan\n,3\n";
        let cols = parse_two_column_csv(data.as_bytes(), 1.0, 1.0).unwrap();
        assert_eq!(cols.x, vec![400.0, 500.0]);
        assert_eq!(cols.y, vec![1.0, 2.0]);
        assert_eq!(cols.skipped, 4);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "1,2,3\n4,5\n";
        let cols = parse_two_column_csv(data.as_bytes(), 1.0, 1.0).unwrap();
        assert_eq!(cols.x, vec![1.0, 4.0]);
        assert_eq!(cols.y, vec![2.0, 5.0]);
        assert_eq!(cols.skipped, 0);
    }

    #[test]
    fn test_hash_lines_are_counted_as_malformed() {
        let data = "#bad,row\n# digitised from fig. 3\n1.0,2.0\n";
        let cols = parse_two_column_csv(data.as_bytes(), 1.0, 1.0).unwrap();
        assert_eq!(cols.x, vec![1.0]);
        assert_eq!(cols.skipped, 2);
    }

    #[test]
    fn test_stray_quote_only_spoils_its_own_row() {
        let data = "\"2.0,1.0\n3.0,2.0\n4.0,3.0\n5.0,4.0\n";
        let cols = parse_two_column_csv(data.as_bytes(), 1.0, 1.0).unwrap();
        assert_eq!(cols.x, vec![3.0, 4.0, 5.0]);
        assert_eq!(cols.y, vec![2.0, 3.0, 4.0]);
        assert_eq!(cols.skipped, 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_two_column_csv("/nonexistent/spectrum.csv", 1.0, 1.0).unwrap_err();
        assert!(matches!(err, ReadError::Open { .. }));
    }
}
