//! Wavelength-indexed lookup tables (color-matching functions, ozone cross-sections).
//!
//! Tables are plain text, one row per wavelength sample: the wavelength in
//! nanometers followed by one or more value columns, separated by whitespace
//! or commas. Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use crate::error::TableError;
use crate::{Spectrum, WAVELENGTH_COUNT, wavelength_nm};

const BUILTIN_CMF: &str = include_str!("../data/cie-cmf.txt");
const BUILTIN_OZONE: &str = include_str!("../data/ozone.txt");

/// Tolerance when matching a row's wavelength against the grid, in nanometers.
const WAVELENGTH_TOLERANCE_NM: f64 = 1e-6;

/// A table with one row per wavelength sample and `N` value columns.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupTable {
    columns: Vec<Spectrum>,
}

impl LookupTable {
    /// Parse a table with exactly `column_count` value columns after the wavelength.
    ///
    /// Extra columns are ignored, missing ones are an error.
    pub fn parse(text: &str, column_count: usize) -> Result<Self, TableError> {
        let mut columns = vec![Spectrum::ZERO; column_count];
        let mut row = 0;
        let mut extra_columns = false;

        for (line_idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty())
                .collect();

            if fields.len() < column_count + 1 {
                return Err(TableError::ParseError {
                    line: line_idx + 1,
                    message: format!(
                        "expected {} columns, found {}",
                        column_count + 1,
                        fields.len()
                    ),
                });
            }

            extra_columns |= fields.len() > column_count + 1;

            if row >= WAVELENGTH_COUNT {
                // Keep counting so the error reports the real row total.
                row += 1;
                continue;
            }

            let wavelength = parse_field(fields[0], line_idx)?;
            let expected = wavelength_nm(row);
            if (wavelength - expected).abs() > WAVELENGTH_TOLERANCE_NM {
                return Err(TableError::WavelengthMismatch {
                    row,
                    expected,
                    found: wavelength,
                });
            }

            for (col, field) in fields[1..=column_count].iter().enumerate() {
                columns[col][row] = parse_field(field, line_idx)?;
            }
            row += 1;
        }

        if row != WAVELENGTH_COUNT {
            return Err(TableError::RowCount {
                expected: WAVELENGTH_COUNT,
                found: row,
            });
        }

        if extra_columns {
            tracing::warn!(column_count, "ignoring extra lookup table columns");
        }
        Ok(Self { columns })
    }

    /// Read and parse a table file.
    pub fn load(path: &Path, column_count: usize) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text, column_count)?;
        tracing::debug!(path = %path.display(), column_count, "loaded lookup table");
        Ok(table)
    }

    /// The bundled CIE 1931 2° color-matching functions (x̄, ȳ, z̄).
    pub fn builtin_cmf() -> Self {
        Self::parse(BUILTIN_CMF, 3).unwrap_or_else(|e| panic!("bundled CMF table is invalid: {e}"))
    }

    /// The bundled ozone absorption cross-sections in cm²/molecule.
    pub fn builtin_ozone() -> Self {
        Self::parse(BUILTIN_OZONE, 1)
            .unwrap_or_else(|e| panic!("bundled ozone table is invalid: {e}"))
    }

    /// Value column `index` as a spectrum.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`column_count`](Self::column_count).
    pub fn column(&self, index: usize) -> Spectrum {
        self.columns[index]
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

fn parse_field(field: &str, line_idx: usize) -> Result<f64, TableError> {
    field.parse::<f64>().map_err(|e| TableError::ParseError {
        line: line_idx + 1,
        message: format!("invalid number {field:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    fn synthetic_table(columns: usize, sep: &str) -> String {
        let mut text = String::from("# header comment\n\n");
        for row in 0..WAVELENGTH_COUNT {
            write!(text, "{}", wavelength_nm(row)).unwrap();
            for col in 0..columns {
                write!(text, "{sep}{}", row * 10 + col).unwrap();
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_builtin_cmf_peaks() {
        let cmf = LookupTable::builtin_cmf();
        assert_eq!(cmf.column_count(), 3);
        // ȳ peaks at exactly 1.0 at 555 nm (index 35).
        assert_eq!(cmf.column(1)[35], 1.0);
        assert_eq!(cmf.column(1).max(), 1.0);
        // z̄ vanishes in the red.
        assert_eq!(cmf.column(2)[WAVELENGTH_COUNT - 1], 0.0);
    }

    #[test]
    fn test_builtin_ozone_is_positive() {
        let ozone = LookupTable::builtin_ozone();
        assert_eq!(ozone.column_count(), 1);
        assert!(ozone.column(0).iter().all(|&v| v > 0.0 && v < 1e-19));
    }

    #[test]
    fn test_parse_whitespace_and_commas() {
        let ws = LookupTable::parse(&synthetic_table(2, " \t"), 2).unwrap();
        let csv = LookupTable::parse(&synthetic_table(2, ","), 2).unwrap();
        assert_eq!(ws, csv);
        assert_eq!(ws.column(1)[3], 31.0);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let table = LookupTable::parse(&synthetic_table(3, " "), 1).unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.column(0)[5], 50.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let err = LookupTable::parse(&synthetic_table(1, " "), 3).unwrap_err();
        assert!(matches!(err, TableError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_row_count_mismatch() {
        let text: String = synthetic_table(1, " ").lines().take(12).collect::<Vec<_>>().join("\n");
        let err = LookupTable::parse(&text, 1).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowCount {
                expected: WAVELENGTH_COUNT,
                found: 10
            }
        ));
    }

    #[test]
    fn test_too_many_rows() {
        let mut text = synthetic_table(1, " ");
        text.push_str("785 1\n");
        let err = LookupTable::parse(&text, 1).unwrap_err();
        assert!(matches!(err, TableError::RowCount { found, .. } if found == WAVELENGTH_COUNT + 1));
    }

    #[test]
    fn test_wavelength_mismatch() {
        let text = synthetic_table(1, " ").replacen("385 ", "386 ", 1);
        let err = LookupTable::parse(&text, 1).unwrap_err();
        assert!(matches!(err, TableError::WavelengthMismatch { row: 1, .. }));
    }

    #[test]
    fn test_invalid_number() {
        let text = synthetic_table(1, " ").replacen("390 20", "390 abc", 1);
        let err = LookupTable::parse(&text, 1).unwrap_err();
        assert!(matches!(err, TableError::ParseError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        std::fs::write(&path, synthetic_table(1, " ")).unwrap();

        let table = LookupTable::load(&path, 1).unwrap();
        assert_eq!(table.column(0)[80], 800.0);

        let missing = LookupTable::load(&dir.path().join("missing.txt"), 1);
        assert!(matches!(missing, Err(TableError::ReadError { .. })));
    }
}
