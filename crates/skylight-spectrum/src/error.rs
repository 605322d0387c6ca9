//! Lookup table error types.

use std::path::PathBuf;

/// Errors that can occur when reading a wavelength-indexed lookup table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Failed to read the table file from disk.
    #[error("failed to read table {}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed.
    #[error("line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// The table does not have one row per wavelength sample.
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    /// A row's wavelength does not match the sampling grid.
    #[error("row {row}: wavelength {found} nm does not match grid wavelength {expected} nm")]
    WavelengthMismatch { row: usize, expected: f64, found: f64 },
}
