//! Errors raised while building or ingesting sparse matrices.

use dyadic_rings::ModulusError;
use thiserror::Error;

/// Errors that can occur when validating matrix input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The requested exponent does not fit the coefficient word.
    #[error(transparent)]
    Modulus(#[from] ModulusError),

    /// An entry names a column past the matrix width.
    #[error("row {row}: column {column} is out of bounds for {num_cols} columns")]
    ColumnOutOfBounds {
        /// Row holding the entry.
        row: usize,
        /// Offending column.
        column: usize,
        /// Matrix width.
        num_cols: usize,
    },

    /// An entry names a row past the matrix height.
    #[error("row {row} is out of bounds for {num_rows} rows")]
    RowOutOfBounds {
        /// Offending row.
        row: usize,
        /// Matrix height.
        num_rows: usize,
    },

    /// Row entries are not strictly increasing by column.
    #[error("row {row}: column {column} does not strictly follow column {previous}")]
    UnsortedRow {
        /// Row holding the entries.
        row: usize,
        /// Column that came out of order.
        column: usize,
        /// Column stored just before it.
        previous: usize,
    },
}
