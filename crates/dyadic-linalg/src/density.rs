//! Column density bookkeeping.
//!
//! Counts, per column, how many active rows hold a nonzero entry there. The
//! pivot search prefers sparse columns to keep fill-in low; the counts never
//! influence the computed ranks.

use dyadic_rings::Word;

use crate::sparse_matrix::SparseRow;

/// Number of active rows with a nonzero entry in each column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnDensity {
    counts: Vec<usize>,
}

impl ColumnDensity {
    /// Creates an all-zero table for `num_cols` columns.
    #[must_use]
    pub fn new(num_cols: usize) -> Self {
        Self {
            counts: vec![0; num_cols],
        }
    }

    /// Counts the entries of `rows`.
    #[must_use]
    pub fn from_rows<W: Word>(rows: &[SparseRow<W>], num_cols: usize) -> Self {
        let mut density = Self::new(num_cols);
        for row in rows {
            density.add_row(row);
        }
        density
    }

    /// Returns the count for `column`.
    #[must_use]
    pub fn get(&self, column: usize) -> usize {
        self.counts[column]
    }

    /// Returns the number of columns tracked.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.counts.len()
    }

    /// Returns all counts.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    /// Records a new nonzero in `column`.
    pub fn increment(&mut self, column: usize) {
        self.counts[column] += 1;
    }

    /// Records a nonzero leaving `column`.
    pub fn decrement(&mut self, column: usize) {
        debug_assert!(self.counts[column] > 0, "density of column {column} underflows");
        self.counts[column] -= 1;
    }

    /// Counts every entry of `row`.
    pub fn add_row<W: Word>(&mut self, row: &SparseRow<W>) {
        for column in row.columns() {
            self.increment(column);
        }
    }

    /// Forgets every entry of `row`, which leaves the active submatrix.
    pub fn remove_row<W: Word>(&mut self, row: &SparseRow<W>) {
        for column in row.columns() {
            self.decrement(column);
        }
    }
}
