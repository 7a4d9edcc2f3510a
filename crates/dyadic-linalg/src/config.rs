//! Elimination configuration and the policies it selects.
//!
//! The two boolean knobs are resolved once per elimination into zero-sized
//! policy types, so the inner loop is monomorphised and carries no flag
//! tests.

use dyadic_rings::Word;

use crate::density::ColumnDensity;
use crate::pivot::claim_same_column;
use crate::sparse_matrix::SparseRow;

/// Configuration for [`PowerOfTwoElimination`](crate::PowerOfTwoElimination).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EliminationConfig {
    /// Take a row's head as pivot whenever it already sits in the next pivot
    /// column and is odd, before falling back to the density search.
    pub prefer_no_column_pivoting: bool,
    /// Keep pivot rows in the returned transcript instead of clearing them
    /// once they have been used.
    pub preserve_upper_rows: bool,
    /// Number of steps between progress events.
    /// `None` derives it from the row count.
    pub progress_interval: Option<usize>,
}

impl EliminationConfig {
    /// Sets [`prefer_no_column_pivoting`](Self::prefer_no_column_pivoting).
    #[must_use]
    pub fn with_prefer_no_column_pivoting(mut self, enabled: bool) -> Self {
        self.prefer_no_column_pivoting = enabled;
        self
    }

    /// Sets [`preserve_upper_rows`](Self::preserve_upper_rows).
    #[must_use]
    pub fn with_preserve_upper_rows(mut self, enabled: bool) -> Self {
        self.preserve_upper_rows = enabled;
        self
    }

    /// Sets [`progress_interval`](Self::progress_interval).
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Returns the progress cadence for a matrix with `num_rows` rows:
    /// the configured interval, or one percent of the rows kept within
    /// `10..=1000`. Never zero.
    #[must_use]
    pub fn progress_interval_for(&self, num_rows: usize) -> usize {
        self.progress_interval
            .unwrap_or_else(|| (num_rows / 100).clamp(10, 1000))
            .max(1)
    }
}

/// How a step looks for a pivot before the density-driven search.
pub trait ColumnPivoting {
    /// Name reported in the elimination span.
    const NAME: &'static str;

    /// Tries to claim a pivot that needs no column permutation.
    ///
    /// Returns the index (into `rows`) of the claimed row.
    fn same_column<W: Word>(
        rows: &[SparseRow<W>],
        order: &[usize],
        next_column: &mut usize,
        density: &mut ColumnDensity,
    ) -> Option<usize>;
}

/// Scans the candidates for an odd head already in the pivot column.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreferSameColumn;

/// Always runs the density search.
#[derive(Clone, Copy, Debug, Default)]
pub struct DensityPivoting;

impl ColumnPivoting for PreferSameColumn {
    const NAME: &'static str = "prefer-same-column";

    fn same_column<W: Word>(
        rows: &[SparseRow<W>],
        order: &[usize],
        next_column: &mut usize,
        density: &mut ColumnDensity,
    ) -> Option<usize> {
        order
            .iter()
            .copied()
            .find(|&i| claim_same_column(&rows[i], next_column, density))
    }
}

impl ColumnPivoting for DensityPivoting {
    const NAME: &'static str = "density";

    fn same_column<W: Word>(
        _rows: &[SparseRow<W>],
        _order: &[usize],
        _next_column: &mut usize,
        _density: &mut ColumnDensity,
    ) -> Option<usize> {
        None
    }
}

/// What happens to a pivot row once every row below it is eliminated.
pub trait UpperRowRetention {
    /// Name reported in the elimination span.
    const NAME: &'static str;

    /// Finalises row `k` after step `k`.
    fn retire<W: Word>(row: &mut SparseRow<W>);
}

/// Keeps pivot rows, giving an echelon form in the transcript.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreserveUpperRows;

/// Frees pivot rows as soon as they are used.
#[derive(Clone, Copy, Debug, Default)]
pub struct TruncateUpperRows;

impl UpperRowRetention for PreserveUpperRows {
    const NAME: &'static str = "preserve";

    fn retire<W: Word>(_row: &mut SparseRow<W>) {}
}

impl UpperRowRetention for TruncateUpperRows {
    const NAME: &'static str = "truncate";

    fn retire<W: Word>(row: &mut SparseRow<W>) {
        row.clear();
        row.entries_mut().shrink_to_fit();
    }
}
