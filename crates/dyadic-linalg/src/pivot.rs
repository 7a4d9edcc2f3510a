//! Pivot search.
//!
//! Over `Z/2^e Z` only odd coefficients are units, so a pivot must be odd.
//! Among the odd entries of a candidate row the one sitting in the column
//! with the fewest active nonzeros wins, which bounds the fill-in the
//! following elimination can create. Candidate rows are tried sparsest
//! first for the same reason.

use dyadic_rings::Word;

use crate::density::ColumnDensity;
use crate::sparse_matrix::SparseRow;

/// Result of searching one row for a pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotOutcome {
    /// A pivot was placed at the head of the row; `origin` is the column it
    /// came from before being relabelled to the current pivot column.
    Found {
        /// Original column of the pivot entry.
        origin: usize,
    },
    /// The row has no nonzero entry left.
    Exhausted,
    /// The row is nonzero but every coefficient is even.
    NoOddEntry,
}

impl PivotOutcome {
    /// Returns true unless the row had only even entries.
    #[must_use]
    pub fn settles_step(self) -> bool {
        !matches!(self, Self::NoOddEntry)
    }
}

/// Returns the indices `start..rows.len()` ordered by row length.
///
/// The sort is stable, so rows of equal length keep their index order.
#[must_use]
pub(crate) fn sparsest_first<W: Word>(rows: &[SparseRow<W>], start: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (start..rows.len()).collect();
    order.sort_by_key(|&i| rows[i].len());
    order
}

/// Takes the head of `row` as pivot if it already sits in `next_column` and
/// is odd, so no column permutation is needed.
///
/// On success the row leaves the active submatrix and `next_column` advances.
pub(crate) fn claim_same_column<W: Word>(
    row: &SparseRow<W>,
    next_column: &mut usize,
    density: &mut ColumnDensity,
) -> bool {
    match row.head() {
        Some((column, value)) if column == *next_column && value.is_odd() => {
            density.remove_row(row);
            *next_column += 1;
            true
        }
        _ => false,
    }
}

/// Searches `row` for the odd entry in the sparsest column.
///
/// Ties keep the lowest column. When a pivot is found the row's columns are
/// removed from `density`, the pivot entry is moved to the head of the row
/// and relabelled `next_column`, and `next_column` advances. If the head
/// already occupies `next_column`, the two coefficients trade places instead
/// of the entries moving, which is the same column swap seen from this row.
pub(crate) fn select_pivot<W: Word>(
    row: &mut SparseRow<W>,
    next_column: &mut usize,
    density: &mut ColumnDensity,
) -> PivotOutcome {
    let Some(first_odd) = row.iter().position(|(_, v)| v.is_odd()) else {
        return if row.is_empty() {
            PivotOutcome::Exhausted
        } else {
            PivotOutcome::NoOddEntry
        };
    };

    let mut best = first_odd;
    let mut best_density = density.get(row.as_slice()[first_odd].0);
    for (j, (column, value)) in row.iter().enumerate().skip(first_odd + 1) {
        let d = density.get(column);
        if d < best_density && value.is_odd() {
            best = j;
            best_density = d;
        }
    }

    density.remove_row(&*row);

    let column = *next_column;
    let entries = row.entries_mut();
    let origin = entries[best].0;
    if best != 0 {
        if entries[0].0 == column {
            let head_value = entries[0].1;
            entries[0].1 = entries[best].1;
            entries[best].1 = head_value;
        } else {
            entries[..=best].rotate_right(1);
        }
    }
    entries[0].0 = column;
    *next_column += 1;

    PivotOutcome::Found { origin }
}
