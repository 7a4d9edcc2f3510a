//! Sparse matrices stored as one sorted vector per row.
//!
//! Elimination rewrites rows one at a time and changes their lengths
//! (fill-in and cancellation), so each row owns its own contiguous
//! `Vec<(column, coefficient)>` instead of sharing a CSR buffer.
//!
//! Invariants maintained by every constructor:
//! - entries are strictly increasing by column
//! - no stored coefficient is zero

use dyadic_rings::Word;

use crate::error::MatrixError;

/// A sparse row: `(column, coefficient)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SparseRow<W> {
    entries: Vec<(usize, W)>,
}

impl<W: Word> SparseRow<W> {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a row from entries, validating order and bounds.
    ///
    /// Every coefficient is passed through `reduce`; entries that reduce to
    /// zero are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ColumnOutOfBounds`] or
    /// [`MatrixError::UnsortedRow`], tagged with `row`.
    pub fn try_from_entries<I>(
        row: usize,
        num_cols: usize,
        entries: I,
        reduce: impl Fn(W) -> W,
    ) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = (usize, W)>,
    {
        let entries = entries.into_iter();
        let mut kept = Vec::with_capacity(entries.size_hint().0);
        let mut previous: Option<usize> = None;

        for (column, value) in entries {
            if column >= num_cols {
                return Err(MatrixError::ColumnOutOfBounds {
                    row,
                    column,
                    num_cols,
                });
            }
            if let Some(previous) = previous.filter(|&p| p >= column) {
                return Err(MatrixError::UnsortedRow {
                    row,
                    column,
                    previous,
                });
            }
            previous = Some(column);

            let value = reduce(value);
            if !value.is_zero() {
                kept.push((column, value));
            }
        }

        Ok(Self { entries: kept })
    }

    /// Wraps entries already known to be sorted and nonzero.
    pub(crate) fn from_sorted(entries: Vec<(usize, W)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|(_, v)| !v.is_zero()));
        Self { entries }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the row has no nonzero entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the lowest-column entry.
    #[must_use]
    pub fn head(&self) -> Option<(usize, W)> {
        self.entries.first().copied()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(usize, W)] {
        &self.entries
    }

    /// Returns an iterator over `(column, coefficient)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, W)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the columns holding nonzero entries.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(column, _)| column)
    }

    /// Returns the coefficient at `column`, or `None` if zero.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<W> {
        self.position(column).ok().map(|i| self.entries[i].1)
    }

    /// Binary-searches for `column`.
    pub(crate) fn position(&self, column: usize) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&column, |&(c, _)| c)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<(usize, W)> {
        &mut self.entries
    }

    /// Divides every coefficient by two.
    ///
    /// Only valid when all coefficients are even, so no entry vanishes.
    pub(crate) fn halve(&mut self) {
        for (_, value) in &mut self.entries {
            debug_assert!(!value.is_odd(), "halving an odd coefficient");
            *value = *value >> 1;
        }
    }

    /// Drops every entry.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<W> IntoIterator for SparseRow<W> {
    type Item = (usize, W);
    type IntoIter = std::vec::IntoIter<(usize, W)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Read access to a sparse matrix, row by row.
///
/// This is the only view the elimination needs of its input, so callers can
/// feed their own storage without converting to [`SparseMatrix`] first.
pub trait SparseRowSource<W> {
    /// Returns the number of rows.
    fn num_rows(&self) -> usize;

    /// Returns the number of columns.
    fn num_cols(&self) -> usize;

    /// Returns the nonzero entries of `row`, sorted by column.
    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, W)> + '_;
}

/// Sparse matrix with row-wise storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix<W> {
    /// One sorted sparse row per matrix row.
    rows: Vec<SparseRow<W>>,
    /// Number of columns.
    num_cols: usize,
}

impl<W: Word> SparseMatrix<W> {
    /// Creates a zero matrix.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            rows: vec![SparseRow::new(); num_rows],
            num_cols,
        }
    }

    /// Creates a matrix from per-row entry lists.
    ///
    /// Zero coefficients are dropped.
    ///
    /// # Errors
    ///
    /// Fails if a row is not strictly sorted by column or names a column
    /// `>= num_cols`.
    pub fn from_rows(num_cols: usize, rows: Vec<Vec<(usize, W)>>) -> Result<Self, MatrixError> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, entries)| SparseRow::try_from_entries(i, num_cols, entries, |v| v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows, num_cols })
    }

    /// Creates a sparse matrix from a dense one.
    ///
    /// Zero entries are not stored.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    #[must_use]
    pub fn from_dense(dense: &[Vec<W>]) -> Self {
        let num_cols = dense.first().map_or(0, Vec::len);
        let rows = dense
            .iter()
            .map(|row| {
                assert_eq!(row.len(), num_cols, "ragged dense matrix");
                SparseRow::from_sorted(
                    row.iter()
                        .enumerate()
                        .filter(|(_, v)| !v.is_zero())
                        .map(|(c, &v)| (c, v))
                        .collect(),
                )
            })
            .collect();
        Self { rows, num_cols }
    }

    /// Creates a sparse matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed with wrapping addition; sums that wrap
    /// to zero are dropped.
    ///
    /// # Errors
    ///
    /// Fails if a triplet lies outside the `num_rows x num_cols` shape.
    pub fn from_triplets(
        num_rows: usize,
        num_cols: usize,
        triplets: &[(usize, usize, W)],
    ) -> Result<Self, MatrixError> {
        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut rows: Vec<Vec<(usize, W)>> = vec![Vec::new(); num_rows];
        for (row, column, value) in sorted {
            if row >= num_rows {
                return Err(MatrixError::RowOutOfBounds { row, num_rows });
            }
            if column >= num_cols {
                return Err(MatrixError::ColumnOutOfBounds {
                    row,
                    column,
                    num_cols,
                });
            }
            let entries = &mut rows[row];
            match entries.len().checked_sub(1) {
                Some(last) if entries[last].0 == column => {
                    entries[last].1 = entries[last].1.wrapping_add(&value);
                }
                _ => entries.push((column, value)),
            }
        }

        let rows = rows
            .into_iter()
            .map(|mut entries| {
                entries.retain(|(_, v)| !v.is_zero());
                SparseRow::from_sorted(entries)
            })
            .collect();
        Ok(Self { rows, num_cols })
    }

    /// Creates an identity matrix of size n×n.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            rows: (0..n)
                .map(|i| SparseRow::from_sorted(vec![(i, W::one())]))
                .collect(),
            num_cols: n,
        }
    }

    /// Creates a square diagonal matrix; zero diagonal entries are skipped.
    #[must_use]
    pub fn from_diagonal(diagonal: &[W]) -> Self {
        Self {
            rows: diagonal
                .iter()
                .enumerate()
                .map(|(i, &d)| {
                    let entries = if d.is_zero() { vec![] } else { vec![(i, d)] };
                    SparseRow::from_sorted(entries)
                })
                .collect(),
            num_cols: diagonal.len(),
        }
    }

    pub(crate) fn from_parts(rows: Vec<SparseRow<W>>, num_cols: usize) -> Self {
        Self { rows, num_cols }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the number of non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseRow::len).sum()
    }

    /// Returns row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> &SparseRow<W> {
        &self.rows[i]
    }

    /// Returns all rows.
    #[must_use]
    pub fn rows(&self) -> &[SparseRow<W>] {
        &self.rows
    }

    /// Returns the entry at (row, col), or None if zero.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<W> {
        self.rows.get(row)?.get(col)
    }

    /// Converts to dense matrix representation.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<W>> {
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![W::zero(); self.num_cols];
                for (col, val) in row.iter() {
                    dense[col] = val;
                }
                dense
            })
            .collect()
    }
}

impl<W: Word> SparseRowSource<W> for SparseMatrix<W> {
    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        self.rows[row].iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dense() {
        let dense = vec![vec![1u32, 0, 2], vec![0, 3, 0], vec![4, 0, 5]];
        let sparse = SparseMatrix::from_dense(&dense);

        assert_eq!(sparse.num_rows(), 3);
        assert_eq!(sparse.num_cols(), 3);
        assert_eq!(sparse.nnz(), 5);

        assert_eq!(sparse.get(0, 0), Some(1));
        assert_eq!(sparse.get(0, 1), None);
        assert_eq!(sparse.get(0, 2), Some(2));
        assert_eq!(sparse.get(1, 1), Some(3));
        assert_eq!(sparse.get(2, 0), Some(4));
        assert_eq!(sparse.get(2, 2), Some(5));
        assert_eq!(sparse.get(7, 0), None);
    }

    #[test]
    fn test_to_dense() {
        let original = vec![vec![1u64, 0, 2], vec![0, 3, 0], vec![4, 0, 5]];
        let sparse = SparseMatrix::from_dense(&original);
        assert_eq!(sparse.to_dense(), original);
    }

    #[test]
    fn test_from_rows_drops_zeros() {
        let m = SparseMatrix::from_rows(4, vec![vec![(0, 3u8), (2, 0), (3, 1)], vec![]]).unwrap();
        assert_eq!(m.row(0).as_slice(), &[(0, 3), (3, 1)]);
        assert!(m.row(1).is_empty());
    }

    #[test]
    fn test_from_rows_rejects_unsorted() {
        let err = SparseMatrix::from_rows(4, vec![vec![(0, 1u8)], vec![(2, 1), (2, 5)]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::UnsortedRow {
                row: 1,
                column: 2,
                previous: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_wide_column() {
        let err = SparseMatrix::from_rows(3, vec![vec![(3, 1u16)]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::ColumnOutOfBounds {
                row: 0,
                column: 3,
                num_cols: 3
            }
        );
        assert_eq!(err.to_string(), "row 0: column 3 is out of bounds for 3 columns");
    }

    #[test]
    fn test_from_triplets() {
        let m = SparseMatrix::from_triplets(
            3,
            3,
            &[(2, 1, 5u8), (0, 2, 1), (0, 0, 7), (2, 1, 3), (1, 1, 128), (1, 1, 128)],
        )
        .unwrap();

        assert_eq!(m.row(0).as_slice(), &[(0, 7), (2, 1)]);
        // 128 + 128 wraps to zero in a u8 and is dropped
        assert!(m.row(1).is_empty());
        assert_eq!(m.row(2).as_slice(), &[(1, 8)]);
    }

    #[test]
    fn test_from_triplets_bounds() {
        assert_eq!(
            SparseMatrix::from_triplets(2, 2, &[(2, 0, 1u32)]).unwrap_err(),
            MatrixError::RowOutOfBounds { row: 2, num_rows: 2 }
        );
    }

    #[test]
    fn test_identity() {
        let id: SparseMatrix<u32> = SparseMatrix::identity(3);
        assert_eq!(id.nnz(), 3);
        assert_eq!(id.to_dense(), vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_from_diagonal() {
        let d = SparseMatrix::from_diagonal(&[1u32, 0, 4]);
        assert_eq!(d.nnz(), 2);
        assert_eq!(d.get(2, 2), Some(4));
        assert!(d.row(1).is_empty());
    }

    #[test]
    fn test_row_lookup() {
        let row = SparseRow::try_from_entries(0, 10, vec![(1, 3u32), (4, 8), (9, 2)], |v| v).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.head(), Some((1, 3)));
        assert_eq!(row.get(4), Some(8));
        assert_eq!(row.get(5), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec![1, 4, 9]);
    }

    #[test]
    fn test_try_from_entries_reduces() {
        let row = SparseRow::try_from_entries(0, 10, vec![(1, 16u32), (2, 17)], |v| v & 15).unwrap();
        assert_eq!(row.as_slice(), &[(2, 1)]);
    }

    #[test]
    fn test_halve() {
        let mut row = SparseRow::from_sorted(vec![(0, 4u32), (3, 2)]);
        row.halve();
        assert_eq!(row.as_slice(), &[(0, 2), (3, 1)]);
    }

    #[test]
    fn test_row_source() {
        fn total<S: SparseRowSource<u32>>(source: &S) -> u32 {
            (0..source.num_rows())
                .flat_map(|r| source.row_entries(r))
                .map(|(_, v)| v)
                .sum()
        }
        let m = SparseMatrix::from_dense(&[vec![1u32, 2], vec![0, 3]]);
        assert_eq!(total(&m), 6);
    }
}
