//! Sparse elimination modulo a degrading power of two.
//!
//! The elimination starts modulo 2^E and only ever pivots on odd entries,
//! which are the units. When every remaining row is even, the rank found so
//! far is the rank modulo the smallest power of two still in play, and dividing
//! all remaining rows by two turns the problem into the same elimination
//! modulo 2^(E-1). Each such degradation records one rank, so a single pass
//! yields the ranks modulo 2, 4, ..., 2^E.
//!
//! # References
//!
//! - J-G. Dumas, B. D. Saunders, G. Villard, "On efficient sparse integer
//!   matrix Smith normal form computations", J. Symbolic Computation (2001)

use dyadic_rings::{Pow2Modulus, Word};
use tracing::{debug, info, info_span, trace};

use crate::config::{
    ColumnPivoting, DensityPivoting, EliminationConfig, PreferSameColumn, PreserveUpperRows,
    TruncateUpperRows, UpperRowRetention,
};
use crate::density::ColumnDensity;
use crate::elimination::eliminate_row;
use crate::error::MatrixError;
use crate::pivot::{select_pivot, sparsest_first, PivotOutcome};
use crate::smith_normal_form::RankProfile;
use crate::sparse_matrix::{SparseMatrix, SparseRow, SparseRowSource};

/// Everything an elimination produces.
#[derive(Clone, Debug)]
pub struct EliminationOutcome<W> {
    /// Ranks modulo 2, 4, ..., 2^E.
    pub profile: RankProfile,
    /// The rows after elimination, in pivot order.
    ///
    /// Pivot rows are kept only with
    /// [`preserve_upper_rows`](EliminationConfig::preserve_upper_rows); a row
    /// retains the coefficients it had modulo the modulus in force when it
    /// was pivoted, so rows pivoted after a degradation are scaled down.
    pub rows: SparseMatrix<W>,
    /// `(pivot column, original column)` for every pivot, in order.
    /// Columns are relabelled by these transpositions applied in sequence.
    pub column_swaps: Vec<(usize, usize)>,
}

/// Single-pass elimination state.
pub struct PowerOfTwoElimination<W> {
    /// Working rows; rows `k..` are active at step `k`.
    rows: Vec<SparseRow<W>>,
    num_cols: usize,
    /// Nonzero count per column over the active rows.
    density: ColumnDensity,
    /// Current modulus, degraded as the elimination proceeds.
    modulus: Pow2Modulus<W>,
    /// Number of pivots so far, which is also the next pivot column.
    next_column: usize,
    ranks: Vec<usize>,
    column_swaps: Vec<(usize, usize)>,
    config: EliminationConfig,
}

impl<W: Word> PowerOfTwoElimination<W> {
    /// Copies `matrix` reduced modulo `2^exponent` and counts its columns.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Modulus`] if `exponent` is outside
    /// `1..=W::BITS`, or a row error if the source yields an unsorted row or
    /// a column beyond its column count.
    pub fn new<M>(matrix: &M, exponent: u32, config: EliminationConfig) -> Result<Self, MatrixError>
    where
        M: SparseRowSource<W>,
    {
        let modulus = Pow2Modulus::new(exponent)?;
        let num_cols = matrix.num_cols();
        let rows = (0..matrix.num_rows())
            .map(|i| {
                SparseRow::try_from_entries(i, num_cols, matrix.row_entries(i), |v| {
                    modulus.reduce(v)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let density = ColumnDensity::from_rows(&rows, num_cols);

        Ok(Self {
            rows,
            num_cols,
            density,
            modulus,
            next_column: 0,
            ranks: Vec::with_capacity(exponent as usize),
            column_swaps: Vec::new(),
            config,
        })
    }

    /// Runs the elimination to completion.
    #[must_use]
    pub fn run(self) -> EliminationOutcome<W> {
        match (
            self.config.prefer_no_column_pivoting,
            self.config.preserve_upper_rows,
        ) {
            (true, true) => self.eliminate::<PreferSameColumn, PreserveUpperRows>(),
            (true, false) => self.eliminate::<PreferSameColumn, TruncateUpperRows>(),
            (false, true) => self.eliminate::<DensityPivoting, PreserveUpperRows>(),
            (false, false) => self.eliminate::<DensityPivoting, TruncateUpperRows>(),
        }
    }

    fn eliminate<P: ColumnPivoting, U: UpperRowRetention>(mut self) -> EliminationOutcome<W> {
        let num_rows = self.rows.len();
        let span = info_span!(
            "power_of_two_elimination",
            rows = num_rows,
            cols = self.num_cols,
            exponent = self.modulus.exponent(),
            pivoting = P::NAME,
            retention = U::NAME,
        );
        let _guard = span.enter();

        if let Some(last) = num_rows.checked_sub(1) {
            let interval = self.config.progress_interval_for(num_rows);
            for k in 0..last {
                if k % interval == 0 {
                    info!(
                        step = k,
                        rank = self.next_column,
                        modulus = %self.modulus,
                        "elimination progress"
                    );
                }
                self.step::<P, U>(k);
            }
            // nothing lies below the last row and it is never retired
            self.step::<P, PreserveUpperRows>(last);
        }

        self.finish()
    }

    /// Pivots on a row of `k..`, moves it to position `k` and clears the
    /// pivot column from every row below.
    fn step<P: ColumnPivoting, U: UpperRowRetention>(&mut self, k: usize) {
        if let Some((column, origin)) = self.place_pivot::<P>(k) {
            let (upper, lower) = self.rows.split_at_mut(k + 1);
            let pivot = &upper[k];
            for target in lower {
                eliminate_row(
                    &self.modulus,
                    target,
                    pivot,
                    column,
                    origin,
                    &mut self.density,
                );
            }
        }
        U::retire(&mut self.rows[k]);
    }

    /// Finds a pivot for step `k` and swaps its row into place.
    ///
    /// Returns `(pivot column, original column)` when a pivot was found, and
    /// `None` when the chosen row was empty.
    #[must_use]
    fn place_pivot<P: ColumnPivoting>(&mut self, k: usize) -> Option<(usize, usize)> {
        let (selected, outcome) = self.find_pivot::<P>(k);
        if selected != k {
            trace!(step = k, row = selected, "row permutation");
            self.rows.swap(k, selected);
        }

        match outcome {
            PivotOutcome::Found { origin } => {
                let column = self.next_column - 1;
                if origin != column {
                    trace!(column, origin, "column permutation");
                }
                trace!(step = k, column, modulus = %self.modulus, "pivot");
                self.column_swaps.push((column, origin));
                Some((column, origin))
            }
            PivotOutcome::Exhausted | PivotOutcome::NoOddEntry => None,
        }
    }

    /// Tries the active rows sparsest first, degrading the modulus until one
    /// of them yields a pivot or turns out empty.
    fn find_pivot<P: ColumnPivoting>(&mut self, k: usize) -> (usize, PivotOutcome) {
        loop {
            let order = sparsest_first(&self.rows, k);

            if let Some(i) =
                P::same_column(&self.rows, &order, &mut self.next_column, &mut self.density)
            {
                let origin = self.next_column - 1;
                return (i, PivotOutcome::Found { origin });
            }

            for &i in &order {
                let outcome =
                    select_pivot(&mut self.rows[i], &mut self.next_column, &mut self.density);
                if outcome.settles_step() {
                    return (i, outcome);
                }
            }

            self.degrade(k);
        }
    }

    /// Records the rank at the current modulus and halves rows `k..`.
    ///
    /// Every active coefficient is even here, so halving is exact and keeps
    /// every entry nonzero.
    fn degrade(&mut self, k: usize) {
        self.ranks.push(self.next_column);
        debug!(
            modulus = %self.modulus,
            rank = self.next_column,
            "rank recorded before degrading"
        );
        for row in &mut self.rows[k..] {
            row.halve();
        }
        self.modulus = self.modulus.halved();
    }

    fn finish(mut self) -> EliminationOutcome<W> {
        for _ in 0..self.modulus.exponent() {
            self.ranks.push(self.next_column);
        }
        debug!(rank = self.next_column, modulus = %self.modulus, "final rank");

        EliminationOutcome {
            profile: RankProfile::new(self.ranks),
            rows: SparseMatrix::from_parts(self.rows, self.num_cols),
            column_swaps: self.column_swaps,
        }
    }
}
