//! # dyadic-linalg
//!
//! Sparse Gaussian elimination over `Z/2^E Z` for the dyadic engine.
//!
//! This crate provides:
//! - Sparse matrices with one sorted row vector per row
//! - A single-pass elimination that degrades the modulus one bit at a time,
//!   yielding the ranks modulo 2, 4, ..., 2^E
//! - The local Smith normal form at 2 derived from those ranks
//!
//! ## Pivoting
//!
//! Pivots are odd entries, the units of `Z/2^E Z`. Candidate rows are tried
//! sparsest first and, within a row, the odd entry in the sparsest column is
//! taken, which keeps fill-in low. A same-column fast path and the
//! retention of eliminated rows are configured through
//! [`EliminationConfig`].
//!
//! ## Example
//!
//! ```
//! use dyadic_linalg::{power_of_two_ranks, EliminationConfig, SparseMatrix};
//!
//! let m = SparseMatrix::from_dense(&[
//!     vec![2u32, 4, 0, 0],
//!     vec![0, 2, 0, 6],
//!     vec![1, 0, 3, 0],
//!     vec![0, 0, 0, 8],
//! ]);
//! let profile = power_of_two_ranks(&m, 4, &EliminationConfig::default()).unwrap();
//! assert_eq!(profile.ranks(), &[1, 3, 3, 4]);
//! assert_eq!(profile.invariant_factors::<u32>(), vec![(1, 1), (2, 2), (1, 8)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod density;
pub mod error;
pub mod sparse_matrix;

mod elimination;
mod pivot;
mod rank_tracker;
mod smith_normal_form;

pub use config::{
    ColumnPivoting, DensityPivoting, EliminationConfig, PreferSameColumn, PreserveUpperRows,
    TruncateUpperRows, UpperRowRetention,
};
pub use density::ColumnDensity;
pub use error::MatrixError;
pub use pivot::PivotOutcome;
pub use rank_tracker::{EliminationOutcome, PowerOfTwoElimination};
pub use smith_normal_form::{
    power_of_two_ranks, power_of_two_smith_form, LocalSmithForm, RankProfile,
};
pub use sparse_matrix::{SparseMatrix, SparseRow, SparseRowSource};
