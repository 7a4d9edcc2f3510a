//! # Dyadic
//!
//! Ranks modulo powers of two and the 2-primary Smith normal form of sparse
//! integer matrices.
//!
//! ## Features
//!
//! - **Word-sized residues**: `Z/2^E Z` on `u8`..`u128` with wrapping
//!   arithmetic and Newton-Raphson inverses
//! - **Sparse elimination**: density-driven pivoting that keeps fill-in low
//! - **One pass, every level**: the ranks modulo 2, 4, ..., 2^E come out of
//!   a single elimination by degrading the modulus one bit at a time
//!
//! ## Quick Start
//!
//! ```rust
//! use dyadic::prelude::*;
//!
//! let m = SparseMatrix::from_dense(&[
//!     vec![2u64, 4, 4, 0],
//!     vec![6, 0, 2, 4],
//!     vec![0, 4, 0, 8],
//!     vec![2, 2, 2, 2],
//! ]);
//! let snf = power_of_two_smith_form(&m, 4, &EliminationConfig::default()).unwrap();
//! assert_eq!(snf.factors(), &[(3, 2), (1, 4)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use dyadic_linalg as linalg;
pub use dyadic_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use dyadic_linalg::{
        power_of_two_ranks, power_of_two_smith_form, EliminationConfig, LocalSmithForm,
        MatrixError, RankProfile, SparseMatrix, SparseRowSource,
    };
    pub use dyadic_rings::{ModulusError, Pow2Modulus, Word};
}
