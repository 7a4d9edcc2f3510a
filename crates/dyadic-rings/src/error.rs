//! Errors raised when building a modulus.

use thiserror::Error;

/// Errors that can occur when constructing a power-of-two modulus.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModulusError {
    /// The exponent does not fit the chosen word.
    #[error("exponent {exponent} is outside 1..={bits} for a {bits}-bit word")]
    ExponentOutOfRange {
        /// Requested exponent.
        exponent: u32,
        /// Width of the word type.
        bits: u32,
    },
}
