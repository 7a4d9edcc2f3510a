//! # dyadic-rings
//!
//! Residue arithmetic modulo powers of two for the dyadic elimination engine.
//!
//! This crate provides:
//! - The [`Word`] trait over fixed-width unsigned integers (`u8`..`u128`)
//! - [`Pow2Modulus`], the ring `Z/2^e Z` on a word, with an exponent that
//!   can be degraded one bit at a time
//! - Newton-Raphson inversion of odd residues ([`inverse_mod_pow2`])
//!
//! ## Representation
//!
//! Residues are bare words kept reduced below `2^e`. Operations wrap at the
//! word width and mask afterwards, so any exponent up to the word width is
//! supported without a wider intermediate type.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod modular;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::ModulusError;
pub use modular::{inverse_mod_pow2, Pow2Modulus};
pub use traits::Word;
