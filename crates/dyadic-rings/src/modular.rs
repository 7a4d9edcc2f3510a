//! Modular arithmetic modulo powers of two.
//!
//! Residues live in a fixed-width [`Word`] and every operation wraps at the
//! word width and then masks to the low `e` bits. Units modulo `2^e` are
//! exactly the odd residues; their inverses are computed by Newton-Raphson
//! lifting rather than the extended Euclidean algorithm.
//!
//! # References
//!
//! - J-G. Dumas, "On Newton-Raphson iteration for multiplicative inverses
//!   modulo prime powers", IEEE Transactions on Computers (2013)

use std::fmt;

use crate::error::ModulusError;
use crate::traits::Word;

/// Computes the inverse of an odd residue modulo `2^exponent`.
///
/// Starting from `u = 2 - a`, which is correct to two bits, each step
/// squares `x = a - 1` and multiplies `u` by `x + 1`, doubling the number of
/// correct low bits. The loop therefore runs `O(log exponent)` times.
///
/// # Panics
///
/// Panics if `exponent` is outside `1..=W::BITS`, if `a` is not reduced
/// modulo `2^exponent`, or if `a` is even. Each of these means the caller
/// picked a pivot that is not a unit.
#[must_use]
pub fn inverse_mod_pow2<W: Word>(a: W, exponent: u32) -> W {
    let mask = W::low_mask(exponent);
    assert!(a <= mask, "residue {a} is not reduced modulo 2^{exponent}");
    assert!(a.is_odd(), "residue {a} is not a unit modulo 2^{exponent}");

    if a == W::one() {
        return W::one();
    }

    let two = W::one() + W::one();
    let mut inverse = two.wrapping_sub(&a) & mask;
    // (a - 1)^(2^i) stays even, so adding one never overflows.
    let mut defect = a - W::one();
    let mut correct_bits = 2;
    while correct_bits < exponent {
        defect = defect.wrapping_mul(&defect) & mask;
        inverse = inverse.wrapping_mul(&(defect + W::one())) & mask;
        correct_bits <<= 1;
    }

    debug_assert!(
        a.wrapping_mul(&inverse) & mask == W::one(),
        "inverse of {a} modulo 2^{exponent} is wrong: {inverse}"
    );
    inverse
}

/// The ring `Z/2^e Z` represented on a word type `W`.
///
/// The modulus only carries the exponent and its mask; residues are plain
/// words, always kept reduced (`value <= mask`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pow2Modulus<W> {
    exponent: u32,
    mask: W,
}

impl<W: Word> Pow2Modulus<W> {
    /// Creates the modulus `2^exponent`.
    ///
    /// # Errors
    ///
    /// Returns [`ModulusError::ExponentOutOfRange`] unless
    /// `1 <= exponent <= W::BITS`.
    pub fn new(exponent: u32) -> Result<Self, ModulusError> {
        if exponent == 0 || exponent > W::BITS {
            return Err(ModulusError::ExponentOutOfRange {
                exponent,
                bits: W::BITS,
            });
        }
        Ok(Self {
            exponent,
            mask: W::low_mask(exponent),
        })
    }

    /// Returns the exponent `e`.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Returns `2^e - 1`.
    #[must_use]
    pub fn mask(&self) -> W {
        self.mask
    }

    /// Reduces an arbitrary word.
    #[must_use]
    pub fn reduce(&self, value: W) -> W {
        value & self.mask
    }

    /// Computes `a + b`.
    #[must_use]
    pub fn add(&self, a: W, b: W) -> W {
        a.wrapping_add(&b) & self.mask
    }

    /// Computes `a - b`.
    #[must_use]
    pub fn sub(&self, a: W, b: W) -> W {
        a.wrapping_sub(&b) & self.mask
    }

    /// Computes `a * b`.
    #[must_use]
    pub fn mul(&self, a: W, b: W) -> W {
        a.wrapping_mul(&b) & self.mask
    }

    /// Computes `a + b * c`.
    #[must_use]
    pub fn mul_add(&self, a: W, b: W, c: W) -> W {
        a.wrapping_add(&b.wrapping_mul(&c)) & self.mask
    }

    /// Computes `2^e - a`, i.e. `-a`.
    #[must_use]
    pub fn neg(&self, a: W) -> W {
        a.wrapping_neg() & self.mask
    }

    /// Returns true if `a` is invertible, i.e. odd.
    #[must_use]
    pub fn is_unit(&self, a: W) -> bool {
        a.is_odd()
    }

    /// Computes the inverse of a unit.
    ///
    /// # Panics
    ///
    /// Panics if `a` is even or not reduced.
    #[must_use]
    pub fn inverse(&self, a: W) -> W {
        inverse_mod_pow2(a, self.exponent)
    }

    /// Computes the inverse, or `None` if `a` is not a unit.
    #[must_use]
    pub fn checked_inverse(&self, a: W) -> Option<W> {
        let a = self.reduce(a);
        a.is_odd().then(|| inverse_mod_pow2(a, self.exponent))
    }

    /// Returns the 2-adic valuation of a residue, or `None` for zero.
    #[must_use]
    pub fn valuation(&self, a: W) -> Option<u32> {
        let a = self.reduce(a);
        (!a.is_zero()).then(|| a.trailing_zeros())
    }

    /// Returns the modulus `2^(e-1)`.
    ///
    /// Halving a residue that is even modulo `2^e` yields its exact image
    /// modulo `2^(e-1)`.
    ///
    /// # Panics
    ///
    /// Panics if the exponent is already 1.
    #[must_use]
    pub fn halved(&self) -> Self {
        assert!(self.exponent > 1, "cannot degrade below modulus 2^1");
        Self {
            exponent: self.exponent - 1,
            mask: self.mask >> 1,
        }
    }
}

impl<W: Word> fmt::Debug for Pow2Modulus<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pow2Modulus(2^{}, mask = {})", self.exponent, self.mask)
    }
}

impl<W: Word> fmt::Display for Pow2Modulus<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2^{}", self.exponent)
    }
}
