//! Machine word traits.
//!
//! Residues modulo `2^e` are stored in plain fixed-width unsigned integers.
//! The [`Word`] trait collects the operations the elimination needs so the
//! same code runs on `u8` through `u128`.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{PrimInt, Unsigned, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};

/// A fixed-width unsigned machine word holding residues modulo `2^e`.
///
/// # Laws
///
/// - Wrapping operations are exact modulo `2^BITS`
/// - Because `2^e` divides `2^BITS` for every `e <= BITS`, masking a wrapped
///   result to the low `e` bits yields the exact residue modulo `2^e`
pub trait Word:
    PrimInt
    + Unsigned
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + Hash
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// Width of the word in bits.
    const BITS: u32;

    /// Returns true if the lowest bit is set.
    #[must_use]
    fn is_odd(self) -> bool {
        self & Self::one() == Self::one()
    }

    /// Returns `2^k` as a word.
    ///
    /// # Panics
    ///
    /// Panics if `k >= Self::BITS`.
    #[must_use]
    fn power_of_two(k: u32) -> Self {
        assert!(k < Self::BITS, "2^{k} does not fit in a {}-bit word", Self::BITS);
        Self::one() << k as usize
    }

    /// Returns a word with the low `bits` bits set.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is zero or wider than the word.
    #[must_use]
    fn low_mask(bits: u32) -> Self {
        assert!(
            (1..=Self::BITS).contains(&bits),
            "mask width {bits} outside 1..={}",
            Self::BITS
        );
        Self::max_value() >> (Self::BITS - bits) as usize
    }
}

macro_rules! impl_word {
    ($($t:ty),* $(,)?) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, u128, usize);
