//! Property-based tests for power-of-two residue arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{inverse_mod_pow2, Pow2Modulus, Word};

    // Strategy for an exponent together with a reduced odd residue
    fn odd_residue_u64() -> impl Strategy<Value = (u32, u64)> {
        (1u32..=64).prop_flat_map(|e| {
            let mask = u64::low_mask(e);
            (Just(e), any::<u64>().prop_map(move |a| (a & mask) | 1))
        })
    }

    fn modulus_u64() -> impl Strategy<Value = Pow2Modulus<u64>> {
        (1u32..=64).prop_map(|e| Pow2Modulus::new(e).unwrap())
    }

    proptest! {
        #[test]
        fn inverse_is_two_sided((e, a) in odd_residue_u64()) {
            let mask = u64::low_mask(e);
            let u = inverse_mod_pow2(a, e);
            prop_assert!(u <= mask);
            prop_assert_eq!(a.wrapping_mul(u) & mask, 1);
            prop_assert_eq!(u.wrapping_mul(a) & mask, 1);
        }

        #[test]
        fn inverse_is_involutive((e, a) in odd_residue_u64()) {
            prop_assert_eq!(inverse_mod_pow2(inverse_mod_pow2(a, e), e), a);
        }

        #[test]
        fn inverse_agrees_on_u32((e, a) in (1u32..=32).prop_flat_map(|e| {
            let mask = u32::low_mask(e);
            (Just(e), any::<u32>().prop_map(move |a| (a & mask) | 1))
        })) {
            let narrow = inverse_mod_pow2(a, e);
            let wide = inverse_mod_pow2(u64::from(a), e);
            prop_assert_eq!(u64::from(narrow), wide);
        }

        #[test]
        fn ring_distributive(m in modulus_u64(), a in any::<u64>(), b in any::<u64>(), c in any::<u64>()) {
            let (a, b, c) = (m.reduce(a), m.reduce(b), m.reduce(c));
            prop_assert_eq!(m.mul(a, m.add(b, c)), m.add(m.mul(a, b), m.mul(a, c)));
        }

        #[test]
        fn ring_additive_inverse(m in modulus_u64(), a in any::<u64>()) {
            let a = m.reduce(a);
            prop_assert_eq!(m.add(a, m.neg(a)), 0);
            prop_assert_eq!(m.sub(0, a), m.neg(a));
        }

        #[test]
        fn mul_add_matches_parts(m in modulus_u64(), a in any::<u64>(), b in any::<u64>(), c in any::<u64>()) {
            let (a, b, c) = (m.reduce(a), m.reduce(b), m.reduce(c));
            prop_assert_eq!(m.mul_add(a, b, c), m.add(a, m.mul(b, c)));
        }

        #[test]
        fn halving_even_residues_commutes_with_reduction(e in 2u32..=64, a in any::<u64>()) {
            // The image of 2x modulo 2^e, halved, is x modulo 2^(e-1)
            let m = Pow2Modulus::<u64>::new(e).unwrap();
            let even = m.reduce(a << 1);
            prop_assert_eq!(even >> 1, m.halved().reduce(a));
        }

        #[test]
        fn valuation_of_units_is_zero((e, a) in odd_residue_u64()) {
            let m = Pow2Modulus::<u64>::new(e).unwrap();
            prop_assert_eq!(m.valuation(a), Some(0));
            prop_assert!(m.is_unit(a));
        }
    }
}
