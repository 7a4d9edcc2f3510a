//! Local Smith normal form at the prime 2.
//!
//! The Smith normal form of an integer matrix A is a diagonal matrix D with
//! D = U * A * V for unimodular U, V and d_i | d_{i+1}. Over `Z/2^E Z` only
//! the power-of-two part of each d_i survives, so the form is determined by
//! how many invariant factors have each 2-adic valuation below E.
//!
//! Those counts come out of the elimination as a rank profile: the rank
//! modulo 2^(i+1) is the number of invariant factors of valuation at most i.
//!
//! # Algorithm
//!
//! One sparse elimination pass at the full exponent, degrading the modulus
//! one bit at a time whenever no odd pivot is left; see
//! [`PowerOfTwoElimination`].

use dyadic_rings::Word;

use crate::config::EliminationConfig;
use crate::error::MatrixError;
use crate::rank_tracker::PowerOfTwoElimination;
use crate::sparse_matrix::SparseRowSource;

/// Ranks of a matrix modulo 2, 4, ..., 2^E.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RankProfile {
    /// `ranks[i]` is the rank modulo `2^(i+1)`; non-decreasing.
    ranks: Vec<usize>,
}

impl RankProfile {
    pub(crate) fn new(ranks: Vec<usize>) -> Self {
        debug_assert!(
            ranks.windows(2).all(|w| w[0] <= w[1]),
            "rank profile is not monotone: {ranks:?}"
        );
        Self { ranks }
    }

    /// Returns the ranks modulo 2, 4, ..., 2^E, in that order.
    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Returns the exponent E the profile was computed for.
    #[must_use]
    pub fn exponent(&self) -> usize {
        self.ranks.len()
    }

    /// Returns the rank modulo 2^E.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.ranks.last().copied().unwrap_or(0)
    }

    /// Returns the rank modulo `2^exponent`, or `None` outside `1..=E`.
    #[must_use]
    pub fn rank_modulo(&self, exponent: usize) -> Option<usize> {
        self.ranks.get(exponent.checked_sub(1)?).copied()
    }

    /// Returns `(valuation, multiplicity)` for every valuation below E that
    /// occurs among the invariant factors.
    pub fn multiplicities(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut previous = 0;
        self.ranks
            .iter()
            .enumerate()
            .filter_map(move |(valuation, &rank)| {
                let multiplicity = rank - previous;
                previous = rank;
                (multiplicity > 0).then_some((valuation, multiplicity))
            })
    }

    /// Returns the `(multiplicity, 2^j)` pairs, smallest power first.
    ///
    /// # Panics
    ///
    /// Panics if E exceeds the width of `W`.
    #[must_use]
    pub fn invariant_factors<W: Word>(&self) -> Vec<(usize, W)> {
        self.multiplicities()
            .map(|(valuation, multiplicity)| (multiplicity, power_of_two::<W>(valuation)))
            .collect()
    }

    /// Converts the profile into the local Smith form over `W`.
    ///
    /// # Panics
    ///
    /// Panics if E exceeds the width of `W`.
    #[must_use]
    pub fn smith_form<W: Word>(&self) -> LocalSmithForm<W> {
        LocalSmithForm {
            factors: self.invariant_factors(),
        }
    }
}

fn power_of_two<W: Word>(valuation: usize) -> W {
    let k = u32::try_from(valuation).unwrap_or(u32::MAX);
    W::power_of_two(k)
}

/// Power-of-two invariant factors of a matrix, as `(multiplicity, 2^j)`
/// pairs sorted by increasing power with zero multiplicities omitted.
///
/// Factors of valuation `>= E` vanish modulo 2^E and are not listed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalSmithForm<W> {
    factors: Vec<(usize, W)>,
}

impl<W: Word> LocalSmithForm<W> {
    /// Returns the `(multiplicity, 2^j)` pairs.
    #[must_use]
    pub fn factors(&self) -> &[(usize, W)] {
        &self.factors
    }

    /// Consumes the form, returning its pairs.
    #[must_use]
    pub fn into_factors(self) -> Vec<(usize, W)> {
        self.factors
    }

    /// Returns true if no invariant factor is nonzero modulo 2^E.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Returns the number of listed invariant factors, i.e. the rank
    /// modulo 2^E.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.factors.iter().map(|&(m, _)| m).sum()
    }

    /// Returns how many invariant factors equal `power`.
    #[must_use]
    pub fn multiplicity(&self, power: W) -> usize {
        self.factors
            .iter()
            .find(|&&(_, p)| p == power)
            .map_or(0, |&(m, _)| m)
    }

    /// Returns the listed diagonal, smallest factor first.
    #[must_use]
    pub fn diagonal(&self) -> Vec<W> {
        self.factors
            .iter()
            .flat_map(|&(m, p)| std::iter::repeat(p).take(m))
            .collect()
    }

    /// Returns the 2-adic valuation of the product of the listed factors.
    #[must_use]
    pub fn valuation_sum(&self) -> usize {
        self.factors
            .iter()
            .map(|&(m, p)| m * p.trailing_zeros() as usize)
            .sum()
    }
}

/// Computes the ranks of `matrix` modulo 2, 4, ..., `2^exponent`.
///
/// # Errors
///
/// Fails if `exponent` is outside `1..=W::BITS` or a row of `matrix` is
/// unsorted or out of bounds.
pub fn power_of_two_ranks<W, M>(
    matrix: &M,
    exponent: u32,
    config: &EliminationConfig,
) -> Result<RankProfile, MatrixError>
where
    W: Word,
    M: SparseRowSource<W>,
{
    let elimination = PowerOfTwoElimination::new(matrix, exponent, config.clone())?;
    Ok(elimination.run().profile)
}

/// Computes the power-of-two invariant factors of `matrix` modulo
/// `2^exponent`.
///
/// # Errors
///
/// Same as [`power_of_two_ranks`].
///
/// # Example
///
/// ```
/// use dyadic_linalg::{power_of_two_smith_form, EliminationConfig, SparseMatrix};
///
/// let m = SparseMatrix::from_diagonal(&[1u32, 2, 4]);
/// let snf = power_of_two_smith_form(&m, 3, &EliminationConfig::default()).unwrap();
/// assert_eq!(snf.factors(), &[(1, 1), (1, 2), (1, 4)]);
/// ```
pub fn power_of_two_smith_form<W, M>(
    matrix: &M,
    exponent: u32,
    config: &EliminationConfig,
) -> Result<LocalSmithForm<W>, MatrixError>
where
    W: Word,
    M: SparseRowSource<W>,
{
    Ok(power_of_two_ranks(matrix, exponent, config)?.smith_form())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse_matrix::SparseMatrix;

    #[test]
    fn test_identity_snf() {
        let id = SparseMatrix::<u32>::identity(3);
        let snf = power_of_two_smith_form(&id, 5, &EliminationConfig::default()).unwrap();

        assert_eq!(snf.rank(), 3);
        assert_eq!(snf.factors(), &[(3, 1)]);
        assert_eq!(snf.multiplicity(1), 3);
        assert_eq!(snf.valuation_sum(), 0);
    }

    #[test]
    fn test_zero_matrix_snf() {
        let zero = SparseMatrix::<u64>::new(3, 3);
        let snf = power_of_two_smith_form(&zero, 4, &EliminationConfig::default()).unwrap();

        assert_eq!(snf.rank(), 0);
        assert!(snf.is_empty());
    }

    #[test]
    fn test_simple_snf() {
        // [[2, 0], [0, 4]] is already diagonal and 2 | 4
        let m = SparseMatrix::from_diagonal(&[2u32, 4]);
        let snf = power_of_two_smith_form(&m, 4, &EliminationConfig::default()).unwrap();

        assert_eq!(snf.rank(), 2);
        assert_eq!(snf.diagonal(), vec![2, 4]);
    }

    #[test]
    fn test_snf_keeps_power_of_two_part() {
        // diag(6, 4): invariant factors 2 and 12, whose 2-parts are 2 and 4
        let m = SparseMatrix::from_diagonal(&[6u32, 4]);
        let snf = power_of_two_smith_form(&m, 4, &EliminationConfig::default()).unwrap();

        assert_eq!(snf.factors(), &[(1, 2), (1, 4)]);
        assert_eq!(snf.valuation_sum(), 3);
    }

    #[test]
    fn test_non_diagonal_snf() {
        // [[1, 2], [3, 4]], det = -2
        let m = SparseMatrix::from_dense(&[vec![1u32, 2], vec![3, 4]]);
        let snf = power_of_two_smith_form(&m, 3, &EliminationConfig::default()).unwrap();

        assert_eq!(snf.factors(), &[(1, 1), (1, 2)]);
        assert_eq!(snf.valuation_sum(), 1);
    }

    #[test]
    fn test_factors_beyond_exponent_vanish() {
        // 8 is zero modulo 4
        let m = SparseMatrix::from_diagonal(&[1u32, 8]);
        let profile = power_of_two_ranks(&m, 2, &EliminationConfig::default()).unwrap();

        assert_eq!(profile.ranks(), &[1, 1]);
        assert_eq!(profile.rank(), 1);
        assert_eq!(profile.smith_form::<u32>().factors(), &[(1, 1)]);
    }

    #[test]
    fn test_rank_profile_queries() {
        let profile = RankProfile::new(vec![1, 3, 3, 4]);

        assert_eq!(profile.exponent(), 4);
        assert_eq!(profile.rank(), 4);
        assert_eq!(profile.rank_modulo(0), None);
        assert_eq!(profile.rank_modulo(1), Some(1));
        assert_eq!(profile.rank_modulo(3), Some(3));
        assert_eq!(profile.rank_modulo(5), None);
        assert_eq!(profile.multiplicities().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (3, 1)]);
        assert_eq!(profile.invariant_factors::<u8>(), vec![(1, 1), (2, 2), (1, 8)]);
    }

    #[test]
    fn test_local_smith_form_queries() {
        let snf = RankProfile::new(vec![0, 3, 4, 4]).smith_form::<u16>();

        assert_eq!(snf.factors(), &[(3, 2), (1, 4)]);
        assert_eq!(snf.rank(), 4);
        assert_eq!(snf.multiplicity(2), 3);
        assert_eq!(snf.multiplicity(8), 0);
        assert_eq!(snf.diagonal(), vec![2, 2, 2, 4]);
        assert_eq!(snf.valuation_sum(), 5);
        assert_eq!(snf.into_factors(), vec![(3, 2), (1, 4)]);
    }

    #[test]
    fn test_exponent_out_of_range() {
        let m = SparseMatrix::<u8>::identity(2);
        let result = power_of_two_ranks(&m, 9, &EliminationConfig::default());
        assert!(matches!(result, Err(MatrixError::Modulus(_))));
    }
}
