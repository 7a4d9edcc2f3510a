//! Row elimination against a pivot row.
//!
//! The pivot row has its head in column `column`, which it reached from its
//! original column `origin`. Every target row first takes part in the same
//! column swap (`origin <-> column`), then, if it has a nonzero in the pivot
//! column, has a multiple of the pivot row added to cancel it.

use dyadic_rings::{Pow2Modulus, Word};

use crate::density::ColumnDensity;
use crate::sparse_matrix::SparseRow;

/// Eliminates the pivot column from `target`.
///
/// `target` must only hold columns `>= column`, which every active row does
/// once the pivots left of `column` have been eliminated.
///
/// # Panics
///
/// Panics if the pivot head is even; pivot selection only yields odd heads.
pub(crate) fn eliminate_row<W: Word>(
    modulus: &Pow2Modulus<W>,
    target: &mut SparseRow<W>,
    pivot: &SparseRow<W>,
    column: usize,
    origin: usize,
    density: &mut ColumnDensity,
) {
    if target.is_empty() {
        return;
    }

    match target.position(origin) {
        Ok(at_origin) => {
            if origin != column {
                swap_into_pivot_column(target, at_origin, column, origin, density);
            }
            combine(modulus, target, pivot, column, density);
        }
        Err(after_origin) => {
            if origin != column {
                move_out_of_pivot_column(target, after_origin, column, origin, density);
            }
        }
    }
}

/// Column swap for a target holding a nonzero at `origin`.
fn swap_into_pivot_column<W: Word>(
    target: &mut SparseRow<W>,
    at_origin: usize,
    column: usize,
    origin: usize,
    density: &mut ColumnDensity,
) {
    let entries = target.entries_mut();
    if entries[0].0 == column {
        // nonzero <-> nonzero
        let head_value = entries[0].1;
        entries[0].1 = entries[at_origin].1;
        entries[at_origin].1 = head_value;
    } else {
        // zero <-> nonzero
        entries[..=at_origin].rotate_right(1);
        entries[0].0 = column;
        density.decrement(origin);
        density.increment(column);
    }
}

/// Column swap for a target with no entry at `origin`: a nonzero in the
/// pivot column, if any, moves to `origin`.
fn move_out_of_pivot_column<W: Word>(
    target: &mut SparseRow<W>,
    after_origin: usize,
    column: usize,
    origin: usize,
    density: &mut ColumnDensity,
) {
    let Ok(at_column) = target.position(column) else {
        // zero <-> zero
        return;
    };
    // nonzero <-> zero; `column < origin`, so the entry slides right past
    // every entry lying strictly between the two columns.
    let entries = target.entries_mut();
    entries[at_column..after_origin].rotate_left(1);
    entries[after_origin - 1].0 = origin;
    density.decrement(column);
    density.increment(origin);
}

/// Adds the multiple of `pivot` that cancels the head of `target`.
///
/// Both rows have their head in `column`. The merge writes into a fresh
/// vector that then replaces the target's storage.
fn combine<W: Word>(
    modulus: &Pow2Modulus<W>,
    target: &mut SparseRow<W>,
    pivot: &SparseRow<W>,
    column: usize,
    density: &mut ColumnDensity,
) {
    let entries = target.entries_mut();
    let (head_column, head_value) = entries[0];
    debug_assert_eq!(head_column, column, "target head is not in the pivot column");

    let pivot_entries = pivot.as_slice();
    let pivot_head = pivot_entries[0].1;
    let factor = modulus.mul(modulus.neg(head_value), modulus.inverse(pivot_head));
    density.decrement(column);

    let mut merged = Vec::with_capacity(entries.len() + pivot_entries.len());
    let mut rest = entries[1..].iter().copied().peekable();

    for &(j, pivot_value) in pivot_entries.iter().skip_while(|&&(j, _)| j <= column) {
        while let Some(entry) = rest.next_if(|&(c, _)| c < j) {
            merged.push(entry);
        }
        if let Some((_, value)) = rest.next_if(|&(c, _)| c == j) {
            let sum = modulus.mul_add(value, factor, pivot_value);
            if sum.is_zero() {
                density.decrement(j);
            } else {
                merged.push((j, sum));
            }
        } else {
            let fill = modulus.mul(factor, pivot_value);
            if !fill.is_zero() {
                density.increment(j);
                merged.push((j, fill));
            }
        }
    }
    merged.extend(rest);

    *target = SparseRow::from_sorted(merged);
}
