//! Order-statistic selection on one unit slice
//!
//! Each quantile unit owns a slice holding one value per realization. The
//! slice is partially reordered in place; its multiset of values is unchanged,
//! so the same slice can serve any number of later selections.

use crate::rank::QuantileRank;

#[inline]
fn select(slice: &mut [f64], k: usize) {
    slice.select_nth_unstable_by(k, f64::total_cmp);
}

/// Empirical quantile of `slice` at `rank`
///
/// `rank.index` must be a valid position of `slice`, and so must
/// `rank.index + 1` whenever `rank.beta` is non-zero. Both hold for ranks
/// built by [`QuantileRank::new`] with `size == slice.len()`.
pub fn select_quantile(slice: &mut [f64], rank: QuantileRank) -> f64 {
    let size = slice.len();
    let index = rank.index;
    if rank.is_exact() {
        // No read at index + 1, which does not exist for the maximum
        select(slice, index);
        return slice[index];
    }

    if 2 * index > size {
        // Upper half: place rank `index`, then the minimum of the tail above it
        select(slice, index);
        select(&mut slice[index..], 1);
    } else {
        // Lower half: place rank `index + 1`, then the maximum of the head below it
        select(slice, index + 1);
        select(&mut slice[..index + 1], index);
    }
    rank.alpha() * slice[index] + rank.beta * slice[index + 1]
}
