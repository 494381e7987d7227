//! Rank type and utilities for binomial tree bookkeeping.
//!
//! A binomial tree of rank `r` holds exactly `2^r` items and its root has one
//! child of each rank `0..r`. The maximum rank in a heap of `n` items is
//! `⌊log₂ n⌋`, so a `u8` is far more than enough and keeps nodes compact.

/// Type alias for binomial tree rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`, which would require more than 2²⁵⁵ items.
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: this should be impossible since max rank is log₂(n) \
         and u8::MAX (255) supports heaps with up to 2²⁵⁵ elements",
    )
}

/// Number of items in a binomial tree of the given rank (`2^rank`).
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::rank::subtree_size;
///
/// assert_eq!(subtree_size(0), 1);
/// assert_eq!(subtree_size(3), 8);
/// ```
#[inline]
pub fn subtree_size(rank: Rank) -> usize {
    1usize
        .checked_shl(u32::from(rank))
        .expect("rank exceeds the addressable number of items")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(127), 128);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(MAX_RANK);
    }

    #[test]
    fn test_subtree_size_is_power_of_two() {
        for rank in 0..20u8 {
            let size = subtree_size(rank);
            assert!(size.is_power_of_two());
            assert_eq!(size.trailing_zeros(), u32::from(rank));
        }
    }

    #[test]
    #[should_panic(expected = "addressable")]
    fn test_subtree_size_overflow() {
        subtree_size(200);
    }
}
