//! Error type and the std-like heap trait
//!
//! [`BinomialHeap`](crate::BinomialHeap) exposes its full surface through
//! inherent methods (`insert`, `find_min`, `delete_min`, `decrease_key`,
//! `delete`, `meld`). The [`Heap`] trait adds the familiar
//! `push`/`peek`/`pop` shape used by `std::collections::BinaryHeap`, so
//! generic code can drive the heap without knowing about handles.

use crate::Key;
use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `decrease_key` was called with a zero diff, or a diff larger than the
    /// item's current key
    InvalidDiff {
        /// Current key of the item
        key: Key,
        /// Requested decrease
        diff: Key,
    },
    /// The handle is no longer valid (element was removed), or it belongs to
    /// a different heap
    InvalidHandle,
    /// The operation needs at least one element
    EmptyHeap,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidDiff { key, diff } => {
                write!(f, "cannot decrease key {key} by {diff}: diff must be in 1..={key}")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::EmptyHeap => write!(f, "operation requires a non-empty heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (key, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::{BinomialHeap, Heap};
///
/// let mut heap: BinomialHeap<&str> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T>: Sized {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given key
    fn push(&mut self, key: Key, item: T);

    /// Returns the minimum key and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while this is a min-heap.
    fn peek(&self) -> Option<(Key, &T)>;

    /// Removes and returns the minimum key and associated item
    fn pop(&mut self) -> Option<(Key, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}
