//! Mergeable Binomial Heap for Rust
//!
//! This crate provides a binomial heap over non-negative integer keys: a forest
//! of binomial trees that supports efficient union (meld) of two heaps, not just
//! single-element insertion.
//!
//! # Complexity
//!
//! | Operation      | Complexity                         |
//! |----------------|------------------------------------|
//! | `insert`       | O(1) amortized, O(log n) worst     |
//! | `find_min`     | O(1)                               |
//! | `delete_min`   | O(log n)                           |
//! | `decrease_key` | O(log n)                           |
//! | `delete`       | O(log n)                           |
//! | `meld`         | O(log n₁ + log n₂) linking         |
//!
//! # Example
//!
//! ```rust
//! use rust_binomial_heap::BinomialHeap;
//!
//! let mut heap = BinomialHeap::new();
//! let ten = heap.insert(10, "ten".to_string());
//! heap.insert(4, "four".to_string());
//!
//! heap.decrease_key(&ten, 8).unwrap();
//! assert_eq!(heap.peek(), Some((2, &"ten".to_string())));
//! assert_eq!(heap.delete_min().unwrap(), (2, "ten".to_string()));
//! assert_eq!(heap.len(), 1);
//! ```

pub mod binomial;
mod diagnostics;
pub mod item;
mod node;
pub mod rank;
pub mod traits;

pub use binomial::BinomialHeap;
pub use item::BinomialHandle;
pub use traits::{Heap, HeapError};

/// Key type accepted by the heap.
///
/// Keys are non-negative by construction. Internally they are widened to a
/// signed integer so `delete` can push an item below every live key.
pub type Key = u32;
