//! Binomial Heap implementation
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(1) amortized, O(log n) worst-case insert
//! - O(log n) delete_min and decrease_key
//! - O(log n) meld
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and its root has children of ranks k-1, ..., 0
//!
//! The roots form a circular ring ordered by strictly increasing rank, walked
//! from `last.next` (lowest rank) around to `last` (highest rank). At most one
//! tree of each rank exists, so the tree count is the number of set bits in
//! the item count.
//!
//! **Key Operations**:
//! - **Insert**: splice a B₀ next to `last`; if a second B₀ now exists, carry
//! - **Meld**: merge both root rings by rank (like merging sorted lists), then
//!   run one carry-propagation pass, exactly like binary addition
//! - **Delete-min**: splice out the minimum root and meld its children back
//! - **Decrease-key**: sift the item upward by exchanging it with its parent's
//!   item. Nodes never move, so the tree shape is unchanged
//! - **Delete**: decrease the item below every other key, then delete-min

use crate::item::{BinomialHandle, Item, RawKey};
use crate::node::{Forest, NodeKey};
use crate::rank::subtree_size;
use crate::traits::{Heap, HeapError};
use crate::Key;
use std::fmt;
use std::mem;
use std::rc::Rc;

/// Header of a root ring living in some [`Forest`].
///
/// A heap owns exactly one of these. `delete_min` also builds a temporary one
/// over the removed root's children before melding it back.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Roots {
    /// Highest-rank root; `last.next` is the lowest-rank root
    pub(crate) last: Option<NodeKey>,
    /// Root holding the minimum key
    pub(crate) min: Option<NodeKey>,
    /// Number of items
    pub(crate) len: usize,
    /// Number of trees in the ring
    pub(crate) num_trees: usize,
}

impl Roots {
    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Binomial Heap
///
/// Keys are non-negative integers; payloads default to `String`.
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::BinomialHeap;
///
/// let mut heap: BinomialHeap<&str> = BinomialHeap::new();
/// for (key, name) in [(5, "e"), (3, "c"), (8, "h"), (1, "a")] {
///     heap.insert(key, name);
/// }
/// assert_eq!(heap.peek(), Some((1, &"a")));
/// assert_eq!(heap.num_trees(), 1);
/// ```
pub struct BinomialHeap<T = String> {
    pub(crate) forest: Forest<T>,
    pub(crate) roots: Roots,
}

impl<T> Default for BinomialHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinomialHeap<T> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        BinomialHeap {
            forest: Forest::default(),
            roots: Roots::default(),
        }
    }

    /// Creates an empty heap whose node arena can hold `capacity` items
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        BinomialHeap {
            forest: Forest::with_capacity(capacity),
            roots: Roots::default(),
        }
    }

    /// Returns the number of items in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len
    }

    /// Returns true if the heap holds no items
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the number of binomial trees in the root ring.
    ///
    /// Always equals the number of set bits in [`len`](Self::len).
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.roots.num_trees
    }

    /// Inserts `(key, payload)` and returns a handle to the new entry
    ///
    /// **Time Complexity**: O(1) amortized, O(log n) worst-case
    ///
    /// The new rank-0 tree is spliced in right after `last`, which makes it
    /// the lowest-rank root. If the heap already had a rank-0 tree (the old
    /// size was odd), carry propagation starts from the new node.
    pub fn insert(&mut self, key: Key, payload: T) -> BinomialHandle<T> {
        let node = self.forest.insert(key, payload);
        let handle = BinomialHandle::new(&self.forest.node(node).item);

        self.roots.len += 1;
        self.roots.num_trees += 1;

        match (self.roots.last, self.roots.min) {
            (Some(last), Some(min)) => {
                if self.forest.key(node) < self.forest.key(min) {
                    self.roots.min = Some(node);
                }
                self.forest.add_next(last, node);
                if self.roots.len % 2 == 0 {
                    self.unify(node);
                }
            }
            _ => {
                self.roots.last = Some(node);
                self.roots.min = Some(node);
            }
        }
        handle
    }

    /// Returns a handle to the entry with the minimum key, or `None` if the
    /// heap is empty
    ///
    /// **Time Complexity**: O(1)
    pub fn find_min(&self) -> Option<BinomialHandle<T>> {
        self.roots
            .min
            .map(|min| BinomialHandle::new(&self.forest.node(min).item))
    }

    /// Returns the minimum key and its payload without removing them
    ///
    /// **Time Complexity**: O(1)
    pub fn peek(&self) -> Option<(Key, &T)> {
        self.roots.min.map(|min| {
            let item = &self.forest.node(min).item;
            (item.key(), item.payload())
        })
    }

    /// Removes and returns the entry with the minimum key
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. If the minimum is the only root, the ring becomes empty
    /// 2. Otherwise scan the rest of the ring once: this both selects the new
    ///    minimum and finds the root preceding the old one
    /// 3. Splice the old minimum out of the ring
    /// 4. Its children already form a valid root ring (ranks ascending from
    ///    `child.next` to `child`); wrap them in a fresh ring header and meld
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    pub fn delete_min(&mut self) -> Result<(Key, T), HeapError> {
        let (raw_key, payload) = self.remove_min()?;
        Ok((raw_key as Key, payload))
    }

    /// Decreases the key of the entry behind `handle` by `diff`
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// The item is sifted upward by exchanging it with its parent's item
    /// while its key is less than or equal to the parent's. Nodes do not
    /// move, only items do, so `handle` keeps denoting the same entry.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the entry was removed or belongs to
    ///   another heap
    /// - [`HeapError::InvalidDiff`] if `diff` is zero or exceeds the current
    ///   key. The heap is not modified.
    pub fn decrease_key(
        &mut self,
        handle: &BinomialHandle<T>,
        diff: Key,
    ) -> Result<(), HeapError> {
        let item = self.resolve(handle)?;
        let key = item.key();
        if diff == 0 || diff > key {
            return Err(HeapError::InvalidDiff { key, diff });
        }
        self.decrease_unchecked(&item, RawKey::from(diff));
        Ok(())
    }

    /// Removes the entry behind `handle`, returning its key and payload
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// The entry's key is decreased by `key + 1`, putting it strictly below
    /// every other (non-negative) key, and then the minimum is deleted.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the entry was removed or
    /// belongs to another heap.
    pub fn delete(&mut self, handle: &BinomialHandle<T>) -> Result<(Key, T), HeapError> {
        let item = self.resolve(handle)?;
        let key = item.key();
        self.decrease_unchecked(&item, RawKey::from(key) + 1);
        drop(item);

        let (raw_key, payload) = self.remove_min()?;
        debug_assert_eq!(raw_key, -1, "delete removed the wrong item");
        Ok((key, payload))
    }

    /// Melds `other` into this heap, leaving `other` empty
    ///
    /// **Time Complexity**: O(log n₁ + log n₂) for merging and linking, plus
    /// moving the smaller heap's nodes into the larger heap's arena
    ///
    /// **Algorithm**:
    /// 1. If either heap is empty, the result is simply the other one
    /// 2. Merge both root rings by rank, mergesort-style. The result may hold
    ///    two consecutive roots of the same rank
    /// 3. Run carry propagation once over the merged ring
    ///
    /// Handles issued by either heap remain valid in the result.
    pub fn meld(&mut self, other: &mut BinomialHeap<T>) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            mem::swap(self, other);
            return;
        }
        if other.forest.len() > self.forest.len() {
            mem::swap(self, other);
        }

        let incoming = mem::take(other);
        log::debug!(
            "melding heap of {} items into heap of {} items",
            incoming.len(),
            self.len()
        );
        let remap = self.forest.absorb(incoming.forest);
        let roots = Roots {
            last: incoming.roots.last.map(|node| remap[&node]),
            min: incoming.roots.min.map(|node| remap[&node]),
            ..incoming.roots
        };
        self.meld_roots(roots);
    }

    /// Returns true if `handle` refers to an entry stored in this heap
    pub fn contains(&self, handle: &BinomialHandle<T>) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the current key of the entry behind `handle`
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the entry is not in this heap.
    pub fn key_of(&self, handle: &BinomialHandle<T>) -> Result<Key, HeapError> {
        self.resolve(handle).map(|item| item.key())
    }

    /// Returns the payload of the entry behind `handle`
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the entry is not in this heap.
    pub fn payload_of(&self, handle: &BinomialHandle<T>) -> Result<&T, HeapError> {
        let node = self.resolve(handle)?.node();
        Ok(self.forest.node(node).item.payload())
    }

    /// Upgrades a handle and checks that its item is stored in this heap's
    /// arena.
    fn resolve(&self, handle: &BinomialHandle<T>) -> Result<Rc<Item<T>>, HeapError> {
        let item = handle.upgrade().ok_or(HeapError::InvalidHandle)?;
        let owned = self
            .forest
            .get(item.node())
            .is_some_and(|node| Rc::ptr_eq(&node.item, &item));
        if owned {
            Ok(item)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Lowers the item's key by `diff` without validation and restores heap
    /// order. `diff` may push the key below zero.
    fn decrease_unchecked(&mut self, item: &Rc<Item<T>>, diff: RawKey) {
        item.decrease(diff);
        self.sift_up(item.node());

        if let Some(min) = self.roots.min {
            if item.raw_key() < self.forest.key(min) {
                self.roots.min = Some(item.node());
            }
        }
    }

    /// Exchanges items between `node` and its ancestors while the node's key
    /// is less than or equal to its parent's.
    fn sift_up(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.forest.parent(node) {
            if self.forest.key(node) > self.forest.key(parent) {
                break;
            }
            self.forest.swap_items(node, parent);
            node = parent;
        }
    }

    fn remove_min(&mut self) -> Result<(RawKey, T), HeapError> {
        let min = self.roots.min.ok_or(HeapError::EmptyHeap)?;

        if self.forest.next(min) == min {
            self.roots.last = None;
            self.roots.min = None;
        } else {
            let prev = self.select_new_min(min);
            if self.roots.last == Some(min) {
                self.roots.last = Some(prev);
            }
        }

        let children = self.forest.take_children(min);
        self.detach_root(min, true);

        let node = self
            .forest
            .remove(min)
            .expect("minimum root must be stored in the arena");
        let item = Rc::try_unwrap(node.item)
            .ok()
            .expect("removed item should have no other strong references");

        if let Some(children) = children {
            let orphans = self.orphan_roots(children);
            self.meld_roots(orphans);
        }
        Ok(item.into_parts())
    }

    /// Points `min` at the smallest root other than `old_min` and returns the
    /// root preceding `old_min` in the ring.
    fn select_new_min(&mut self, old_min: NodeKey) -> NodeKey {
        let mut cur = self.forest.next(old_min);
        let mut best = cur;
        while self.forest.next(cur) != old_min {
            cur = self.forest.next(cur);
            if self.forest.key(cur) < self.forest.key(best) {
                best = cur;
            }
        }
        self.roots.min = Some(best);
        cur
    }

    /// Removes a root tree from the ring. A permanent removal also drops its
    /// `2^rank` items from the count.
    fn detach_root(&mut self, node: NodeKey, permanent: bool) {
        debug_assert!(self.forest.parent(node).is_none());
        log::trace!(
            "detaching rank {} root (permanent: {})",
            self.forest.rank(node),
            permanent
        );
        self.forest.unlink(node);
        self.roots.num_trees -= 1;
        if permanent {
            self.roots.len -= subtree_size(self.forest.rank(node));
        }
    }

    /// Builds a ring header over an orphaned child ring, given its
    /// highest-rank member.
    ///
    /// Strips parent pointers and recomputes `min`, `len` and `num_trees` in
    /// one pass. The ring must already be a valid binomial root ring.
    fn orphan_roots(&mut self, last: NodeKey) -> Roots {
        let mut roots = Roots {
            last: Some(last),
            min: Some(last),
            len: 0,
            num_trees: 0,
        };
        let mut min = last;
        let mut node = last;
        loop {
            roots.num_trees += 1;
            roots.len += subtree_size(self.forest.rank(node));
            if self.forest.key(node) < self.forest.key(min) {
                min = node;
            }
            self.forest.make_root(node);
            node = self.forest.next(node);
            if node == last {
                break;
            }
        }
        roots.min = Some(min);
        roots
    }

    /// Melds a root ring living in this heap's arena into this heap.
    fn meld_roots(&mut self, other: Roots) {
        if other.is_empty() {
            return;
        }
        if self.roots.is_empty() {
            self.roots = other;
            return;
        }
        let first = self.merge_rings(other);
        self.unify(first);
    }

    /// Merges the other ring into ours by rank, mergesort-style.
    ///
    /// On equal ranks our root goes first. Afterwards the ring is ordered by
    /// non-decreasing rank with at most two roots per rank, and `last` is its
    /// final root. Returns the first root of the merged ring.
    fn merge_rings(&mut self, other: Roots) -> NodeKey {
        let (Some(a_last), Some(b_last)) = (self.roots.last, other.last) else {
            unreachable!("merge_rings requires two non-empty rings");
        };

        self.roots.len += other.len;
        self.roots.num_trees += other.num_trees;
        if let (Some(ours), Some(theirs)) = (self.roots.min, other.min) {
            if self.forest.key(theirs) < self.forest.key(ours) {
                self.roots.min = Some(theirs);
            }
        }

        let mut a = Some(self.forest.next(a_last));
        let mut b = Some(self.forest.next(b_last));
        let mut head: Option<NodeKey> = None;
        let mut tail: Option<NodeKey> = None;

        loop {
            let take = match (a, b) {
                (Some(x), Some(y)) => {
                    if self.forest.rank(x) <= self.forest.rank(y) {
                        a = (x != a_last).then(|| self.forest.next(x));
                        x
                    } else {
                        b = (y != b_last).then(|| self.forest.next(y));
                        y
                    }
                }
                (Some(rest), None) | (None, Some(rest)) => {
                    // The remainder is still chained up to its ring's last root.
                    let rest_last = if a.is_some() { a_last } else { b_last };
                    if let Some(t) = tail {
                        self.forest.set_next(t, rest);
                    } else {
                        head = Some(rest);
                    }
                    tail = Some(rest_last);
                    break;
                }
                (None, None) => break,
            };
            match tail {
                Some(t) => self.forest.set_next(t, take),
                None => head = Some(take),
            }
            tail = Some(take);
        }

        let (Some(head), Some(tail)) = (head, tail) else {
            unreachable!("merged ring cannot be empty");
        };
        self.forest.set_next(tail, head);
        self.roots.last = Some(tail);
        head
    }

    /// Carry propagation over the root ring, starting at `first`.
    ///
    /// Whenever two adjacent roots share a rank they are linked into one tree
    /// of the next rank, which takes their place in the ring. If three
    /// adjacent roots share a rank, the first is left in place and the other
    /// two are linked. The pass ends at `last`.
    fn unify(&mut self, first: NodeKey) {
        let Some(mut prev) = self.roots.last else {
            return;
        };
        let mut cur = first;

        loop {
            let mut next = self.forest.next(cur);
            if next == cur {
                break;
            }

            if self.forest.rank(cur) == self.forest.rank(next) {
                let after = self.forest.next(next);
                if after != cur && self.forest.rank(after) == self.forest.rank(cur) {
                    prev = cur;
                    cur = next;
                    next = after;
                }

                let after = self.forest.next(next);
                let was_last = self.roots.last == Some(cur) || self.roots.last == Some(next);
                let was_min = self.roots.min == Some(cur) || self.roots.min == Some(next);

                let winner = self.forest.link(cur, next);
                if after == cur {
                    self.forest.set_next(winner, winner);
                } else {
                    self.forest.set_next(prev, winner);
                    self.forest.set_next(winner, after);
                }
                self.roots.num_trees -= 1;

                if was_last {
                    self.roots.last = Some(winner);
                }
                if was_min {
                    self.roots.min = Some(winner);
                }
                cur = winner;
            } else {
                prev = cur;
                cur = next;
            }

            if self.roots.last == Some(cur) {
                break;
            }
        }
    }
}

impl<T> Heap<T> for BinomialHeap<T> {
    fn new() -> Self {
        BinomialHeap::new()
    }

    fn is_empty(&self) -> bool {
        BinomialHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinomialHeap::len(self)
    }

    fn push(&mut self, key: Key, item: T) {
        self.insert(key, item);
    }

    fn peek(&self) -> Option<(Key, &T)> {
        BinomialHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(Key, T)> {
        self.delete_min().ok()
    }

    fn merge(&mut self, mut other: Self) {
        self.meld(&mut other);
    }
}

impl<T> fmt::Debug for BinomialHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len())
            .field("num_trees", &self.num_trees())
            .field("min", &self.peek().map(|(key, _)| key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_ranks<T>(heap: &BinomialHeap<T>) -> Vec<u8> {
        let Some(last) = heap.roots.last else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut node = heap.forest.next(last);
        loop {
            out.push(heap.forest.rank(node));
            if node == last {
                break;
            }
            node = heap.forest.next(node);
        }
        out
    }

    #[test]
    fn test_insert_keeps_ranks_ascending() {
        let mut heap = BinomialHeap::new();
        for key in 0..11u32 {
            heap.insert(key, key);
        }
        // 11 = 0b1011
        assert_eq!(root_ranks(&heap), vec![0, 1, 3]);
        assert_eq!(heap.num_trees(), 3);
    }

    #[test]
    fn test_orphan_roots_recomputes_header() {
        let mut heap = BinomialHeap::new();
        for key in [7u32, 3, 9, 4, 8, 6, 5, 1] {
            heap.insert(key, ());
        }
        let root = heap.roots.last.unwrap();
        assert_eq!(heap.forest.rank(root), 3);

        let children = heap.forest.take_children(root).unwrap();
        let orphans = heap.orphan_roots(children);
        assert_eq!(orphans.len, 7);
        assert_eq!(orphans.num_trees, 3);
        assert_eq!(orphans.last, Some(children));
        assert_eq!(heap.forest.key(orphans.min.unwrap()), 3);
    }

    #[test]
    fn test_merge_rings_interleaves_by_rank() {
        let mut heap = BinomialHeap::new();
        let mut other = BinomialHeap::new();
        for key in 0..5u32 {
            heap.insert(key, key); // ranks 0, 2
        }
        for key in 10..12u32 {
            other.insert(key, key); // rank 1
        }
        heap.meld(&mut other);
        // 7 = 0b111
        assert_eq!(root_ranks(&heap), vec![0, 1, 2]);
        assert!(other.is_empty());
    }

    #[test]
    fn test_unify_handles_triple_carry() {
        let mut heap = BinomialHeap::new();
        let mut other = BinomialHeap::new();
        for key in 0..3u32 {
            heap.insert(key, key); // ranks 0, 1
        }
        for key in 10..13u32 {
            other.insert(key, key); // ranks 0, 1
        }
        heap.meld(&mut other);
        // 6 = 0b110: the carried rank-1 tree meets two rank-1 trees
        assert_eq!(root_ranks(&heap), vec![1, 2]);
        assert_eq!(heap.peek(), Some((0, &0)));
    }
}
