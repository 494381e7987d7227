//! Item handle layer
//!
//! An [`Item`] is the logical `(key, payload)` entry; a node in the arena is
//! only the physical slot that currently stores it. `decrease_key` restores
//! heap order by exchanging items between a node and its parent, so the node
//! an item lives in changes while the item itself, and every
//! [`BinomialHandle`] pointing at it, stays the same.
//!
//! Items are reference counted: the node holding an item owns the only strong
//! reference, and handles hold weak references. Removing a node from the heap
//! drops the item and every outstanding handle becomes stale.

use crate::node::NodeKey;
use crate::Key;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Key as stored inside the heap.
///
/// Signed so `delete` can drive an item below every non-negative key.
pub(crate) type RawKey = i64;

/// Internal item: the caller-visible entry and its back-reference to the node
/// currently holding it.
pub(crate) struct Item<T> {
    key: Cell<RawKey>,
    payload: T,
    /// Node currently storing this item. Kept in sync with `Node::item` by
    /// `Forest::swap_items` and `Forest::absorb`.
    node: Cell<NodeKey>,
}

impl<T> Item<T> {
    pub(crate) fn new(key: Key, payload: T, node: NodeKey) -> Self {
        Item {
            key: Cell::new(RawKey::from(key)),
            payload,
            node: Cell::new(node),
        }
    }

    #[inline]
    pub(crate) fn raw_key(&self) -> RawKey {
        self.key.get()
    }

    /// Public view of the key. Only live items are ever observed through
    /// this, and live items never hold a negative key.
    #[inline]
    pub(crate) fn key(&self) -> Key {
        debug_assert!(self.key.get() >= 0, "negative key observed outside delete");
        self.key.get() as Key
    }

    /// Lowers the key by `diff`. May go negative during `delete`.
    #[inline]
    pub(crate) fn decrease(&self, diff: RawKey) {
        self.key.set(self.key.get() - diff);
    }

    #[inline]
    pub(crate) fn payload(&self) -> &T {
        &self.payload
    }

    #[inline]
    pub(crate) fn node(&self) -> NodeKey {
        self.node.get()
    }

    #[inline]
    pub(crate) fn set_node(&self, node: NodeKey) {
        self.node.set(node);
    }

    pub(crate) fn into_parts(self) -> (RawKey, T) {
        (self.key.into_inner(), self.payload)
    }
}

/// Handle to an element in a Binomial heap
///
/// Returned by [`BinomialHeap::insert`](crate::BinomialHeap::insert). The
/// handle keeps denoting the same logical entry while the heap reorganizes
/// itself, including across [`meld`](crate::BinomialHeap::meld). Once the
/// entry is removed the handle is stale and operations on it return
/// [`HeapError::InvalidHandle`](crate::HeapError::InvalidHandle).
pub struct BinomialHandle<T> {
    item: Weak<Item<T>>,
}

impl<T> BinomialHandle<T> {
    pub(crate) fn new(item: &Rc<Item<T>>) -> Self {
        BinomialHandle {
            item: Rc::downgrade(item),
        }
    }

    pub(crate) fn upgrade(&self) -> Option<Rc<Item<T>>> {
        self.item.upgrade()
    }

    /// Current key of the entry, or `None` if it has been removed.
    pub fn key(&self) -> Option<Key> {
        self.item.upgrade().map(|item| item.key())
    }

    /// Returns true while the entry is still stored in some heap.
    pub fn is_live(&self) -> bool {
        self.item.strong_count() > 0
    }
}

impl<T> Clone for BinomialHandle<T> {
    fn clone(&self) -> Self {
        BinomialHandle {
            item: self.item.clone(),
        }
    }
}

impl<T> PartialEq for BinomialHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item.ptr_eq(&other.item)
    }
}

impl<T> Eq for BinomialHandle<T> {}

impl<T> fmt::Debug for BinomialHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHandle")
            .field("key", &self.key())
            .field("live", &self.is_live())
            .finish()
    }
}
