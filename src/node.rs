//! Node arena and circular ring primitives
//!
//! Every node of every binomial tree in a heap lives in one [`Forest`], a
//! slot-map arena owned by the heap. Tree structure is expressed with arena
//! keys rather than owning pointers:
//!
//! - `next`: next sibling in a circular singly-linked ring. A lone node is its
//!   own successor.
//! - `child`: the highest-rank child, which is the entry point of the child
//!   ring. Walking from `child.next` around to `child` visits ranks
//!   `0, 1, ..., r - 1` in ascending order.
//! - `parent`: `None` for roots.
//!
//! The heap's root ring uses the same orientation: the heap remembers its
//! highest-rank root (`last`), and `last.next` is the lowest-rank root.
//!
//! All primitives here are O(1) except [`Forest::predecessor`] (and
//! [`Forest::unlink`], which uses it), whose cost is bounded by the ring
//! length, O(log n).

use crate::item::{Item, RawKey};
use crate::rank::{checked_increment, Rank};
use crate::Key;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::rc::Rc;

new_key_type! {
    /// Arena key of a heap node
    pub(crate) struct NodeKey;
}

/// A vertex in a binomial tree.
pub(crate) struct Node<T> {
    /// Item currently stored here. This is the only strong reference to it.
    pub(crate) item: Rc<Item<T>>,
    /// The subtree rooted here holds exactly `2^rank` items
    pub(crate) rank: Rank,
    /// Highest-rank child (None if leaf)
    pub(crate) child: Option<NodeKey>,
    /// Next sibling in the circular ring
    pub(crate) next: NodeKey,
    /// Parent node (None if root)
    pub(crate) parent: Option<NodeKey>,
}

/// Arena owning every node of one heap.
pub(crate) struct Forest<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Forest {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<T> Forest<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Forest {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a rank-0 tree holding a fresh item. The node is a ring of
    /// one.
    pub(crate) fn insert(&mut self, key: Key, payload: T) -> NodeKey {
        self.nodes.insert_with_key(|node| Node {
            item: Rc::new(Item::new(key, payload, node)),
            rank: 0,
            child: None,
            next: node,
            parent: None,
        })
    }

    /// Removes a node from the arena. The caller must have unlinked it from
    /// every ring and detached its children first.
    pub(crate) fn remove(&mut self, node: NodeKey) -> Option<Node<T>> {
        self.nodes.remove(node)
    }

    #[inline]
    pub(crate) fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(node)
    }

    #[inline]
    pub(crate) fn node(&self, node: NodeKey) -> &Node<T> {
        &self.nodes[node]
    }

    #[inline]
    pub(crate) fn get(&self, node: NodeKey) -> Option<&Node<T>> {
        self.nodes.get(node)
    }

    #[inline]
    pub(crate) fn key(&self, node: NodeKey) -> RawKey {
        self.nodes[node].item.raw_key()
    }

    #[inline]
    pub(crate) fn rank(&self, node: NodeKey) -> Rank {
        self.nodes[node].rank
    }

    #[inline]
    pub(crate) fn next(&self, node: NodeKey) -> NodeKey {
        self.nodes[node].next
    }

    #[inline]
    pub(crate) fn set_next(&mut self, node: NodeKey, next: NodeKey) {
        self.nodes[node].next = next;
    }

    #[inline]
    pub(crate) fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes[node].parent
    }

    #[inline]
    pub(crate) fn child(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes[node].child
    }

    /// Clears the parent pointer, turning a former child into a root.
    #[inline]
    pub(crate) fn make_root(&mut self, node: NodeKey) {
        self.nodes[node].parent = None;
    }

    /// Detaches the child ring of `node`, returning its highest-rank child.
    /// The rank of `node` is left untouched so the caller can still account
    /// for the subtree size.
    pub(crate) fn take_children(&mut self, node: NodeKey) -> Option<NodeKey> {
        self.nodes[node].child.take()
    }

    /// Finds the node whose `next` is `node`, scanning forward around the
    /// ring.
    pub(crate) fn predecessor(&self, node: NodeKey) -> NodeKey {
        let mut pred = node;
        while self.next(pred) != node {
            pred = self.next(pred);
        }
        pred
    }

    /// Splices `node` into the ring immediately after `at`.
    ///
    /// If `at` is a child and `node` outranks the parent's current
    /// highest-rank child, `node` becomes the parent's `child` and the
    /// parent's rank is raised to match.
    pub(crate) fn add_next(&mut self, at: NodeKey, node: NodeKey) {
        let parent = self.parent(at);
        if let Some(parent) = parent {
            let promote = match self.child(parent) {
                Some(child) => self.rank(node) > self.rank(child),
                None => true,
            };
            if promote {
                let rank = checked_increment(self.rank(node));
                let p = &mut self.nodes[parent];
                p.child = Some(node);
                p.rank = rank;
            }
        }

        let after = self.next(at);
        let n = &mut self.nodes[node];
        n.parent = parent;
        n.next = after;
        self.nodes[at].next = node;
    }

    /// Removes `node` from whatever ring contains it, leaving it as a ring of
    /// one with no parent.
    ///
    /// If `node` was its parent's highest-rank child, the next-highest
    /// sibling takes over and the parent's rank drops accordingly.
    pub(crate) fn unlink(&mut self, node: NodeKey) {
        let next = self.next(node);
        let pred = (next != node).then(|| self.predecessor(node));

        if let Some(parent) = self.nodes[node].parent.take() {
            if self.child(parent) == Some(node) {
                let (child, rank) = match pred {
                    Some(pred) => (Some(pred), checked_increment(self.rank(pred))),
                    None => (None, 0),
                };
                let p = &mut self.nodes[parent];
                p.child = child;
                p.rank = rank;
            }
        }

        if let Some(pred) = pred {
            self.nodes[pred].next = next;
            self.nodes[node].next = node;
        }
    }

    /// Joins two equal-rank root trees into one tree of rank + 1.
    ///
    /// The root with the smaller key wins (on a tie, `b` wins) and the other
    /// becomes its highest-rank child. The winner's `next` is not touched;
    /// re-threading it into the root ring is up to the caller.
    pub(crate) fn link(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        debug_assert_eq!(self.rank(a), self.rank(b), "linking trees of unequal rank");
        debug_assert!(
            self.parent(a).is_none() && self.parent(b).is_none(),
            "link is only defined on roots"
        );

        let (root, son) = if self.key(a) < self.key(b) { (a, b) } else { (b, a) };
        log::trace!(
            "linking rank {} trees (keys {} over {})",
            self.rank(root),
            self.key(root),
            self.key(son)
        );

        match self.child(root) {
            Some(child) => self.add_next(child, son),
            None => {
                let s = &mut self.nodes[son];
                s.parent = Some(root);
                s.next = son;
                let r = &mut self.nodes[root];
                r.child = Some(son);
                r.rank = 1;
            }
        }
        root
    }

    /// Exchanges the items stored in two nodes, updating both directions of
    /// the Item <-> Node reference together.
    pub(crate) fn swap_items(&mut self, a: NodeKey, b: NodeKey) {
        let item_a = Rc::clone(&self.nodes[a].item);
        let item_b = std::mem::replace(&mut self.nodes[b].item, item_a);
        self.nodes[a].item = item_b;
        self.nodes[a].item.set_node(a);
        self.nodes[b].item.set_node(b);
    }

    /// Moves every node of `other` into this arena.
    ///
    /// Nodes receive new keys; ring, child and parent links as well as each
    /// item's node back-reference are rewritten. Returns the old-to-new key
    /// map so the caller can translate its own references.
    pub(crate) fn absorb(&mut self, other: Forest<T>) -> FxHashMap<NodeKey, NodeKey> {
        let mut remap =
            FxHashMap::with_capacity_and_hasher(other.nodes.len(), Default::default());
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old, node) in other.nodes {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }

        for key in moved {
            let node = &mut self.nodes[key];
            node.next = remap[&node.next];
            node.child = node.child.map(|child| remap[&child]);
            node.parent = node.parent.map(|parent| remap[&parent]);
            node.item.set_node(key);
        }
        remap
    }
}
