//! Structural verification and text rendering
//!
//! Neither is needed for normal operation. [`BinomialHeap::verify_structure`]
//! walks the whole forest and checks every invariant the heap maintains; it
//! is what the test suite leans on after each operation. The `Display` impl
//! renders the forest as an indented tree for debugging; its format is not
//! stable.

use crate::binomial::BinomialHeap;
use crate::node::NodeKey;
use crate::rank::{subtree_size, Rank};
use std::fmt;
use std::rc::Rc;

impl<T> BinomialHeap<T> {
    /// Checks every structural invariant of the heap.
    ///
    /// Verified properties:
    /// - root ranks strictly increase from `last.next` around to `last`
    /// - `num_trees` equals the number of set bits in `len`
    /// - a rank-`r` node has children of ranks exactly `0..r`, ascending from
    ///   `child.next` around to `child`, each pointing back at it as parent
    /// - every subtree of rank `r` holds `2^r` items
    /// - heap order: no child key is below its parent's key
    /// - each item's node back-reference points at the node holding it
    /// - `min` is a root holding the minimum key
    /// - the arena holds exactly `len` nodes
    ///
    /// Returns `false` on the first violation, which is logged at `debug`
    /// level.
    pub fn verify_structure(&self) -> bool {
        match self.check_structure() {
            Ok(()) => true,
            Err(reason) => {
                log::debug!("binomial heap invariant violated: {reason}");
                false
            }
        }
    }

    fn check_structure(&self) -> Result<(), String> {
        let roots = &self.roots;
        if self.forest.len() != roots.len {
            return Err(format!(
                "arena holds {} nodes but len is {}",
                self.forest.len(),
                roots.len
            ));
        }
        if roots.num_trees != roots.len.count_ones() as usize {
            return Err(format!(
                "{} trees for {} items",
                roots.num_trees, roots.len
            ));
        }

        let (last, min) = match (roots.last, roots.min) {
            (None, None) if roots.len == 0 => return Ok(()),
            (Some(last), Some(min)) if roots.len > 0 => (last, min),
            _ => return Err("last/min disagree with len".to_string()),
        };

        let ring = self.ring_from(self.forest.next(last), last)?;
        if ring.len() != roots.num_trees {
            return Err(format!(
                "root ring has {} trees, num_trees is {}",
                ring.len(),
                roots.num_trees
            ));
        }
        if !ring.contains(&min) {
            return Err("min is not a root".to_string());
        }

        let mut total = 0;
        let mut prev_rank: Option<Rank> = None;
        for &root in &ring {
            if self.forest.parent(root).is_some() {
                return Err("root has a parent".to_string());
            }
            let rank = self.forest.rank(root);
            if prev_rank.is_some_and(|prev| prev >= rank) {
                return Err("root ranks are not strictly increasing".to_string());
            }
            prev_rank = Some(rank);
            if self.forest.key(root) < self.forest.key(min) {
                return Err("a root is smaller than min".to_string());
            }
            total += self.check_tree(root)?;
        }

        if total != roots.len {
            return Err(format!("trees hold {total} items, len is {}", roots.len));
        }
        Ok(())
    }

    /// Collects the ring from `first` to `last`, failing if the walk does not
    /// come back to `first` right after `last`.
    fn ring_from(&self, first: NodeKey, last: NodeKey) -> Result<Vec<NodeKey>, String> {
        let mut ring = vec![first];
        let mut node = first;
        while node != last {
            node = self.forest.next(node);
            if !self.forest.contains(node) {
                return Err("ring points outside the arena".to_string());
            }
            if ring.len() > self.forest.len() {
                return Err("ring does not close".to_string());
            }
            ring.push(node);
        }
        if self.forest.next(last) != first {
            return Err("ring does not wrap to its first node".to_string());
        }
        Ok(ring)
    }

    /// Verifies the subtree rooted at `node` and returns its item count.
    fn check_tree(&self, node: NodeKey) -> Result<usize, String> {
        let item = &self.forest.node(node).item;
        if item.node() != node {
            return Err("item does not point back at its node".to_string());
        }
        if Rc::strong_count(item) != 1 {
            return Err("item is shared between nodes".to_string());
        }

        let rank = self.forest.rank(node);
        let mut size = 1;
        match self.forest.child(node) {
            None if rank == 0 => {}
            None => return Err(format!("rank {rank} node has no children")),
            Some(child) => {
                let children = self.ring_from(self.forest.next(child), child)?;
                let ranks: Vec<Rank> = children.iter().map(|&c| self.forest.rank(c)).collect();
                if !ranks.iter().copied().eq(0..rank) {
                    return Err(format!("rank {rank} node has children of ranks {ranks:?}"));
                }
                for &c in &children {
                    if self.forest.parent(c) != Some(node) {
                        return Err("child does not point at its parent".to_string());
                    }
                    if self.forest.key(c) < self.forest.key(node) {
                        return Err("heap order violated".to_string());
                    }
                    size += self.check_tree(c)?;
                }
            }
        }

        if size != subtree_size(rank) {
            return Err(format!("rank {rank} subtree holds {size} items"));
        }
        Ok(size)
    }

    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: NodeKey,
        depth: usize,
    ) -> fmt::Result
    where
        T: fmt::Display,
    {
        let item = &self.forest.node(node).item;
        writeln!(
            f,
            "{:indent$}{} [rank {}] {}",
            "",
            item.raw_key(),
            self.forest.rank(node),
            item.payload(),
            indent = depth * 4
        )?;
        if let Some(child) = self.forest.child(node) {
            let mut c = self.forest.next(child);
            loop {
                self.write_subtree(f, c, depth + 1)?;
                if c == child {
                    break;
                }
                c = self.forest.next(c);
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for BinomialHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(last), Some((min, _))) = (self.roots.last, self.peek()) else {
            return writeln!(f, "empty binomial heap");
        };
        writeln!(
            f,
            "binomial heap: {} items in {} trees, min {}",
            self.len(),
            self.num_trees(),
            min
        )?;
        let mut root = self.forest.next(last);
        loop {
            self.write_subtree(f, root, 0)?;
            if root == last {
                break;
            }
            root = self.forest.next(root);
        }
        Ok(())
    }
}
