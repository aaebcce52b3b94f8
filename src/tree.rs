use std::cmp::{self, Ordering};
use std::collections::TryReserveError;

use log::trace;

use crate::compare::Compare;

mod node;

pub(crate) use node::{predecessor, successor, NodeId, Slot, View, SENTINEL};
use node::{leftmost, real, rightmost, Arena, Link, Links};

/// The balanced tree engine.
///
/// Keeps BST order and AVL balance across every mutation and maintains the
/// sentinel threads to the minimum and maximum nodes.
#[derive(Clone)]
pub(crate) struct RawTree<K, V, C> {
    arena: Arena<K, V>,
    root: NodeId,
    comparator: C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

enum InsertPos {
    Occupied(NodeId),
    Vacant(Link, Side),
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K, V, C> RawTree<K, V, C> {
    pub(crate) fn new(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: SENTINEL,
            comparator,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: SENTINEL,
            comparator,
        }
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    pub(crate) fn height(&self) -> usize {
        if self.root.is_sentinel() {
            0
        } else {
            self.arena.links(self.root).height
        }
    }

    /// Node with the minimum key, or the sentinel if the tree is empty.
    #[inline]
    pub(crate) fn first(&self) -> NodeId {
        self.arena.links(SENTINEL).right.unwrap_or(SENTINEL)
    }

    /// Node with the maximum key, or the sentinel if the tree is empty.
    #[inline]
    pub(crate) fn last(&self) -> NodeId {
        self.arena.links(SENTINEL).left.unwrap_or(SENTINEL)
    }

    pub(crate) fn is_node(&self, id: NodeId) -> bool {
        self.arena.is_node(id)
    }

    #[cfg(test)]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        self.arena.key(id)
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        self.arena.value_mut(id)
    }

    #[inline]
    pub(crate) fn view(&self) -> View<'_, K, V> {
        self.arena.view()
    }

    pub(crate) fn split_mut(&mut self) -> (&[Slot<K>], &mut [Option<V>]) {
        self.arena.split_mut()
    }

    pub(crate) fn successor(&self, id: NodeId) -> NodeId {
        self.view().successor(id)
    }

    pub(crate) fn predecessor(&self, id: NodeId) -> NodeId {
        self.view().predecessor(id)
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = SENTINEL;
    }

    /// Unlinks a node and returns its entry.
    ///
    /// A node with two children is not unlinked itself: it takes over the
    /// entry of its in-order predecessor, which is unlinked instead.
    /// Returns the entry originally stored at `id` in either case.
    pub(crate) fn remove(&mut self, id: NodeId) -> (K, V) {
        debug_assert!(self.arena.is_node(id));
        let mut target = id;
        let links = *self.arena.links(id);
        if let (Some(left_id), Some(_)) = (real(links.left), real(links.right)) {
            let predecessor_id = rightmost(self.slots(), left_id);
            trace!("replace {:?} by predecessor {:?}", id, predecessor_id);
            self.arena.swap_entries(id, predecessor_id);
            target = predecessor_id;
        }
        self.unlink_node(target);
        self.arena.release(target)
    }

    fn slots(&self) -> &[Slot<K>] {
        self.arena.slots()
    }

    /// Unlinks a node with at most one real child and restores balance.
    fn unlink_node(&mut self, id: NodeId) {
        let links = *self.arena.links(id);
        debug_assert!(real(links.left).is_none() || real(links.right).is_none());

        let child = real(links.left).or(real(links.right));
        let was_min = links.left == Some(SENTINEL);
        let was_max = links.right == Some(SENTINEL);

        if let Some(child_id) = child {
            self.arena.links_mut(child_id).parent = links.parent;
        }
        self.replace_child(links.parent, id, child);

        match (links.parent, child) {
            (None, None) => trace!("unlink last node {:?}", id),
            (_, Some(child_id)) => trace!("unlink {:?}, promote {:?}", id, child_id),
            (Some(_), None) => trace!("unlink leaf {:?}", id),
        }

        // Keep the sentinel threaded to the extremes
        if was_min {
            let new_min = match child {
                Some(child_id) => leftmost(self.slots(), child_id),
                None => links.parent.unwrap_or(SENTINEL),
            };
            if !new_min.is_sentinel() {
                self.arena.links_mut(new_min).left = Some(SENTINEL);
            }
            self.arena.links_mut(SENTINEL).right = Some(new_min);
        }
        if was_max {
            let new_max = match child {
                Some(child_id) => rightmost(self.slots(), child_id),
                None => links.parent.unwrap_or(SENTINEL),
            };
            if !new_max.is_sentinel() {
                self.arena.links_mut(new_max).right = Some(SENTINEL);
            }
            self.arena.links_mut(SENTINEL).left = Some(new_max);
        }

        // Parent node might be out of balance now
        self.rebalance(links.parent);
    }

    /// Points the link that referred to `old` at `new`.
    /// A `None` parent means `old` is the root.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new.unwrap_or(SENTINEL),
            Some(parent_id) => {
                let parent_links = self.arena.links_mut(parent_id);
                if parent_links.left == Some(old) {
                    parent_links.left = new;
                } else {
                    debug_assert_eq!(parent_links.right, Some(old));
                    parent_links.right = new;
                }
            }
        }
    }

    /// Hangs a new node below `parent` (or makes it the root) and rebalances.
    fn attach(&mut self, parent: Link, side: Side, key: K, value: V) -> NodeId {
        let Some(parent_id) = parent else {
            debug_assert!(self.root.is_sentinel());
            let links = Links {
                parent: None,
                left: Some(SENTINEL),
                right: Some(SENTINEL),
                height: 0,
            };
            let id = self.arena.acquire(key, value, links);
            self.root = id;
            let sentinel = self.arena.links_mut(SENTINEL);
            sentinel.left = Some(id);
            sentinel.right = Some(id);
            return id;
        };

        let mut links = Links::leaf(parent);
        // The vacated slot of the parent is either empty or the sentinel.
        let outer = match side {
            Side::Left => self.arena.links(parent_id).left,
            Side::Right => self.arena.links(parent_id).right,
        };
        debug_assert!(real(outer).is_none());
        match side {
            Side::Left => links.left = outer,
            Side::Right => links.right = outer,
        }
        let id = self.arena.acquire(key, value, links);
        match side {
            Side::Left => self.arena.links_mut(parent_id).left = Some(id),
            Side::Right => self.arena.links_mut(parent_id).right = Some(id),
        }

        // New extreme
        if outer == Some(SENTINEL) {
            match side {
                Side::Left => self.arena.links_mut(SENTINEL).right = Some(id),
                Side::Right => self.arena.links_mut(SENTINEL).left = Some(id),
            }
        }

        self.rebalance_once(parent);
        id
    }

    fn left_height(&self, id: NodeId) -> usize {
        match real(self.arena.links(id).left) {
            None => 0,
            Some(left_id) => self.arena.links(left_id).height + 1,
        }
    }

    fn right_height(&self, id: NodeId) -> usize {
        match real(self.arena.links(id).right) {
            None => 0,
            Some(right_id) => self.arena.links(right_id).height + 1,
        }
    }

    fn adjust_height(&mut self, id: NodeId) {
        let height = cmp::max(self.left_height(id), self.right_height(id));
        self.arena.links_mut(id).height = height;
    }

    fn rotate_left(&mut self, id: NodeId) {
        if let Some(right_id) = real(self.arena.links(id).right) {
            trace!("rotate left at {:?}", id);
            let center = self.arena.links(right_id).left;
            debug_assert!(center != Some(SENTINEL));
            self.arena.links_mut(id).right = center;
            if let Some(center_id) = center {
                self.arena.links_mut(center_id).parent = Some(id);
            }

            let parent = self.arena.links(id).parent;
            self.arena.links_mut(right_id).parent = parent;
            self.replace_child(parent, id, Some(right_id));

            self.arena.links_mut(right_id).left = Some(id);
            self.arena.links_mut(id).parent = Some(right_id);

            self.adjust_height(id);
            self.adjust_height(right_id);
        }
    }

    fn rotate_right(&mut self, id: NodeId) {
        if let Some(left_id) = real(self.arena.links(id).left) {
            trace!("rotate right at {:?}", id);
            let center = self.arena.links(left_id).right;
            debug_assert!(center != Some(SENTINEL));
            self.arena.links_mut(id).left = center;
            if let Some(center_id) = center {
                self.arena.links_mut(center_id).parent = Some(id);
            }

            let parent = self.arena.links(id).parent;
            self.arena.links_mut(left_id).parent = parent;
            self.replace_child(parent, id, Some(left_id));

            self.arena.links_mut(left_id).right = Some(id);
            self.arena.links_mut(id).parent = Some(left_id);

            self.adjust_height(id);
            self.adjust_height(left_id);
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    fn rebalance(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(id) = current {
            let parent = self.arena.links(id).parent;
            self.rebalance_node(id);
            current = parent;
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    /// Stops after first rebalance operation.
    /// This is enough to restore balance after a single insert operation.
    fn rebalance_once(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(id) = current {
            let parent = self.arena.links(id).parent;
            if self.rebalance_node(id) {
                break;
            }
            current = parent;
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Left-left and right-right need a single rotation, left-right and
    /// right-left a double rotation.
    /// Returns whether rebalancing had been necessary.
    fn rebalance_node(&mut self, id: NodeId) -> bool {
        let left_height = self.left_height(id);
        let right_height = self.right_height(id);
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);
        if left_height > right_height + 1 {
            if let Some(left_id) = real(self.arena.links(id).left) {
                if self.right_height(left_id) > self.left_height(left_id) {
                    self.rotate_left(left_id);
                }
            }
            self.rotate_right(id);
            true
        } else if right_height > left_height + 1 {
            if let Some(right_id) = real(self.arena.links(id).right) {
                if self.left_height(right_id) > self.right_height(right_id) {
                    self.rotate_right(right_id);
                }
            }
            self.rotate_left(id);
            true
        } else {
            self.adjust_height(id);
            false
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn inorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(|_| {}, f, |_| {});
    }

    /// Walks the tree from the root without recursion, following parent links upwards.
    #[cfg(any(test, feature = "consistency_check"))]
    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodeId),
        In: FnMut(NodeId),
        Post: FnMut(NodeId),
    {
        if self.root.is_sentinel() {
            return;
        }
        let mut id = self.root;
        let mut dir = Direction::FromParent;
        loop {
            match dir {
                Direction::FromParent => {
                    preorder(id);
                    if let Some(left_id) = real(self.arena.links(id).left) {
                        id = left_id;
                    } else {
                        dir = Direction::FromLeft;
                    }
                }
                Direction::FromLeft => {
                    inorder(id);
                    if let Some(right_id) = real(self.arena.links(id).right) {
                        id = right_id;
                        dir = Direction::FromParent;
                    } else {
                        dir = Direction::FromRight;
                    }
                }
                Direction::FromRight => {
                    postorder(id);
                    if let Some(parent_id) = self.arena.links(id).parent {
                        if self.arena.links(parent_id).left == Some(id) {
                            dir = Direction::FromLeft;
                        } else {
                            dir = Direction::FromRight;
                        }
                        id = parent_id;
                    } else {
                        break;
                    }
                }
            }
        }
    }
}

impl<K, V, C: Compare<K>> RawTree<K, V, C> {
    /// Finds the node holding `key`. Never returns the sentinel.
    pub(crate) fn search(&self, key: &K) -> Option<NodeId> {
        let mut current = real(Some(self.root));
        while let Some(id) = current {
            let links = self.arena.links(id);
            current = match self.comparator.compare(key, self.arena.key(id)) {
                Ordering::Equal => break,
                Ordering::Less => real(links.left),
                Ordering::Greater => real(links.right),
            };
        }
        current
    }

    fn find_insert_pos(&self, key: &K) -> InsertPos {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = real(Some(self.root));
        while let Some(id) = current {
            let links = self.arena.links(id);
            parent = Some(id);
            current = match self.comparator.compare(key, self.arena.key(id)) {
                Ordering::Equal => return InsertPos::Occupied(id),
                Ordering::Less => {
                    side = Side::Left;
                    real(links.left)
                }
                Ordering::Greater => {
                    side = Side::Right;
                    real(links.right)
                }
            };
        }
        InsertPos::Vacant(parent, side)
    }

    /// Inserts a new node unless the key is already present.
    /// Returns the node holding the key and whether it was inserted.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
        match self.find_insert_pos(&key) {
            InsertPos::Occupied(id) => (id, false),
            InsertPos::Vacant(parent, side) => (self.attach(parent, side, key, value), true),
        }
    }

    /// Like `insert`, but acquires node storage fallibly before touching any link.
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<(NodeId, bool), TryReserveError> {
        match self.find_insert_pos(&key) {
            InsertPos::Occupied(id) => Ok((id, false)),
            InsertPos::Vacant(parent, side) => {
                self.arena.try_reserve_one()?;
                Ok((self.attach(parent, side, key, value), true))
            }
        }
    }

    /// Inserts using `hint` as the position the key will precede.
    /// Skips the descent from the root when the hint is right; falls back to
    /// `insert` otherwise.
    pub(crate) fn insert_hint(&mut self, hint: NodeId, key: K, value: V) -> (NodeId, bool) {
        if self.root.is_sentinel() || !(hint.is_sentinel() || self.arena.is_node(hint)) {
            return self.insert(key, value);
        }
        if !hint.is_sentinel() && !self.comparator.less(&key, self.arena.key(hint)) {
            return self.insert(key, value);
        }
        let prev = self.predecessor(hint);
        if !prev.is_sentinel() && !self.comparator.less(self.arena.key(prev), &key) {
            return self.insert(key, value);
        }

        // `key` sorts strictly between `prev` and `hint`, which are adjacent
        if !hint.is_sentinel() && real(self.arena.links(hint).left).is_none() {
            (self.attach(Some(hint), Side::Left, key, value), true)
        } else {
            debug_assert!(real(self.arena.links(prev).right).is_none());
            (self.attach(Some(prev), Side::Right, key, value), true)
        }
    }

    /// First node whose key is not less than `key`, or the sentinel.
    pub(crate) fn lower_bound(&self, key: &K) -> NodeId {
        let mut result = SENTINEL;
        let mut current = real(Some(self.root));
        while let Some(id) = current {
            let links = self.arena.links(id);
            if self.comparator.less(self.arena.key(id), key) {
                current = real(links.right);
            } else {
                result = id;
                current = real(links.left);
            }
        }
        result
    }

    /// First node whose key is greater than `key`, or the sentinel.
    pub(crate) fn upper_bound(&self, key: &K) -> NodeId {
        let mut result = SENTINEL;
        let mut current = real(Some(self.root));
        while let Some(id) = current {
            let links = self.arena.links(id);
            if self.comparator.less(key, self.arena.key(id)) {
                result = id;
                current = real(links.left);
            } else {
                current = real(links.right);
            }
        }
        result
    }

    /// Asserts BST order, AVL balance, cached heights, parent links and
    /// sentinel threading. Returns the number of nodes.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self) -> usize {
        // Check root link
        if !self.root.is_sentinel() {
            assert!(self.arena.links(self.root).parent.is_none());
        }

        // Check tree nodes
        let mut num_nodes = 0;
        self.preorder(|id| {
            let links = self.arena.links(id);
            let mut height = 0;
            let mut left_height = 0;
            let mut right_height = 0;

            // Check link for left child node
            if let Some(left_id) = real(links.left) {
                assert_eq!(self.arena.links(left_id).parent, Some(id));
                assert!(self.comparator.less(self.arena.key(left_id), self.arena.key(id)));
                left_height = self.arena.links(left_id).height + 1;
                height = cmp::max(height, left_height);
            }

            // Check link for right child node
            if let Some(right_id) = real(links.right) {
                assert_eq!(self.arena.links(right_id).parent, Some(id));
                assert!(self.comparator.less(self.arena.key(id), self.arena.key(right_id)));
                right_height = self.arena.links(right_id).height + 1;
                height = cmp::max(height, right_height);
            }

            // Check height
            assert_eq!(links.height, height);

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            // Only the extremes may point at the sentinel
            if links.left == Some(SENTINEL) {
                assert_eq!(self.first(), id);
            }
            if links.right == Some(SENTINEL) {
                assert_eq!(self.last(), id);
            }

            num_nodes += 1;
        });

        // Check sentinel threads
        if self.root.is_sentinel() {
            assert_eq!(self.first(), SENTINEL);
            assert_eq!(self.last(), SENTINEL);
        } else {
            let min_id = leftmost(self.slots(), self.root);
            let max_id = rightmost(self.slots(), self.root);
            assert_eq!(self.first(), min_id);
            assert_eq!(self.last(), max_id);
            assert_eq!(self.arena.links(min_id).left, Some(SENTINEL));
            assert_eq!(self.arena.links(max_id).right, Some(SENTINEL));
        }

        // Check that threaded stepping visits nodes in tree order
        let mut expected = Vec::with_capacity(num_nodes);
        self.inorder(|id| expected.push(id));
        let mut stepped = Vec::with_capacity(num_nodes);
        let mut id = self.first();
        while !id.is_sentinel() {
            stepped.push(id);
            id = successor(self.slots(), id);
        }
        assert_eq!(stepped, expected);
        let mut id = self.last();
        while !id.is_sentinel() {
            assert_eq!(stepped.pop(), Some(id));
            id = predecessor(self.slots(), id);
        }
        assert!(stepped.is_empty());

        num_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Natural;

    fn build(keys: &[i32]) -> RawTree<i32, i32, Natural> {
        let mut tree = RawTree::new(Natural);
        for &key in keys {
            assert!(tree.insert(key, key * 10).1);
            tree.check_consistency();
        }
        tree
    }

    fn keys(tree: &RawTree<i32, i32, Natural>) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut id = tree.first();
        while !id.is_sentinel() {
            keys.push(*tree.key(id));
            id = tree.successor(id);
        }
        keys
    }

    #[test]
    fn test_empty() {
        let tree = RawTree::<i32, i32, _>::new(Natural);
        assert!(tree.is_empty());
        assert_eq!(tree.first(), SENTINEL);
        assert_eq!(tree.last(), SENTINEL);
        assert_eq!(tree.search(&1), None);
        assert_eq!(tree.check_consistency(), 0);
    }

    #[test]
    fn test_single_node_threads() {
        let tree = build(&[7]);
        let id = tree.first();
        assert_eq!(tree.last(), id);
        assert_eq!(tree.successor(id), SENTINEL);
        assert_eq!(tree.predecessor(id), SENTINEL);
        assert_eq!(tree.successor(SENTINEL), id);
        assert_eq!(tree.predecessor(SENTINEL), id);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut tree = build(&[2, 1, 3]);
        let existing = tree.search(&1).unwrap();
        assert_eq!(tree.insert(1, 99), (existing, false));
        assert_eq!(*tree.view().entry(existing).unwrap().1, 10);
    }

    #[test]
    fn test_rotations_keep_threads() {
        // Ascending and descending runs rotate at every other step
        let tree = build(&(0..64).collect::<Vec<_>>());
        assert_eq!(keys(&tree), (0..64).collect::<Vec<_>>());
        let tree = build(&(0..64).rev().collect::<Vec<_>>());
        assert_eq!(keys(&tree), (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_cases() {
        //       4
        //     /   \
        //    2     6
        //   / \   / \
        //  1   3 5   7
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.height(), 2);

        // Leaf that is the minimum: parent becomes the new minimum
        let id = tree.search(&1).unwrap();
        assert_eq!(tree.remove(id), (1, 10));
        tree.check_consistency();
        assert_eq!(*tree.key(tree.first()), 2);

        // Node with one real child that is the minimum
        let id = tree.search(&2).unwrap();
        assert_eq!(tree.remove(id), (2, 20));
        tree.check_consistency();
        assert_eq!(*tree.key(tree.first()), 3);

        // Node with two children takes its predecessor's entry
        let root = tree.search(&4).unwrap();
        assert_eq!(tree.remove(root), (4, 40));
        tree.check_consistency();
        assert_eq!(*tree.key(root), 3);
        assert_eq!(keys(&tree), vec![3, 5, 6, 7]);

        // Leaf that is the maximum
        let id = tree.search(&7).unwrap();
        assert_eq!(tree.remove(id), (7, 70));
        tree.check_consistency();
        assert_eq!(*tree.key(tree.last()), 6);

        while !tree.is_empty() {
            let root = tree.root;
            tree.remove(root);
            tree.check_consistency();
        }
        assert_eq!(tree.first(), SENTINEL);
        assert_eq!(tree.last(), SENTINEL);
    }

    #[test]
    fn test_bounds() {
        let tree = build(&[1, 12, 19, 22, 24, 26, 31, 100]);
        assert_eq!(*tree.key(tree.lower_bound(&9)), 12);
        assert_eq!(*tree.key(tree.lower_bound(&22)), 22);
        assert_eq!(*tree.key(tree.upper_bound(&22)), 24);
        assert_eq!(*tree.key(tree.lower_bound(&-5)), 1);
        assert_eq!(tree.lower_bound(&101), SENTINEL);
        assert_eq!(tree.upper_bound(&100), SENTINEL);
    }

    #[test]
    fn test_insert_hint() {
        let mut tree = build(&[10, 20, 30]);

        // Correct hints
        let hint = tree.search(&20).unwrap();
        let (id, inserted) = tree.insert_hint(hint, 15, 150);
        assert!(inserted);
        assert_eq!(*tree.key(id), 15);
        tree.check_consistency();

        let (id, inserted) = tree.insert_hint(SENTINEL, 40, 400);
        assert!(inserted);
        assert_eq!(tree.last(), id);
        tree.check_consistency();

        let first = tree.first();
        let (id, inserted) = tree.insert_hint(first, 5, 50);
        assert!(inserted);
        assert_eq!(tree.first(), id);
        tree.check_consistency();

        // Wrong hint and duplicate fall back to a normal insert
        let (_, inserted) = tree.insert_hint(first, 25, 250);
        assert!(inserted);
        let (id, inserted) = tree.insert_hint(first, 30, 0);
        assert!(!inserted);
        assert_eq!(*tree.view().entry(id).unwrap().1, 300);
        tree.check_consistency();

        assert_eq!(keys(&tree), vec![5, 10, 15, 20, 25, 30, 40]);
    }

    #[test]
    fn test_clear() {
        let mut tree = build(&[3, 1, 2]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.check_consistency(), 0);
        tree.insert(5, 50);
        assert_eq!(tree.check_consistency(), 1);
    }
}
