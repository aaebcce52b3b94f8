//! An ordered map implemented with a sentinel-threaded AVL tree.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;
use std::ops::{Bound, Index, RangeBounds};

use log::debug;

use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::tree::{NodeId, RawTree, SENTINEL};

mod cursor;
mod iter;

pub use cursor::{Cursor, Position};
pub use iter::{IntoIter, Iter, IterMut, Keys, Range, Values, ValuesMut};

/// An ordered map implemented with an AVL tree.
///
/// Keys are kept sorted by the ordering relation given at construction,
/// [`Natural`] order by default. Each key maps to exactly one value:
/// inserting an existing key leaves the map unchanged.
///
/// ```
/// use avlmap::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert(0, "zero");
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.insert(1, "uno").1, false);
/// assert_eq!(map.at(&1).ok(), Some(&"one"));
/// map.remove(&1);
/// assert!(map.get(&1).is_none());
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V, C = Natural> {
    tree: RawTree<K, V, C>,
    num_nodes: usize,
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Creates an empty map ordered by `K: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// ```
    /// use avlmap::{AvlTreeMap, Reverse};
    /// let mut map = AvlTreeMap::with_comparator(Reverse);
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RawTree::new(comparator),
            num_nodes: 0,
        }
    }

    /// Creates an empty map ordered by `comparator` with room for `capacity` entries.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            tree: RawTree::with_capacity(capacity, comparator),
            num_nodes: 0,
        }
    }

    /// Returns the ordering relation of the map.
    pub fn key_comp(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.tree.is_empty(), self.num_nodes == 0);
        self.num_nodes == 0
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree, zero for an empty map or a single entry.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Swaps the contents of two maps, comparators included.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Clears the map, deallocating all nodes.
    pub fn clear(&mut self) {
        debug!("clear {} entries", self.num_nodes);
        self.tree.clear();
        self.num_nodes = 0;
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.view().entry(self.tree.first())
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.view().entry(self.tree.last())
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.remove_at(self.begin())
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.remove_at(self.last())
    }

    /// Returns the position of the smallest key, or `end()` if the map is empty.
    pub fn begin(&self) -> Position {
        Position(self.tree.first())
    }

    /// Returns the position of the largest key, or `end()` if the map is empty.
    /// This is where reverse iteration starts.
    pub fn last(&self) -> Position {
        Position(self.tree.last())
    }

    /// Returns the end position, past the largest and before the smallest key.
    pub fn end(&self) -> Position {
        Position(SENTINEL)
    }

    /// Returns the position after `pos`. The position after the largest key
    /// is `end()`, the position after `end()` is `begin()`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not belong to this map or has been invalidated.
    pub fn successor(&self, pos: Position) -> Position {
        self.check_position(pos);
        Position(self.tree.successor(pos.0))
    }

    /// Returns the position before `pos`. The position before the smallest
    /// key is `end()`, the position before `end()` is `last()`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not belong to this map or has been invalidated.
    pub fn predecessor(&self, pos: Position) -> Position {
        self.check_position(pos);
        Position(self.tree.predecessor(pos.0))
    }

    /// Returns the entry at `pos`, or `None` for `end()` and invalid positions.
    pub fn entry_at(&self, pos: Position) -> Option<(&K, &V)> {
        if self.tree.is_node(pos.0) {
            self.tree.view().entry(pos.0)
        } else {
            None
        }
    }

    /// Returns the value at `pos` mutably, or `None` for `end()` and invalid positions.
    pub fn value_at_mut(&mut self, pos: Position) -> Option<&mut V> {
        if self.tree.is_node(pos.0) {
            Some(self.tree.value_mut(pos.0))
        } else {
            None
        }
    }

    /// Returns a cursor pointing at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not belong to this map or has been invalidated.
    pub fn cursor_at(&self, pos: Position) -> Cursor<'_, K, V> {
        self.check_position(pos);
        Cursor::new(self.tree.view(), pos.0)
    }

    /// Returns a cursor pointing at the smallest key.
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree.view(), self.tree.first())
    }

    /// Returns a cursor pointing at the largest key.
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree.view(), self.tree.last())
    }

    /// Removes the entry at `pos` and returns it.
    /// Returns `None` for `end()` and invalid positions.
    pub fn remove_at(&mut self, pos: Position) -> Option<(K, V)> {
        if self.tree.is_node(pos.0) {
            Some(self.remove_node(pos.0))
        } else {
            None
        }
    }

    /// Removes the entries in `[first, last)` and returns how many were removed.
    ///
    /// `last` must be reachable from `first`; removal stops at `end()`.
    pub fn remove_range(&mut self, first: Position, last: Position) -> usize {
        let mut current = first.0;
        let mut removed = 0;
        while current != last.0 && self.tree.is_node(current) {
            // Removing `current` frees `current` or its predecessor, never its successor
            let next = self.tree.successor(current);
            self.remove_node(current);
            removed += 1;
            current = next;
        }
        debug!("removed {} entries in range", removed);
        removed
    }

    /// Retains only the entries for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut current = self.tree.first();
        while !current.is_sentinel() {
            let next = self.tree.successor(current);
            let keep = {
                let (slots, values) = self.tree.split_mut();
                let key = slots[current.index()].key();
                match values[current.index()].as_mut() {
                    Some(value) => f(key, value),
                    None => true,
                }
            };
            if !keep {
                self.remove_node(current);
            }
            current = next;
        }
    }

    /// Gets an iterator over the entries of the map in sorted order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.tree.view(), self.tree.first(), self.num_nodes)
    }

    /// Gets a mutable iterator over the entries of the map in sorted order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let front = self.tree.first();
        let len = self.num_nodes;
        let (slots, values) = self.tree.split_mut();
        IterMut::new(slots, values, front, len)
    }

    /// Gets an iterator over the keys of the map in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the values of the map in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Gets a mutable iterator over the values of the map in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    fn remove_node(&mut self, id: NodeId) -> (K, V) {
        debug_assert!(self.num_nodes >= 1);
        self.num_nodes -= 1;
        self.tree.remove(id)
    }

    fn check_position(&self, pos: Position) {
        assert!(
            pos.0.is_sentinel() || self.tree.is_node(pos.0),
            "`AvlTreeMap` - {:?} is not a valid position!",
            pos
        );
    }
}

impl<K, V, C: Compare<K>> AvlTreeMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.tree.search(key)?;
        Some(self.tree.value_mut(id))
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let id = self.tree.search(key)?;
        self.tree.view().entry(id)
    }

    /// Returns the value corresponding to the key,
    /// or [`Error::KeyNotFound`] if the key is not in the map.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value corresponding to the key mutably,
    /// or [`Error::KeyNotFound`] if the key is not in the map.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value corresponding to the key,
    /// inserting a default value first if the key is not in the map.
    ///
    /// ```
    /// use avlmap::AvlTreeMap;
    /// let mut counts = AvlTreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.len(), 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let id = match self.tree.search(&key) {
            Some(id) => id,
            None => {
                self.num_nodes += 1;
                self.tree.insert(key, V::default()).0
            }
        };
        self.tree.value_mut(id)
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = self.tree.check_consistency();
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.iter().count(), self.num_nodes);
        assert_eq!(self.iter().rev().count(), self.num_nodes);
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.search(key).is_some()
    }

    /// Returns the number of entries with the given key, which is 0 or 1.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns the position of the key, or `end()` if the key is not in the map.
    pub fn find(&self, key: &K) -> Position {
        Position(self.tree.search(key).unwrap_or(SENTINEL))
    }

    /// Inserts a key-value pair into the map unless the key is already present.
    ///
    /// Returns the position of the entry with the key and whether the pair
    /// was inserted. An existing entry is left untouched and `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let (id, inserted) = self.tree.insert(key, value);
        if inserted {
            self.num_nodes += 1;
        }
        (Position(id), inserted)
    }

    /// Like [`insert`](Self::insert), but reports a failure to allocate the
    /// new node as [`Error::Alloc`] instead of aborting.
    /// The map is unchanged on error.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Position, bool)> {
        let (id, inserted) = self.tree.try_insert(key, value)?;
        if inserted {
            self.num_nodes += 1;
        }
        Ok((Position(id), inserted))
    }

    /// Inserts a key-value pair, using `hint` as the position the new entry
    /// is expected to precede.
    ///
    /// A correct hint saves the search from the root; a wrong hint costs
    /// nothing but the check.
    pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> (Position, bool) {
        let (id, inserted) = self.tree.insert_hint(hint.0, key, value);
        if inserted {
            self.num_nodes += 1;
        }
        (Position(id), inserted)
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map.
    /// Returns the stored key and value if the key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.tree.search(key)?;
        let entry = self.remove_node(id);
        debug_assert!(self.tree.search(key).is_none());
        Some(entry)
    }

    /// Removes a key from the map and returns the number of removed entries, 0 or 1.
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Returns the position of the first key that is not less than `key`,
    /// or `end()` if there is none.
    pub fn lower_bound(&self, key: &K) -> Position {
        Position(self.tree.lower_bound(key))
    }

    /// Returns the position of the first key that is greater than `key`,
    /// or `end()` if there is none.
    pub fn upper_bound(&self, key: &K) -> Position {
        Position(self.tree.upper_bound(key))
    }

    /// Returns the positions `(lower_bound(key), upper_bound(key))`.
    /// They are equal if the key is not in the map.
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Gets an iterator over a sub-range of entries in the map in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    pub fn range<R>(&self, range: R) -> Range<'_, K, V>
    where
        R: RangeBounds<K>,
    {
        match (range.start_bound(), range.end_bound()) {
            (Bound::Excluded(start), Bound::Excluded(end)) => match self.key_comp().compare(start, end) {
                Ordering::Greater => panic!("range start is greater than range end"),
                Ordering::Equal => panic!("range start and end are equal and excluded"),
                Ordering::Less => {}
            },
            (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) => {
                if self.key_comp().compare(start, end) == Ordering::Greater {
                    panic!("range start is greater than range end")
                }
            }
            _ => {}
        }

        let front = match range.start_bound() {
            Bound::Included(start) => self.tree.lower_bound(start),
            Bound::Excluded(start) => self.tree.upper_bound(start),
            Bound::Unbounded => self.tree.first(),
        };
        let back = match range.end_bound() {
            Bound::Included(end) => self.tree.upper_bound(end),
            Bound::Excluded(end) => self.tree.lower_bound(end),
            Bound::Unbounded => SENTINEL,
        };
        Range::new(self.tree.view(), front, back)
    }
}

impl<K, V, C: Compare<K> + Default> Default for AvlTreeMap<K, V, C> {
    /// Creates an empty map.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for AvlTreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for AvlTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C> Extend<(&'a K, &'a V)> for AvlTreeMap<K, V, C>
where
    K: Copy + 'a,
    V: Copy + 'a,
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, C: Compare<K>> Index<&K> for AvlTreeMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlTreeMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for AvlTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for AvlTreeMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C> Hash for AvlTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self {
            entry.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut AvlTreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for AvlTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
