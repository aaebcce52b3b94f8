//! Positions and cursors over the entries of a map.

use std::fmt;

use crate::tree::{NodeId, View};

/// A position in a map: an entry, or the end of the map.
///
/// Positions are plain handles. They stay valid across insertions and
/// across removals of other entries, but are invalidated when their own
/// entry is removed. Removing an entry with two children moves the entry of
/// its in-order predecessor into the removed entry's position, so a position
/// of that predecessor is invalidated as well.
///
/// Two positions are equal if they name the same node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) NodeId);

impl Position {
    /// Returns true if this is the end position, which sits both after the
    /// last entry and before the first one.
    pub fn is_end(self) -> bool {
        self.0.is_sentinel()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_end() {
            write!(f, "Position(end)")
        } else {
            write!(f, "Position({})", self.0.index())
        }
    }
}

/// A cursor over the entries of a map.
///
/// Stepping past the last entry moves the cursor to the end position,
/// stepping once more wraps around to the first entry; the same holds
/// backwards.
///
/// ```
/// use avlmap::AvlTreeMap;
/// let map: AvlTreeMap<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
/// let mut cursor = map.cursor_front();
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_next();
/// assert_eq!(cursor.value(), Some(&"b"));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&2));
/// ```
pub struct Cursor<'a, K, V> {
    view: View<'a, K, V>,
    current: NodeId,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(view: View<'a, K, V>, current: NodeId) -> Self {
        Self { view, current }
    }

    /// Returns the position the cursor points at.
    pub fn position(&self) -> Position {
        Position(self.current)
    }

    /// Returns true if the cursor points at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_sentinel()
    }

    /// Returns the key at the cursor, or `None` at the end position.
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    /// Returns the value at the cursor, or `None` at the end position.
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// Returns the entry at the cursor, or `None` at the end position.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.view.entry(self.current)
    }

    /// Moves to the entry with the next larger key.
    pub fn move_next(&mut self) {
        self.current = self.view.successor(self.current);
    }

    /// Moves to the entry with the next smaller key.
    pub fn move_prev(&mut self) {
        self.current = self.view.predecessor(self.current);
    }

    /// Returns the entry the cursor would move to with `move_next`.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.view.entry(self.view.successor(self.current))
    }

    /// Returns the entry the cursor would move to with `move_prev`.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.view.entry(self.view.predecessor(self.current))
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            current: self.current,
        }
    }
}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}
