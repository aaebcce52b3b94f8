//! Iterators over the entries of a map, in key order.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::AvlTreeMap;
use crate::tree::{predecessor, successor, NodeId, Slot, View};

/// An iterator over the entries of a map.
pub struct Iter<'a, K, V> {
    view: View<'a, K, V>,
    front: NodeId,
    // One past the last entry still to be visited.
    back: NodeId,
    remaining: usize,
}

/// A mutable iterator over the entries of a map.
pub struct IterMut<'a, K, V> {
    slots: &'a [Slot<K>],
    values: *mut Option<V>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
    marker: PhantomData<&'a mut V>,
}

/// An owning iterator over the entries of a map.
pub struct IntoIter<K, V, C> {
    map: AvlTreeMap<K, V, C>,
}

/// An iterator over the keys of a map.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a map.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a map.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An iterator over a sub-range of entries of a map.
pub struct Range<'a, K, V> {
    view: View<'a, K, V>,
    front: NodeId,
    back: NodeId,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(view: View<'a, K, V>, front: NodeId, len: usize) -> Self {
        Self {
            view,
            front,
            back: crate::tree::SENTINEL,
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        self.front = self.view.successor(id);
        self.remaining -= 1;
        self.view.entry(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.view.predecessor(self.back);
        self.remaining -= 1;
        self.view.entry(self.back)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K>], values: &'a mut [Option<V>], front: NodeId, len: usize) -> Self {
        debug_assert_eq!(slots.len(), values.len());
        Self {
            slots,
            values: values.as_mut_ptr(),
            front,
            back: crate::tree::SENTINEL,
            remaining: len,
            marker: PhantomData,
        }
    }

    fn entry(&mut self, id: NodeId) -> Option<(&'a K, &'a mut V)> {
        debug_assert!(id.index() < self.slots.len());
        let slots = self.slots;
        let key = slots[id.index()].key();
        // SAFETY: `values` comes from a slice of the same length as `slots`
        // that is mutably borrowed for 'a, and every node is yielded at most
        // once because `front` and `back` walk towards each other and stop
        // after `remaining` steps.
        let value = unsafe { &mut *self.values.add(id.index()) };
        value.as_mut().map(|value| (key, value))
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        self.front = successor(self.slots, id);
        self.remaining -= 1;
        self.entry(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = predecessor(self.slots, self.back);
        self.remaining -= 1;
        self.entry(self.back)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V, C> IntoIter<K, V, C> {
    pub(crate) fn new(map: AvlTreeMap<K, V, C>) -> Self {
        Self { map }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for IntoIter<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.map.iter()).finish()
    }
}

impl<K, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_last()
    }
}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> {}

impl<K, V, C> FusedIterator for IntoIter<K, V, C> {}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(crate) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<'a, K, V> Range<'a, K, V> {
    /// Creates a range over `[front, back)`; `back` is exclusive.
    pub(crate) fn new(view: View<'a, K, V>, front: NodeId, back: NodeId) -> Self {
        Self { view, front, back }
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            front: self.front,
            back: self.back,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let id = self.front;
        self.front = self.view.successor(id);
        self.view.entry(id)
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.view.predecessor(self.back);
        self.view.entry(self.back)
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}
