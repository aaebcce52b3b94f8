//! Ordering relations used to sort map keys.

use std::cmp::Ordering;

/// A total order over keys.
///
/// The relation is fixed when the map is constructed and must not change
/// afterwards. Behavior is unspecified (but memory safe) if it is not a
/// strict weak order.
pub trait Compare<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;

    /// Returns true if `lhs` sorts before `rhs`.
    fn less(&self, lhs: &K, rhs: &K) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }
}

/// The natural order of keys given by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// The reverse of the natural order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        rhs.cmp(lhs)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}
