use std::collections::TryReserveError;
use std::mem;

/// Index of a node slot in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The boundary node. It is the nominal parent of the root and threads to
/// the minimum (`right`) and maximum (`left`) real nodes.
pub(crate) const SENTINEL: NodeId = NodeId(0);

impl NodeId {
    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self == SENTINEL
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Filters a child link down to a real node, hiding absent links and the sentinel.
#[inline]
pub(crate) fn real(link: Link) -> Link {
    link.filter(|id| !id.is_sentinel())
}

pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) height: usize,
}

impl Links {
    pub(crate) fn leaf(parent: Link) -> Self {
        Self {
            parent,
            left: None,
            right: None,
            height: 0,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) links: Links,
}

#[derive(Clone)]
pub(crate) enum Slot<K> {
    Sentinel(Links),
    Occupied(Node<K>),
    // Next free slot.
    Vacant(Link),
}

impl<K> Slot<K> {
    #[inline]
    pub(crate) fn links(&self) -> &Links {
        match self {
            Slot::Sentinel(links) => links,
            Slot::Occupied(node) => &node.links,
            Slot::Vacant(_) => panic!("`Slot::links()` - slot is vacant!"),
        }
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links {
        match self {
            Slot::Sentinel(links) => links,
            Slot::Occupied(node) => &mut node.links,
            Slot::Vacant(_) => panic!("`Slot::links_mut()` - slot is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        match self {
            Slot::Occupied(node) => &node.key,
            _ => panic!("`Slot::key()` - slot holds no entry!"),
        }
    }
}

/// Node storage: one reserved sentinel slot followed by real nodes.
///
/// Keys and links live in `slots`, values in the parallel `values` column,
/// so that values can be borrowed mutably while links are read.
#[derive(Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K>>,
    values: Vec<Option<V>>,
    free: Link,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        let mut values = Vec::with_capacity(capacity + 1);
        slots.push(Slot::Sentinel(Self::empty_sentinel()));
        values.push(None);
        Self {
            slots,
            values,
            free: None,
        }
    }

    fn empty_sentinel() -> Links {
        Links {
            parent: None,
            left: Some(SENTINEL),
            right: Some(SENTINEL),
            height: 0,
        }
    }

    /// Makes sure the next `acquire` does not need to allocate.
    pub(crate) fn try_reserve_one(&mut self) -> Result<(), TryReserveError> {
        if self.free.is_none() {
            self.slots.try_reserve(1)?;
            self.values.try_reserve(1)?;
        }
        Ok(())
    }

    /// Stores a new node, reusing a released slot if there is one.
    pub(crate) fn acquire(&mut self, key: K, value: V, links: Links) -> NodeId {
        let node = Slot::Occupied(Node { key, links });
        match self.free {
            Some(id) => {
                self.free = match self.slots[id.index()] {
                    Slot::Vacant(next) => next,
                    _ => panic!("`Arena::acquire()` - free list is corrupt!"),
                };
                self.slots[id.index()] = node;
                self.values[id.index()] = Some(value);
                id
            }
            None => {
                self.slots.push(node);
                self.values.push(Some(value));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases a node slot and hands back its entry.
    pub(crate) fn release(&mut self, id: NodeId) -> (K, V) {
        debug_assert!(!id.is_sentinel());
        let slot = mem::replace(&mut self.slots[id.index()], Slot::Vacant(self.free));
        let value = self.values[id.index()].take();
        self.free = Some(id);
        match (slot, value) {
            (Slot::Occupied(node), Some(value)) => (node.key, value),
            _ => panic!("`Arena::release()` - `id` is not a node!"),
        }
    }

    /// Releases every node and resets the sentinel threads.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.values.truncate(1);
        self.slots[SENTINEL.index()] = Slot::Sentinel(Self::empty_sentinel());
        self.free = None;
    }

    /// Returns true if `id` names a live node (the sentinel is not one).
    pub(crate) fn is_node(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Occupied(_)))
    }

    #[inline]
    pub(crate) fn links(&self, id: NodeId) -> &Links {
        self.slots[id.index()].links()
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, id: NodeId) -> &mut Links {
        self.slots[id.index()].links_mut()
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        self.slots[id.index()].key()
    }

    #[cfg(test)]
    pub(crate) fn value(&self, id: NodeId) -> &V {
        self.values[id.index()]
            .as_ref()
            .expect("`Arena::value()` - `id` is not a node!")
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        self.values[id.index()]
            .as_mut()
            .expect("`Arena::value_mut()` - `id` is not a node!")
    }

    /// Exchanges the key/value storage of two nodes; links stay in place.
    pub(crate) fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (lo, hi) = if a.index() < b.index() {
            (a.index(), b.index())
        } else {
            (b.index(), a.index())
        };
        let (head, tail) = self.slots.split_at_mut(hi);
        match (&mut head[lo], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => mem::swap(&mut x.key, &mut y.key),
            _ => panic!("`Arena::swap_entries()` - both ids must be nodes!"),
        }
        self.values.swap(lo, hi);
    }

    pub(crate) fn view(&self) -> View<'_, K, V> {
        View {
            slots: &self.slots,
            values: &self.values,
        }
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    /// Splits into shared slots (keys and links) and mutable values.
    pub(crate) fn split_mut(&mut self) -> (&[Slot<K>], &mut [Option<V>]) {
        (&self.slots, &mut self.values)
    }
}

/// A shared, copyable view of the arena used by cursors and iterators.
pub(crate) struct View<'a, K, V> {
    slots: &'a [Slot<K>],
    values: &'a [Option<V>],
}

impl<K, V> Clone for View<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for View<'_, K, V> {}

impl<'a, K, V> View<'a, K, V> {
    /// Returns the entry stored at `id`, or `None` for the sentinel.
    #[inline]
    pub(crate) fn entry(self, id: NodeId) -> Option<(&'a K, &'a V)> {
        match (&self.slots[id.index()], &self.values[id.index()]) {
            (Slot::Occupied(node), Some(value)) => Some((&node.key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn successor(self, id: NodeId) -> NodeId {
        successor(self.slots, id)
    }

    #[inline]
    pub(crate) fn predecessor(self, id: NodeId) -> NodeId {
        predecessor(self.slots, id)
    }
}

/// Returns the node with the smallest key in the subtree at `id`.
/// The sentinel is its own leftmost node.
pub(crate) fn leftmost<K>(slots: &[Slot<K>], id: NodeId) -> NodeId {
    let mut current = id;
    if current.is_sentinel() {
        return current;
    }
    while let Some(left) = real(slots[current.index()].links().left) {
        current = left;
    }
    current
}

/// Returns the node with the largest key in the subtree at `id`.
/// The sentinel is its own rightmost node.
pub(crate) fn rightmost<K>(slots: &[Slot<K>], id: NodeId) -> NodeId {
    let mut current = id;
    if current.is_sentinel() {
        return current;
    }
    while let Some(right) = real(slots[current.index()].links().right) {
        current = right;
    }
    current
}

/// In-order successor. The maximum node steps to the sentinel and the
/// sentinel steps to the minimum node.
pub(crate) fn successor<K>(slots: &[Slot<K>], id: NodeId) -> NodeId {
    let links = slots[id.index()].links();
    if let Some(right) = links.right {
        return leftmost(slots, right);
    }
    let mut current = id;
    let mut parent = links.parent;
    while let Some(parent_id) = parent {
        let parent_links = slots[parent_id.index()].links();
        if parent_links.right != Some(current) {
            break;
        }
        current = parent_id;
        parent = parent_links.parent;
    }
    parent.unwrap_or(SENTINEL)
}

/// In-order predecessor. The minimum node steps to the sentinel and the
/// sentinel steps to the maximum node.
pub(crate) fn predecessor<K>(slots: &[Slot<K>], id: NodeId) -> NodeId {
    let links = slots[id.index()].links();
    if let Some(left) = links.left {
        return rightmost(slots, left);
    }
    let mut current = id;
    let mut parent = links.parent;
    while let Some(parent_id) = parent {
        let parent_links = slots[parent_id.index()].links();
        if parent_links.left != Some(current) {
            break;
        }
        current = parent_id;
        parent = parent_links.parent;
    }
    parent.unwrap_or(SENTINEL)
}
