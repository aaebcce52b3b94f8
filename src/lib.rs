//! An ordered map implemented with an AVL tree.
//!
//! The tree keeps a boundary node that is threaded to the smallest and the
//! largest entry. Stepping forwards or backwards from any position follows
//! node links only, and `first_key_value`/`last_key_value` are O(1).
//!
//! ```
//! use avlmap::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! for (key, value) in [(22, "a"), (26, "b"), (12, "c"), (1, "Tchuss")] {
//!     map.insert(key, value);
//! }
//! assert_eq!(map.insert(1, "Test").1, false);
//! assert_eq!(map.len(), 4);
//! assert_eq!(map.at(&1).ok(), Some(&"Tchuss"));
//!
//! let keys: Vec<_> = map.keys().rev().copied().collect();
//! assert_eq!(keys, vec![26, 22, 12, 1]);
//! ```

pub mod compare;
mod error;
mod map;
mod tree;

pub use compare::{Compare, Natural, Reverse};
pub use error::{Error, Result};
pub use map::{AvlTreeMap, Cursor, IntoIter, Iter, IterMut, Keys, Position, Range, Values, ValuesMut};
