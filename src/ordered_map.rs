use crate::error::Result;

/// The capability set every balancing strategy provides.
///
/// All four maps in this crate behave identically through this trait; they
/// differ only in how they keep themselves balanced. Code written against
/// `OrderedMap` can therefore swap one strategy for another without any
/// observable change apart from performance and [`height`](Self::height).
///
/// The trait is object safe, so `&mut dyn OrderedMap<K, V>` works as well as
/// generics.
///
/// # Examples
///
/// ```
/// use balanced_maps::{BTree, Error, OrderedMap, RedBlackTree, Treap, WeightBalancedTree};
///
/// fn exercise(map: &mut dyn OrderedMap<u32, &'static str>) {
///     map.insert(2, "two");
///     map.insert(1, "one");
///     map.insert(2, "deux");
///
///     assert_eq!(map.size(), 2);
///     assert_eq!(map.find(&2), Ok(&mut "deux"));
///     assert_eq!(map.delete(&3), Err(Error::KeyNotFound));
///
///     map.delete(&1).unwrap();
///     assert_eq!(map.find(&1), Err(Error::KeyNotFound));
/// }
///
/// exercise(&mut WeightBalancedTree::<u32, &str>::new());
/// exercise(&mut RedBlackTree::<u32, &str>::new());
/// exercise(&mut Treap::<u32, &str>::with_seed(7));
/// exercise(&mut BTree::<u32, &str, 3>::new());
/// ```
pub trait OrderedMap<K: Ord, V> {
    /// Stores `value` under `key`.
    ///
    /// A new key grows the map by exactly one entry. An existing key has its
    /// value replaced in place and the size is unchanged.
    fn insert(&mut self, key: K, value: V);

    /// Removes the entry for `key`, shrinking the map by exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if `key` is
    /// not present; the map is not modified.
    fn delete(&mut self, key: &K) -> Result<()>;

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// The reference borrows the map, so it cannot be held across a later
    /// `insert` or `delete`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if `key` is
    /// not present.
    fn find(&mut self, key: &K) -> Result<&mut V>;

    /// Returns a shared reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if `key` is
    /// not present.
    fn get(&self, key: &K) -> Result<&V>;

    /// Number of distinct keys stored. O(1).
    fn size(&self) -> usize;

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    ///
    /// Computed by visiting every node, so this is O(n).
    fn height(&self) -> usize;

    /// Removes every entry.
    fn clear(&mut self);

    /// Returns `true` if `key` is stored.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Implements [`OrderedMap`] for a map type by forwarding to its inherent
/// methods of the same names.
macro_rules! forward_ordered_map {
    ([$($generic:tt)*] $map:ty) => {
        impl<$($generic)*> $crate::OrderedMap<K, V> for $map {
            #[inline]
            fn insert(&mut self, key: K, value: V) {
                Self::insert(self, key, value);
            }

            #[inline]
            fn delete(&mut self, key: &K) -> $crate::Result<()> {
                Self::delete(self, key)
            }

            #[inline]
            fn find(&mut self, key: &K) -> $crate::Result<&mut V> {
                Self::find(self, key)
            }

            #[inline]
            fn get(&self, key: &K) -> $crate::Result<&V> {
                Self::get(self, key)
            }

            #[inline]
            fn size(&self) -> usize {
                Self::size(self)
            }

            #[inline]
            fn height(&self) -> usize {
                Self::height(self)
            }

            #[inline]
            fn clear(&mut self) {
                Self::clear(self);
            }

            #[inline]
            fn contains_key(&self, key: &K) -> bool {
                Self::contains_key(self, key)
            }

            #[inline]
            fn is_empty(&self) -> bool {
                Self::is_empty(self)
            }
        }
    };
}

pub(crate) use forward_ordered_map;
