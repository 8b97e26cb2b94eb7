//! Shape-preserving reconstruction of containers.
//!
//! The combinators never build containers themselves. They take a container
//! apart, produce a lazy stream of new elements, and hand the stream back to
//! the container type to be reassembled. Two traits describe this contract:
//!
//! - [`SequenceRebuild`]: positional containers. A `Vec` is rebuilt as a
//!   `Vec`, a `(T, T)` tuple as a `(B, B)` tuple, a `[T; N]` array as a
//!   `[B; N]` array.
//! - [`MappingRebuild`]: keyed containers. A `HashMap` is rebuilt as a
//!   `HashMap` with the same hasher, a `BTreeMap` as a `BTreeMap`.
//!
//! # Streams of results
//!
//! Elements arrive as `Result<B, E>`. Rebuilding stops pulling at the first
//! `Err`, so formatters behind the failing one are never invoked, and the
//! partially built container is dropped.
//!
//! # Examples
//!
//! ```rust
//! use applicators::rebuild::SequenceRebuild;
//! use applicators::error::ArityError;
//!
//! let pair = (1, 2);
//! let doubled: Result<(i64, i64), ArityError> =
//!     <(i32, i32)>::rebuild(pair.into_items().map(|item| Ok(i64::from(item) * 2)));
//! assert_eq!(doubled, Ok((2, 4)));
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use arrayvec::ArrayVec;

use crate::error::ArityError;

/// A positional container that can be taken apart and rebuilt with new elements.
///
/// `WithItem<B>` is the same concrete container holding `B` instead of
/// `Item`, in the manner of a type constructor.
///
/// # Laws
///
/// Rebuilding the items of a container without changing them yields an
/// equal container:
///
/// ```text
/// C::rebuild(c.into_items().map(Ok)) == Ok(c)
/// ```
pub trait SequenceRebuild: Sized {
    /// The element type.
    type Item;

    /// The same container kind holding `B`.
    type WithItem<B>: SequenceRebuild<Item = B>;

    /// Iterator over the owned elements, in order.
    type IntoItems: Iterator<Item = Self::Item>;

    /// Number of elements.
    fn item_count(&self) -> usize;

    /// Takes the container apart.
    fn into_items(self) -> Self::IntoItems;

    /// Builds a container of this kind from a stream of results.
    ///
    /// Returns the first `Err` in the stream without pulling further
    /// items.
    ///
    /// # Errors
    ///
    /// Propagates the first error of `items`. Fixed-size containers return
    /// [`ArityError::ShapeMismatch`] when the stream has the wrong length.
    fn rebuild<B, E, I>(items: I) -> Result<Self::WithItem<B>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>;
}

impl<T> SequenceRebuild for Vec<T> {
    type Item = T;
    type WithItem<B> = Vec<B>;
    type IntoItems = std::vec::IntoIter<T>;

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn into_items(self) -> Self::IntoItems {
        self.into_iter()
    }

    fn rebuild<B, E, I>(items: I) -> Result<Vec<B>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>,
    {
        items.into_iter().collect()
    }
}

impl<T> SequenceRebuild for VecDeque<T> {
    type Item = T;
    type WithItem<B> = VecDeque<B>;
    type IntoItems = std::collections::vec_deque::IntoIter<T>;

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn into_items(self) -> Self::IntoItems {
        self.into_iter()
    }

    fn rebuild<B, E, I>(items: I) -> Result<VecDeque<B>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>,
    {
        items.into_iter().collect()
    }
}

impl<T> SequenceRebuild for Box<[T]> {
    type Item = T;
    type WithItem<B> = Box<[B]>;
    type IntoItems = std::vec::IntoIter<T>;

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn into_items(self) -> Self::IntoItems {
        self.into_vec().into_iter()
    }

    fn rebuild<B, E, I>(items: I) -> Result<Box<[B]>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>,
    {
        items.into_iter().collect()
    }
}

#[cfg(feature = "smallvec")]
impl<T, const N: usize> SequenceRebuild for smallvec::SmallVec<[T; N]> {
    type Item = T;
    type WithItem<B> = smallvec::SmallVec<[B; N]>;
    type IntoItems = smallvec::IntoIter<[T; N]>;

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn into_items(self) -> Self::IntoItems {
        self.into_iter()
    }

    fn rebuild<B, E, I>(items: I) -> Result<smallvec::SmallVec<[B; N]>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>,
    {
        items.into_iter().collect()
    }
}

/// Collects exactly `N` items into an array.
fn collect_fixed<B, E, I, const N: usize>(items: I) -> Result<[B; N], E>
where
    I: IntoIterator<Item = Result<B, E>>,
    E: From<ArityError>,
{
    let mut collected = ArrayVec::<B, N>::new();
    for item in items {
        collected
            .try_push(item?)
            .map_err(|_| ArityError::ShapeMismatch {
                expected: N,
                actual: N + 1,
            })?;
    }
    collected.into_inner().map_err(|partial| {
        ArityError::ShapeMismatch {
            expected: N,
            actual: partial.len(),
        }
        .into()
    })
}

impl<T, const N: usize> SequenceRebuild for [T; N] {
    type Item = T;
    type WithItem<B> = [B; N];
    type IntoItems = std::array::IntoIter<T, N>;

    #[inline]
    fn item_count(&self) -> usize {
        N
    }

    #[inline]
    fn into_items(self) -> Self::IntoItems {
        self.into_iter()
    }

    fn rebuild<B, E, I>(items: I) -> Result<[B; N], E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        E: From<ArityError>,
    {
        collect_fixed(items)
    }
}

// Expands to its second argument once per element name.
macro_rules! homogeneous {
    ($_element:ident, $item:ty) => {
        $item
    };
}

macro_rules! impl_tuple_rebuild {
    ($arity:literal => $($element:ident),+) => {
        impl<T> SequenceRebuild for ($(homogeneous!($element, T),)+) {
            type Item = T;
            type WithItem<B> = ($(homogeneous!($element, B),)+);
            type IntoItems = std::array::IntoIter<T, $arity>;

            #[inline]
            fn item_count(&self) -> usize {
                $arity
            }

            #[inline]
            fn into_items(self) -> Self::IntoItems {
                <[T; $arity]>::from(self).into_iter()
            }

            fn rebuild<B, E, I>(items: I) -> Result<Self::WithItem<B>, E>
            where
                I: IntoIterator<Item = Result<B, E>>,
                E: From<ArityError>,
            {
                collect_fixed::<B, E, I, $arity>(items).map(Into::into)
            }
        }
    };
}

impl_tuple_rebuild!(1 => first);
impl_tuple_rebuild!(2 => first, second);
impl_tuple_rebuild!(3 => first, second, third);
impl_tuple_rebuild!(4 => first, second, third, fourth);
impl_tuple_rebuild!(5 => first, second, third, fourth, fifth);
impl_tuple_rebuild!(6 => first, second, third, fourth, fifth, sixth);
impl_tuple_rebuild!(7 => first, second, third, fourth, fifth, sixth, seventh);
impl_tuple_rebuild!(8 => first, second, third, fourth, fifth, sixth, seventh, eighth);

/// A keyed container that can be taken apart and refilled.
///
/// Rebuilding starts from [`empty_like`](MappingRebuild::empty_like), an
/// empty container of the same concrete type configured like the original
/// (for a `HashMap`, the same hasher), and inserts entries in the order they
/// arrive. Inserting a key twice keeps the later value.
pub trait MappingRebuild: Sized {
    /// The key type.
    type Key;

    /// The value type.
    type Value;

    /// Iterator over the owned entries, in the container's iteration order.
    type IntoEntries: Iterator<Item = (Self::Key, Self::Value)>;

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Returns an empty container of the same concrete type.
    #[must_use]
    fn empty_like(&self) -> Self;

    /// Inserts an entry, replacing the value of an existing key.
    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);

    /// Takes the container apart.
    fn into_entries(self) -> Self::IntoEntries;

    /// Fills this container from a stream of results.
    ///
    /// # Errors
    ///
    /// Returns the first `Err` of `entries` without pulling further entries.
    fn rebuild<E, I>(mut self, entries: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<(Self::Key, Self::Value), E>>,
    {
        for entry in entries {
            let (key, value) = entry?;
            self.insert_entry(key, value);
        }
        Ok(self)
    }
}

impl<K, V, S> MappingRebuild for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;
    type IntoEntries = std::collections::hash_map::IntoIter<K, V>;

    #[inline]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity_and_hasher(self.len(), self.hasher().clone())
    }

    #[inline]
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

impl<K: Ord, V> MappingRebuild for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    type IntoEntries = std::collections::btree_map::IntoIter<K, V>;

    #[inline]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }

    #[inline]
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

#[cfg(feature = "indexmap")]
impl<K, V, S> MappingRebuild for indexmap::IndexMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;
    type IntoEntries = indexmap::map::IntoIter<K, V>;

    #[inline]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity_and_hasher(self.len(), self.hasher().clone())
    }

    // An existing key keeps its first position.
    #[inline]
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

#[cfg(feature = "json")]
impl MappingRebuild for serde_json::Map<String, serde_json::Value> {
    type Key = String;
    type Value = serde_json::Value;
    type IntoEntries = serde_json::map::IntoIter;

    #[inline]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity(self.len())
    }

    #[inline]
    fn insert_entry(&mut self, key: String, value: serde_json::Value) {
        self.insert(key, value);
    }

    #[inline]
    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keep<T>(items: impl Iterator<Item = T>) -> impl Iterator<Item = Result<T, ArityError>> {
        items.map(Ok)
    }

    #[test]
    fn vec_rebuilds_as_vec() {
        let rebuilt = Vec::<i32>::rebuild(keep(vec![1, 2, 3].into_items()));
        assert_eq!(rebuilt, Ok(vec![1, 2, 3]));
    }

    #[test]
    fn tuple_item_count_is_arity() {
        assert_eq!((1, 2, 3).item_count(), 3);
        assert_eq!((1,).item_count(), 1);
    }

    #[test]
    fn tuple_rebuild_changes_element_type() {
        let rebuilt = <(i32, i32, i32)>::rebuild((1, 2, 3).into_items().map(|item| {
            Ok::<_, ArityError>(item.to_string())
        }));
        assert_eq!(
            rebuilt,
            Ok(("1".to_string(), "2".to_string(), "3".to_string()))
        );
    }

    #[rstest]
    #[case(vec![1], 1)]
    #[case(vec![1, 2, 3, 4], 4)]
    fn array_rebuild_rejects_wrong_length(#[case] items: Vec<i32>, #[case] actual: usize) {
        let rebuilt = <[i32; 3]>::rebuild(keep(items.into_iter()));
        assert_eq!(
            rebuilt,
            Err(ArityError::ShapeMismatch {
                expected: 3,
                actual,
            })
        );
    }

    #[test]
    fn rebuild_stops_at_first_error() {
        let mut pulled = 0;
        let items = (0..5).map(|item| {
            pulled += 1;
            if item == 1 {
                Err(ArityError::NotEnoughValues {
                    length: 0,
                    required: 1,
                })
            } else {
                Ok(item)
            }
        });
        let rebuilt = Vec::<i32>::rebuild(items);
        assert!(rebuilt.is_err());
        assert_eq!(pulled, 2);
    }

    #[test]
    fn hash_map_empty_like_is_empty() {
        let map: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert_eq!(map.empty_like().entry_count(), 0);
        assert_eq!(map.entry_count(), 1);
    }

    #[test]
    fn mapping_rebuild_keeps_later_value_on_collision() {
        let shell: BTreeMap<&str, i32> = BTreeMap::new();
        let rebuilt = shell.rebuild([Ok::<_, ArityError>(("a", 1)), Ok(("a", 2))]);
        assert_eq!(rebuilt, Ok([("a", 2)].into_iter().collect()));
    }
}
