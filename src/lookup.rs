//! Keyed lookup for formatter sets and key maps.
//!
//! [`apply_formatters_to_dict`](crate::applicators::apply_formatters_to_dict)
//! looks up a formatter per field and
//! [`apply_key_map`](crate::applicators::apply_key_map) looks up a new name
//! per key. Both accept anything implementing [`KeyedLookup`]: the std maps,
//! `IndexMap` (feature `indexmap`), or a plain list of pairs.
//!
//! Pair lists compare with `PartialEq`, so `[("x", f)]` can serve a mapping
//! keyed by `String`.
//!
//! ```rust
//! use applicators::lookup::KeyedLookup;
//!
//! let renames = [("blockHash", "block_hash"), ("gasUsed", "gas_used")];
//! assert_eq!(renames.lookup(&"gasUsed".to_string()), Some(&"gas_used"));
//! assert_eq!(renames.lookup(&"nonce".to_string()), None);
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Finds the entry registered for a key.
pub trait KeyedLookup<Q: ?Sized, T> {
    /// Returns the entry registered under `key`, if any.
    fn lookup(&self, key: &Q) -> Option<&T>;
}

impl<K, Q, T, S> KeyedLookup<Q, T> for HashMap<K, T, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.get(key)
    }
}

impl<K, Q, T> KeyedLookup<Q, T> for BTreeMap<K, T>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    #[inline]
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.get(key)
    }
}

#[cfg(feature = "indexmap")]
impl<K, Q, T, S> KeyedLookup<Q, T> for indexmap::IndexMap<K, T, S>
where
    K: Eq + Hash,
    Q: indexmap::Equivalent<K> + Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.get(key)
    }
}

// First match wins.
impl<K, Q, T> KeyedLookup<Q, T> for [(K, T)]
where
    K: PartialEq<Q>,
    Q: ?Sized,
{
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, entry)| entry)
    }
}

impl<K, Q, T, const N: usize> KeyedLookup<Q, T> for [(K, T); N]
where
    K: PartialEq<Q>,
    Q: ?Sized,
{
    #[inline]
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.as_slice().lookup(key)
    }
}

impl<K, Q, T> KeyedLookup<Q, T> for Vec<(K, T)>
where
    K: PartialEq<Q>,
    Q: ?Sized,
{
    #[inline]
    fn lookup(&self, key: &Q) -> Option<&T> {
        self.as_slice().lookup(key)
    }
}
