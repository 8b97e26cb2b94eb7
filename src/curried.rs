//! Partially applied combinators.
//!
//! Every function here fixes the formatter arguments of the combinator of the
//! same name in [`crate::applicators`] and returns a closure over the
//! structured value. The closures can be called any number of times, which
//! makes them suitable as formatters themselves: a curried combinator can be
//! registered for a field of a mapping, or applied to every element of a
//! list.
//!
//! # Examples
//!
//! ```rust
//! use applicators::curried;
//! use applicators::error::FormatError;
//!
//! fn double(value: i64) -> Result<i64, FormatError> {
//!     Ok(value * 2)
//! }
//!
//! let mut double_all = curried::apply_formatter_to_array::<Vec<i64>, _, _, _>(double);
//! assert_eq!(double_all(vec![1, 2]), Ok(vec![2, 4]));
//! assert_eq!(double_all(vec![5]), Ok(vec![10]));
//! ```

use std::fmt::Debug;

use crate::applicators;
use crate::error::{ApplyError, Classify};
use crate::lookup::KeyedLookup;
use crate::rebuild::{MappingRebuild, SequenceRebuild};

/// Fixes the formatter and index of [`applicators::apply_formatter_at_index`].
pub fn apply_formatter_at_index<S, F, E>(
    mut formatter: F,
    at_index: usize,
) -> impl FnMut(S) -> Result<S::WithItem<S::Item>, ApplyError<E>>
where
    S: SequenceRebuild,
    F: FnMut(S::Item) -> Result<S::Item, E>,
{
    move |sequence| applicators::apply_formatter_at_index(&mut formatter, at_index, sequence)
}

/// Fixes the formatters of [`applicators::apply_formatters_to_sequence`].
///
/// The formatters are collected once and shared by every call.
///
/// ```rust
/// use applicators::curried;
/// use applicators::error::FormatError;
///
/// fn checked_byte(value: u32) -> Result<u8, FormatError> {
///     u8::try_from(value).map_err(|error| FormatError::value_error(error.to_string()))
/// }
///
/// let to_bytes = curried::apply_formatters_to_sequence::<[u32; 2], _, _, _, _>([checked_byte, checked_byte]);
/// assert_eq!(to_bytes([1, 255]), Ok([1u8, 255u8]));
/// assert!(to_bytes([1, 256]).is_err());
/// ```
pub fn apply_formatters_to_sequence<S, I, F, B, E>(
    formatters: I,
) -> impl Fn(S) -> Result<S::WithItem<B>, ApplyError<E>>
where
    S: SequenceRebuild + Debug,
    I: IntoIterator<Item = F>,
    F: Fn(S::Item) -> Result<B, E>,
{
    let formatters: Vec<F> = formatters.into_iter().collect();
    move |sequence| applicators::apply_formatters_to_sequence(formatters.iter(), sequence)
}

/// Fixes the condition and formatter of [`applicators::apply_formatter_if`].
pub fn apply_formatter_if<A, C, F, E>(
    mut condition: C,
    mut formatter: F,
) -> impl FnMut(A) -> Result<A, E>
where
    C: FnMut(&A) -> bool,
    F: FnMut(A) -> Result<A, E>,
{
    move |value| applicators::apply_formatter_if(&mut condition, &mut formatter, value)
}

/// Fixes the formatter set of [`applicators::apply_formatters_to_dict`].
pub fn apply_formatters_to_dict<M, L, F, E>(formatters: L) -> impl Fn(M) -> Result<M, ApplyError<E>>
where
    M: MappingRebuild,
    M::Key: Debug,
    M::Value: Debug,
    L: KeyedLookup<M::Key, F>,
    F: Fn(M::Value) -> Result<M::Value, E>,
    E: Classify,
{
    move |mapping| applicators::apply_formatters_to_dict(&formatters, mapping)
}

/// Fixes the formatter of [`applicators::apply_formatter_to_array`].
pub fn apply_formatter_to_array<S, F, B, E>(
    mut formatter: F,
) -> impl FnMut(S) -> Result<S::WithItem<B>, ApplyError<E>>
where
    S: SequenceRebuild,
    F: FnMut(S::Item) -> Result<B, E>,
{
    move |collection| applicators::apply_formatter_to_array(&mut formatter, collection)
}

/// Fixes the pairs of [`applicators::apply_one_of_formatters`].
pub fn apply_one_of_formatters<A, P, C, F, B, E>(
    formatter_condition_pairs: P,
) -> impl Fn(A) -> Result<B, ApplyError<E>>
where
    P: IntoIterator<Item = (C, F)>,
    C: Fn(&A) -> bool,
    F: Fn(A) -> Result<B, E>,
{
    let pairs: Vec<(C, F)> = formatter_condition_pairs.into_iter().collect();
    move |value| {
        applicators::apply_one_of_formatters(
            pairs.iter().map(|(condition, formatter)| (condition, formatter)),
            value,
        )
    }
}

/// Fixes the key mapping of [`applicators::apply_key_map`].
///
/// ```rust
/// use applicators::curried;
/// use std::collections::BTreeMap;
///
/// let rename = curried::apply_key_map::<BTreeMap<String, u8>, _, _>([("from", "sender")]);
/// let message: BTreeMap<String, u8> = [("from".to_string(), 1)].into_iter().collect();
/// let renamed = rename(message);
/// assert_eq!(renamed.get("sender"), Some(&1));
/// ```
pub fn apply_key_map<M, L, T>(key_mappings: L) -> impl Fn(M) -> M
where
    M: MappingRebuild,
    L: KeyedLookup<M::Key, T>,
    T: Clone + Into<M::Key>,
{
    move |mapping| applicators::apply_key_map(&key_mappings, mapping)
}
