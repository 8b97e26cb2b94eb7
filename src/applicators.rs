//! Formatter-application combinators.
//!
//! Each combinator applies one or more formatters to a structured value and
//! returns a value of the same concrete container kind:
//!
//! | Combinator | Input | Formatters |
//! |---|---|---|
//! | [`apply_formatter_at_index`] | sequence | one, at one position |
//! | [`apply_formatters_to_sequence`] | sequence | one per position |
//! | [`apply_formatter_if`] | single value | one, gated by a condition |
//! | [`apply_formatters_to_dict`] | mapping | one per key |
//! | [`apply_formatter_to_array`] | sequence | one, for every element |
//! | [`apply_one_of_formatters`] | single value | first whose condition holds |
//! | [`apply_key_map`] | mapping | renames keys |
//!
//! Arity checks run before any formatter is invoked. Formatter failures stop
//! the traversal at the failing element and discard everything produced so
//! far.
//!
//! # Examples
//!
//! ```rust
//! use applicators::applicators::{apply_formatter_at_index, apply_formatters_to_dict};
//! use applicators::error::FormatError;
//! use std::collections::BTreeMap;
//!
//! fn hex_to_int(value: String) -> Result<String, FormatError> {
//!     let digits = value.trim_start_matches("0x");
//!     u64::from_str_radix(digits, 16)
//!         .map(|number| number.to_string())
//!         .map_err(|error| FormatError::value_error(error.to_string()))
//! }
//!
//! let log = ("0x1a".to_string(), "transfer".to_string());
//! let log = apply_formatter_at_index(hex_to_int, 0, log);
//! assert_eq!(log, Ok(("26".to_string(), "transfer".to_string())));
//!
//! let block: BTreeMap<&str, String> =
//!     [("number", "0xff".to_string()), ("miner", "0xabc".to_string())].into_iter().collect();
//! let block = apply_formatters_to_dict(&[("number", hex_to_int)], block);
//! assert_eq!(block.map(|block| block["number"].clone()), Ok("255".to_string()));
//! ```

use std::fmt::Debug;

use crate::error::{ApplyError, ArityError, Classify, FieldError, NoMatchError};
use crate::lookup::KeyedLookup;
use crate::rebuild::{MappingRebuild, SequenceRebuild};

/// Applies `formatter` to the element at `at_index`, leaving the others unchanged.
///
/// The formatter is invoked exactly once.
///
/// # Errors
///
/// - [`ArityError::NotEnoughValues`] if `at_index + 1` exceeds the length
///   of `sequence`; the formatter is not invoked.
/// - [`ApplyError::Formatter`] with the formatter's own error.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_formatter_at_index;
/// use applicators::formatter::total;
///
/// let negated = apply_formatter_at_index(total(|value: i32| -value), 1, vec![1, 2, 3]);
/// assert_eq!(negated, Ok(vec![1, -2, 3]));
///
/// let out_of_range = apply_formatter_at_index(total(|value: i32| -value), 3, vec![1, 2, 3]);
/// assert!(out_of_range.is_err());
/// ```
pub fn apply_formatter_at_index<S, F, E>(
    formatter: F,
    at_index: usize,
    sequence: S,
) -> Result<S::WithItem<S::Item>, ApplyError<E>>
where
    S: SequenceRebuild,
    F: FnOnce(S::Item) -> Result<S::Item, E>,
{
    let length = sequence.item_count();
    if at_index >= length {
        let required = at_index.saturating_add(1);
        tracing::debug!(length, required, "index is beyond the end of the sequence");
        return Err(ArityError::NotEnoughValues { length, required }.into());
    }

    let mut formatter = Some(formatter);
    S::rebuild(
        sequence
            .into_items()
            .enumerate()
            .map(|(index, item)| {
                if index == at_index
                    && let Some(format) = formatter.take()
                {
                    return format(item).map_err(ApplyError::Formatter);
                }
                Ok(item)
            }),
    )
}

/// Applies each formatter to the element at the same position.
///
/// Formatters run lazily, in positional order. The output container may hold
/// a different element type than the input.
///
/// # Errors
///
/// - [`ArityError::TooManyFormatters`] or [`ArityError::TooFewFormatters`]
///   when the counts differ; no formatter is invoked. The message carries
///   both counts and the `Debug` rendering of `sequence`.
/// - [`ApplyError::Formatter`] with the first formatter error, unmodified.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_formatters_to_sequence;
/// use applicators::error::FormatError;
///
/// fn parse(text: &str) -> Result<i64, FormatError> {
///     text.parse().map_err(|_| FormatError::value_error(format!("not a number: {text}")))
/// }
///
/// let parsed = apply_formatters_to_sequence([parse, parse], ("7", "-3"));
/// assert_eq!(parsed, Ok((7, -3)));
///
/// let mismatch = apply_formatters_to_sequence([parse], ("7", "-3"));
/// assert_eq!(
///     mismatch.unwrap_err().to_string(),
///     "Too few formatters for sequence: 1 formatters for 2 elements in (\"7\", \"-3\")"
/// );
/// ```
pub fn apply_formatters_to_sequence<S, I, F, B, E>(
    formatters: I,
    sequence: S,
) -> Result<S::WithItem<B>, ApplyError<E>>
where
    S: SequenceRebuild + Debug,
    I: IntoIterator<Item = F>,
    I::IntoIter: ExactSizeIterator,
    F: FnOnce(S::Item) -> Result<B, E>,
{
    let formatters = formatters.into_iter();
    if let Some(error) =
        ArityError::check_formatter_count(formatters.len(), sequence.item_count(), &sequence)
    {
        tracing::debug!(%error, "formatter count does not match the sequence");
        return Err(error.into());
    }

    S::rebuild(
        formatters
            .zip(sequence.into_items())
            .map(|(formatter, item)| formatter(item).map_err(ApplyError::Formatter)),
    )
}

/// Applies `formatter` when `condition` holds, otherwise returns `value` as is.
///
/// # Errors
///
/// Returns the formatter's error unmodified.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_formatter_if;
/// use std::convert::Infallible;
///
/// let negate = |value: i32| Ok::<_, Infallible>(-value);
/// assert_eq!(apply_formatter_if(|value: &i32| *value > 5, negate, 3), Ok(3));
/// assert_eq!(apply_formatter_if(|value: &i32| *value > 5, negate, 10), Ok(-10));
/// ```
pub fn apply_formatter_if<A, C, F, E>(condition: C, formatter: F, value: A) -> Result<A, E>
where
    C: FnOnce(&A) -> bool,
    F: FnOnce(A) -> Result<A, E>,
{
    if condition(&value) {
        formatter(value)
    } else {
        Ok(value)
    }
}

/// Applies the formatter registered for each key, passing other entries through.
///
/// `formatters` may name keys absent from `mapping`; those formatters are
/// not used.
///
/// The formatter consumes the value, so the value is rendered with `Debug`
/// before every formatted field in case it has to be reported. Use
/// [`apply_borrowing_formatters_to_dict`] to render only on failure.
///
/// # Errors
///
/// - [`ApplyError::Field`] when a formatter fails with an
///   [`ErrorKind::Type`](crate::error::ErrorKind::Type) or
///   [`ErrorKind::Value`](crate::error::ErrorKind::Value) error. The error
///   names the field and value and keeps the original error as its cause.
/// - [`ApplyError::Formatter`] for any other formatter error, unmodified.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_formatters_to_dict;
/// use applicators::error::{ApplyError, FormatError};
/// use std::collections::HashMap;
///
/// fn positive(value: i64) -> Result<i64, FormatError> {
///     if value > 0 {
///         Ok(value)
///     } else {
///         Err(FormatError::value_error("must be positive"))
///     }
/// }
///
/// let transaction: HashMap<&str, i64> = [("gas", -1), ("nonce", 0)].into_iter().collect();
/// let error = apply_formatters_to_dict(&[("gas", positive)], transaction).unwrap_err();
/// assert_eq!(error.to_string(), "Could not format value -1 as field \"gas\"");
/// assert!(matches!(error, ApplyError::Field(_)));
/// ```
pub fn apply_formatters_to_dict<M, L, F, E>(formatters: &L, mapping: M) -> Result<M, ApplyError<E>>
where
    M: MappingRebuild,
    M::Key: Debug,
    M::Value: Debug,
    L: KeyedLookup<M::Key, F> + ?Sized,
    F: Fn(M::Value) -> Result<M::Value, E>,
    E: Classify,
{
    let shell = mapping.empty_like();
    shell.rebuild(mapping.into_entries().map(|(key, item)| {
        let Some(formatter) = formatters.lookup(&key) else {
            return Ok((key, item));
        };
        let rendered = format!("{item:?}");
        match formatter(item) {
            Ok(output) => Ok((key, output)),
            Err(error) => Err(field_failure(&key, rendered, error)),
        }
    }))
}

/// Like [`apply_formatters_to_dict`], with formatters that borrow the value.
///
/// The value is rendered with `Debug` only when its formatter fails.
///
/// # Errors
///
/// Same as [`apply_formatters_to_dict`].
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_borrowing_formatters_to_dict;
/// use applicators::error::FormatError;
/// use std::collections::BTreeMap;
///
/// fn trimmed(value: &String) -> Result<String, FormatError> {
///     Ok(value.trim().to_string())
/// }
///
/// let block: BTreeMap<&str, String> = [("miner", " 0xabc ".to_string())].into_iter().collect();
/// let block = apply_borrowing_formatters_to_dict(&[("miner", trimmed)], block);
/// assert_eq!(block.map(|block| block["miner"].clone()), Ok("0xabc".to_string()));
/// ```
pub fn apply_borrowing_formatters_to_dict<M, L, F, E>(
    formatters: &L,
    mapping: M,
) -> Result<M, ApplyError<E>>
where
    M: MappingRebuild,
    M::Key: Debug,
    M::Value: Debug,
    L: KeyedLookup<M::Key, F> + ?Sized,
    F: Fn(&M::Value) -> Result<M::Value, E>,
    E: Classify,
{
    let shell = mapping.empty_like();
    shell.rebuild(mapping.into_entries().map(|(key, item)| {
        let Some(formatter) = formatters.lookup(&key) else {
            return Ok((key, item));
        };
        match formatter(&item) {
            Ok(output) => Ok((key, output)),
            Err(error) => Err(field_failure(&key, format!("{item:?}"), error)),
        }
    }))
}

/// Wraps a retaggable formatter error with the field it failed on.
fn field_failure<K: Debug, E: Classify>(key: &K, rendered: String, error: E) -> ApplyError<E> {
    if !error.error_kind().is_field_retaggable() {
        return ApplyError::Formatter(error);
    }
    let field = format!("{key:?}");
    tracing::debug!(
        field = %field,
        value = %rendered,
        kind = %error.error_kind(),
        "field formatter failed"
    );
    FieldError::new(field, rendered, error).into()
}

/// Applies `formatter` to every element, in order.
///
/// Any length is accepted, including zero.
///
/// # Errors
///
/// Returns the first formatter error as [`ApplyError::Formatter`].
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_formatter_to_array;
/// use applicators::formatter::total;
///
/// assert_eq!(apply_formatter_to_array(total(|value: i32| value * 2), vec![1, 2, 3]), Ok(vec![2, 4, 6]));
/// assert_eq!(apply_formatter_to_array(total(|value: i32| value * 2), Vec::new()), Ok(vec![]));
/// ```
pub fn apply_formatter_to_array<S, F, B, E>(
    mut formatter: F,
    collection: S,
) -> Result<S::WithItem<B>, ApplyError<E>>
where
    S: SequenceRebuild,
    F: FnMut(S::Item) -> Result<B, E>,
{
    S::rebuild(
        collection
            .into_items()
            .map(|item| formatter(item).map_err(ApplyError::Formatter)),
    )
}

/// Applies the formatter of the first pair whose condition holds for `value`.
///
/// Conditions are evaluated in order and evaluation stops at the first match.
///
/// # Errors
///
/// - [`NoMatchError`] when no condition holds.
/// - [`ApplyError::Formatter`] with the selected formatter's error.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_one_of_formatters;
/// use applicators::formatter::{BoxedCondition, BoxedFormatter, boxed, condition};
/// use std::convert::Infallible;
///
/// let pairs: Vec<(BoxedCondition<'_, i64>, BoxedFormatter<'_, i64, String, Infallible>)> = vec![
///     (
///         condition(|value: &i64| *value < 0),
///         boxed(|value: i64| Ok(format!("-0x{:x}", -value))),
///     ),
///     (
///         condition(|_: &i64| true),
///         boxed(|value: i64| Ok(format!("0x{value:x}"))),
///     ),
/// ];
/// assert_eq!(apply_one_of_formatters(pairs, 255), Ok("0xff".to_string()));
/// ```
pub fn apply_one_of_formatters<A, P, C, F, B, E>(
    formatter_condition_pairs: P,
    value: A,
) -> Result<B, ApplyError<E>>
where
    P: IntoIterator<Item = (C, F)>,
    C: FnOnce(&A) -> bool,
    F: FnOnce(A) -> Result<B, E>,
{
    let Some(formatter) = formatter_condition_pairs
        .into_iter()
        .find_map(|(condition, formatter)| condition(&value).then_some(formatter))
    else {
        tracing::debug!("no formatter condition matched the value");
        return Err(NoMatchError.into());
    };
    formatter(value).map_err(ApplyError::Formatter)
}

/// Renames the keys of `mapping` listed in `key_mappings`.
///
/// Values are untouched and keys without a mapping pass through. When two
/// keys are renamed to the same name, the entry visited last keeps its value.
///
/// # Examples
///
/// ```rust
/// use applicators::applicators::apply_key_map;
/// use std::collections::HashMap;
///
/// let value: HashMap<String, i32> =
///     [("old".to_string(), 1), ("keep".to_string(), 2)].into_iter().collect();
/// let renamed = apply_key_map(&[("old", "new")], value);
/// let expected: HashMap<String, i32> =
///     [("new".to_string(), 1), ("keep".to_string(), 2)].into_iter().collect();
/// assert_eq!(renamed, expected);
/// ```
pub fn apply_key_map<M, L, T>(key_mappings: &L, mapping: M) -> M
where
    M: MappingRebuild,
    L: KeyedLookup<M::Key, T> + ?Sized,
    T: Clone + Into<M::Key>,
{
    let mut renamed = mapping.empty_like();
    for (key, item) in mapping.into_entries() {
        let key = key_mappings
            .lookup(&key)
            .map_or(key, |target| target.clone().into());
        renamed.insert_entry(key, item);
    }
    renamed
}
