//! Formatter helpers.
//!
//! A formatter is any closure `FnMut(A) -> Result<B, E>`. The combinators
//! accept formatters generically; this module adds the few pieces that make
//! them convenient to write:
//!
//! - [`identity`]: the formatter that changes nothing
//! - [`total`]: lifts an infallible function into a formatter
//! - [`boxed`] and [`condition`]: erase closure types so that formatters of
//!   different closures fit in one list
//!
//! # Examples
//!
//! ```rust
//! use applicators::applicators::apply_formatters_to_sequence;
//! use applicators::error::FormatError;
//! use applicators::formatter::{BoxedFormatter, boxed};
//!
//! let formatters: Vec<BoxedFormatter<'_, i32, i32, FormatError>> = vec![
//!     boxed(|value: i32| Ok(value + 1)),
//!     boxed(|value: i32| Ok(value * 10)),
//! ];
//! assert_eq!(apply_formatters_to_sequence(formatters, (1, 2)), Ok((2, 20)));
//! ```

use std::convert::Infallible;

/// A type-erased formatter.
pub type BoxedFormatter<'a, A, B, E> = Box<dyn Fn(A) -> Result<B, E> + 'a>;

/// A type-erased condition.
pub type BoxedCondition<'a, A> = Box<dyn Fn(&A) -> bool + 'a>;

/// Returns the value unchanged.
///
/// Formatting through `identity` with any combinator yields a value equal
/// to the input.
///
/// ```rust
/// use applicators::applicators::apply_formatter_to_array;
/// use applicators::error::FormatError;
/// use applicators::formatter::identity;
///
/// let values = vec![1, 2, 3];
/// let formatted = apply_formatter_to_array(identity::<i32, FormatError>, values.clone());
/// assert_eq!(formatted, Ok(values));
/// ```
///
/// # Errors
///
/// Never fails; `E` only fixes the error type expected by the caller.
#[inline]
pub const fn identity<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Lifts an infallible function into a formatter that never fails.
///
/// ```rust
/// use applicators::applicators::apply_formatter_to_array;
/// use applicators::formatter::total;
///
/// let doubled = apply_formatter_to_array(total(|value: i32| value * 2), vec![1, 2, 3]);
/// assert_eq!(doubled, Ok(vec![2, 4, 6]));
/// ```
#[inline]
pub fn total<A, B, F>(mut function: F) -> impl FnMut(A) -> Result<B, Infallible>
where
    F: FnMut(A) -> B,
{
    move |value| Ok(function(value))
}

/// Boxes a formatter.
#[inline]
pub fn boxed<'a, A, B, E, F>(formatter: F) -> BoxedFormatter<'a, A, B, E>
where
    F: Fn(A) -> Result<B, E> + 'a,
{
    Box::new(formatter)
}

/// Boxes a condition.
#[inline]
pub fn condition<'a, A, C>(predicate: C) -> BoxedCondition<'a, A>
where
    C: Fn(&A) -> bool + 'a,
{
    Box::new(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        assert_eq!(identity::<_, Infallible>("hello"), Ok("hello"));
    }

    #[test]
    fn identity_is_usable_in_const_context() {
        const ANSWER: Result<u8, Infallible> = identity(42);
        assert_eq!(ANSWER, Ok(42));
    }

    #[test]
    fn total_never_fails() {
        let mut length = total(|text: &str| text.len());
        assert_eq!(length("four"), Ok(4));
    }

    #[test]
    fn boxed_formatters_share_one_type() {
        let formatters: Vec<BoxedFormatter<'_, i32, String, Infallible>> = vec![
            boxed(|value: i32| Ok(value.to_string())),
            boxed(|value: i32| Ok(format!("#{value}"))),
        ];
        let outputs: Vec<_> = formatters.iter().map(|formatter| formatter(7)).collect();
        assert_eq!(outputs, vec![Ok("7".to_string()), Ok("#7".to_string())]);
    }

    #[test]
    fn condition_boxes_predicate() {
        let is_positive = condition(|value: &i32| *value > 0);
        assert!(is_positive(&3));
        assert!(!is_positive(&-3));
    }
}
