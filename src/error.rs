//! Error types for the formatter combinators.
//!
//! Every combinator that can fail returns an [`ApplyError`], which separates
//! failures detected by the combinator itself from failures raised by the
//! user-supplied formatters:
//!
//! - [`ArityError`]: formatter count or index does not fit the sequence
//!   (an [`ErrorKind::Index`] failure, raised before any formatter runs)
//! - [`NoMatchError`]: no condition accepted the value ([`ErrorKind::Value`])
//! - [`FieldError`]: a formatter failed with a type or value error while
//!   processing a named field; the original error is kept as the cause
//! - [`ApplyError::Formatter`]: any other formatter error, passed through
//!
//! Formatter errors report what kind of failure they represent through the
//! [`Classify`] trait. Only [`ErrorKind::Type`] and [`ErrorKind::Value`]
//! failures are re-tagged with field context.
//!
//! # Examples
//!
//! ```rust
//! use applicators::error::{Classify, ErrorKind, FormatError};
//!
//! let error = FormatError::value_error("not a hex string");
//! assert_eq!(error.error_kind(), ErrorKind::Value);
//! assert_eq!(error.to_string(), "ValueError: not a hex string");
//! ```

use std::convert::Infallible;
use std::fmt;

/// The category of a formatting failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A position or count did not fit the structure being formatted.
    Index,
    /// The value had the wrong type for the formatter.
    Type,
    /// The value had the right type but an unacceptable content.
    Value,
    /// Any failure outside the categories above.
    Other,
}

impl ErrorKind {
    /// Returns `true` for the kinds that keyed combinators enrich with field context.
    #[inline]
    #[must_use]
    pub const fn is_field_retaggable(self) -> bool {
        matches!(self, Self::Type | Self::Value)
    }

    /// Returns the conventional name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Index => "IndexError",
            Self::Type => "TypeError",
            Self::Value => "ValueError",
            Self::Other => "Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Reports the [`ErrorKind`] of an error.
///
/// Formatter error types implement this so that
/// [`apply_formatters_to_dict`](crate::applicators::apply_formatters_to_dict)
/// can decide whether a failure gets re-tagged with field context or
/// propagates untouched.
///
/// # Examples
///
/// ```rust
/// use applicators::error::{Classify, ErrorKind};
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl Classify for Timeout {
///     fn error_kind(&self) -> ErrorKind {
///         ErrorKind::Other
///     }
/// }
///
/// assert!(!Timeout.error_kind().is_field_retaggable());
/// ```
pub trait Classify {
    /// Returns the kind of this error.
    fn error_kind(&self) -> ErrorKind;
}

impl Classify for Infallible {
    // An empty match on `&Infallible` is rejected, so the reference is dereferenced.
    #[allow(clippy::uninhabited_references)]
    fn error_kind(&self) -> ErrorKind {
        match *self {}
    }
}

macro_rules! classify_as_value {
    ($($error:ty),+ $(,)?) => {
        $(
            impl Classify for $error {
                #[inline]
                fn error_kind(&self) -> ErrorKind {
                    ErrorKind::Value
                }
            }
        )+
    };
}

classify_as_value!(
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::char::ParseCharError,
);

#[cfg(feature = "json")]
impl Classify for serde_json::Error {
    fn error_kind(&self) -> ErrorKind {
        match self.classify() {
            serde_json::error::Category::Data => ErrorKind::Type,
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                ErrorKind::Value
            }
            serde_json::error::Category::Io => ErrorKind::Other,
        }
    }
}

/// A general-purpose formatter error carrying a kind and a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FormatError {
    /// The category of the failure.
    pub kind: ErrorKind,
    /// A human readable description.
    pub message: String,
}

impl FormatError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an [`ErrorKind::Type`] error.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    /// Creates an [`ErrorKind::Value`] error.
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }

    /// Creates an [`ErrorKind::Index`] error.
    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Index, message)
    }
}

impl Classify for FormatError {
    #[inline]
    fn error_kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The number of formatters, or the index to format, does not fit the sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArityError {
    /// The sequence is too short for the requested index.
    #[error("Not enough values in iterable to apply formatter.  Got: {length}. Need: {required}")]
    NotEnoughValues {
        /// Length of the sequence.
        length: usize,
        /// Minimum length needed (`index + 1`).
        required: usize,
    },
    /// More formatters than elements.
    #[error(
        "Too many formatters for sequence: {formatters} formatters for {elements} elements in {sequence}"
    )]
    TooManyFormatters {
        /// Number of formatters supplied.
        formatters: usize,
        /// Number of elements in the sequence.
        elements: usize,
        /// `Debug` rendering of the sequence.
        sequence: String,
    },
    /// Fewer formatters than elements.
    #[error(
        "Too few formatters for sequence: {formatters} formatters for {elements} elements in {sequence}"
    )]
    TooFewFormatters {
        /// Number of formatters supplied.
        formatters: usize,
        /// Number of elements in the sequence.
        elements: usize,
        /// `Debug` rendering of the sequence.
        sequence: String,
    },
    /// A fixed-size container was rebuilt from the wrong number of items.
    ///
    /// When too many items arrive, `actual` is `expected + 1`: the surplus
    /// is not drained.
    #[error("Cannot rebuild a container of {expected} items from {actual} items")]
    ShapeMismatch {
        /// Number of items the container holds.
        expected: usize,
        /// Number of items produced.
        actual: usize,
    },
}

impl ArityError {
    /// Compares a formatter count with an element count.
    ///
    /// Returns `None` when they are equal.
    pub fn check_formatter_count<S>(formatters: usize, elements: usize, sequence: &S) -> Option<Self>
    where
        S: fmt::Debug + ?Sized,
    {
        match formatters.cmp(&elements) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(Self::TooManyFormatters {
                formatters,
                elements,
                sequence: format!("{sequence:?}"),
            }),
            std::cmp::Ordering::Less => Some(Self::TooFewFormatters {
                formatters,
                elements,
                sequence: format!("{sequence:?}"),
            }),
        }
    }
}

impl Classify for ArityError {
    #[inline]
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Index
    }
}

/// None of the conditions given to
/// [`apply_one_of_formatters`](crate::applicators::apply_one_of_formatters)
/// accepted the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("The provided value did not satisfy any of the formatter conditions")]
pub struct NoMatchError;

impl Classify for NoMatchError {
    #[inline]
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Value
    }
}

/// A formatter failed while formatting a named field.
///
/// Carries the field name and the offending value (both rendered with
/// `Debug`) and keeps the formatter's own error as its cause. The kind is
/// the kind of the cause.
///
/// # Examples
///
/// ```rust
/// use applicators::error::{Classify, ErrorKind, FieldError, FormatError};
/// use std::error::Error;
///
/// let error = FieldError::new("\"x\"", "1", FormatError::type_error("expected a string"));
/// assert_eq!(error.error_kind(), ErrorKind::Type);
/// assert_eq!(error.to_string(), "Could not format value 1 as field \"x\"");
/// assert!(error.source().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError<E> {
    kind: ErrorKind,
    field: String,
    value: String,
    cause: E,
}

impl<E: Classify> FieldError<E> {
    /// Wraps `cause` with the field name and value it failed on.
    pub fn new(field: impl Into<String>, value: impl Into<String>, cause: E) -> Self {
        Self {
            kind: cause.error_kind(),
            field: field.into(),
            value: value.into(),
            cause,
        }
    }
}

impl<E> FieldError<E> {
    /// The rendered field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The rendered value that could not be formatted.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The formatter error this one was raised from.
    pub const fn cause(&self) -> &E {
        &self.cause
    }

    /// Consumes the wrapper, returning the formatter error.
    pub fn into_cause(self) -> E {
        self.cause
    }
}

impl<E> Classify for FieldError<E> {
    #[inline]
    fn error_kind(&self) -> ErrorKind {
        self.kind
    }
}

impl<E> fmt::Display for FieldError<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Could not format value {} as field {}",
            self.value, self.field
        )
    }
}

impl<E> std::error::Error for FieldError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// The error returned by the combinators.
///
/// `E` is the error type of the formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError<E> {
    /// Formatter count or index does not fit the sequence.
    Arity(ArityError),
    /// No condition matched.
    NoMatch(NoMatchError),
    /// A type or value error raised while formatting a named field.
    Field(FieldError<E>),
    /// Any other formatter error, unmodified.
    Formatter(E),
}

impl<E> ApplyError<E> {
    /// Returns the formatter error, if this error came from a formatter.
    ///
    /// Field errors yield their cause.
    pub fn into_formatter_error(self) -> Option<E> {
        match self {
            Self::Field(error) => Some(error.into_cause()),
            Self::Formatter(error) => Some(error),
            Self::Arity(_) | Self::NoMatch(_) => None,
        }
    }

    /// Returns `true` for [`ApplyError::Arity`].
    pub const fn is_arity(&self) -> bool {
        matches!(self, Self::Arity(_))
    }
}

impl<E: Classify> Classify for ApplyError<E> {
    fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Arity(error) => error.error_kind(),
            Self::NoMatch(error) => error.error_kind(),
            Self::Field(error) => error.error_kind(),
            Self::Formatter(error) => error.error_kind(),
        }
    }
}

impl<E> From<ArityError> for ApplyError<E> {
    fn from(error: ArityError) -> Self {
        Self::Arity(error)
    }
}

impl<E> From<NoMatchError> for ApplyError<E> {
    fn from(error: NoMatchError) -> Self {
        Self::NoMatch(error)
    }
}

impl<E> From<FieldError<E>> for ApplyError<E> {
    fn from(error: FieldError<E>) -> Self {
        Self::Field(error)
    }
}

impl<E: fmt::Display> fmt::Display for ApplyError<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity(error) => write!(formatter, "{error}"),
            Self::NoMatch(error) => write!(formatter, "{error}"),
            Self::Field(error) => write!(formatter, "{error}"),
            Self::Formatter(error) => write!(formatter, "{error}"),
        }
    }
}

impl<E> std::error::Error for ApplyError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Arity(_) | Self::NoMatch(_) => None,
            Self::Field(error) => Some(error.cause()),
            Self::Formatter(error) => error.source(),
        }
    }
}

static_assertions::assert_impl_all!(FormatError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(ApplyError<FormatError>: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(FieldError<std::num::ParseIntError>: Send, Sync, std::error::Error);
