//! # applicators
//!
//! Formatter-application combinators that preserve the shape of their input.
//!
//! ## Overview
//!
//! A *formatter* is a function that turns one value into another and may
//! fail. The combinators in this crate apply formatters to the elements of a
//! structured value (a list, a homogeneous tuple, a fixed-size array, a keyed
//! mapping) and return a value of the same concrete container kind. They are
//! the building blocks for normalizing loosely typed external data, such as
//! RPC responses, into canonical in-memory values.
//!
//! - **Combinators**: [`applicators`] (positional, keyed, conditional)
//! - **Partial application**: [`curried`] variants returning reusable closures
//! - **Rebuilding**: [`rebuild`] traits that reconstruct containers
//! - **Lookups**: [`lookup`] for keyed formatter sets and key maps
//! - **Errors**: [`error`] with arity, no-match and field errors
//!
//! ## Feature Flags
//!
//! - `smallvec`: rebuild `SmallVec` sequences
//! - `indexmap`: rebuild and look up `IndexMap` mappings
//! - `json`: rebuild `serde_json::Map` objects and classify `serde_json::Error`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use applicators::prelude::*;
//! use std::collections::BTreeMap;
//!
//! fn to_string(value: i64) -> Result<String, FormatError> {
//!     Ok(value.to_string())
//! }
//!
//! let receipt: BTreeMap<&str, i64> = [("status", 1), ("gasUsed", 21000)].into_iter().collect();
//! let receipt = apply_key_map(&[("gasUsed", "gas_used")], receipt);
//! assert!(receipt.contains_key("gas_used"));
//!
//! let pair = apply_formatter_to_array(to_string, (1_i64, 2_i64));
//! assert_eq!(pair, Ok(("1".to_string(), "2".to_string())));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the combinators, the rebuild and lookup traits, and the
/// error types.
///
/// # Usage
///
/// ```rust
/// use applicators::prelude::*;
/// ```
pub mod prelude {
    pub use crate::applicators::*;
    pub use crate::error::{
        ApplyError, ArityError, Classify, ErrorKind, FieldError, FormatError, NoMatchError,
    };
    pub use crate::formatter::{BoxedCondition, BoxedFormatter, boxed, condition, identity, total};
    pub use crate::lookup::KeyedLookup;
    pub use crate::rebuild::{MappingRebuild, SequenceRebuild};
}

pub mod applicators;
pub mod curried;
pub mod error;
pub mod formatter;
pub mod lookup;
pub mod rebuild;
