//! Integration tests for shape-preserving rebuilds.
//!
//! Tests cover:
//! - Every positional container kind keeps its kind through a combinator
//! - Fixed-size containers reject streams of the wrong length
//! - Mappings keep their concrete type and hasher

#![forbid(unsafe_code)]

use applicators::prelude::*;
use rstest::rstest;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasherDefault;

fn increment(value: u8) -> Result<u8, FormatError> {
    value
        .checked_add(1)
        .ok_or_else(|| FormatError::value_error("overflow"))
}

// =============================================================================
// Sequences
// =============================================================================

mod sequences {
    use super::*;

    #[test]
    fn vec_stays_vec() {
        let result: Result<Vec<u8>, _> = apply_formatter_to_array(increment, vec![1, 2]);
        assert_eq!(result, Ok(vec![2, 3]));
    }

    #[test]
    fn deque_stays_deque() {
        let values: VecDeque<u8> = [1, 2].into_iter().collect();
        let result: Result<VecDeque<u8>, _> = apply_formatter_to_array(increment, values);
        assert_eq!(result, Ok([2, 3].into_iter().collect()));
    }

    #[test]
    fn array_stays_array() {
        let result: Result<[u8; 3], _> = apply_formatter_to_array(increment, [0, 1, 2]);
        assert_eq!(result, Ok([1, 2, 3]));
    }

    #[test]
    fn single_element_tuple_stays_tuple() {
        let result: Result<(u8,), _> = apply_formatter_to_array(increment, (9,));
        assert_eq!(result, Ok((10,)));
    }

    #[test]
    fn eight_element_tuple_stays_tuple() {
        let result = apply_formatter_to_array(increment, (0, 1, 2, 3, 4, 5, 6, 7));
        assert_eq!(result, Ok((1, 2, 3, 4, 5, 6, 7, 8)));
    }

    #[rstest]
    #[case(vec![1, 2], 2)]
    #[case(vec![], 0)]
    fn item_count_matches_length(#[case] values: Vec<u8>, #[case] expected: usize) {
        assert_eq!(values.item_count(), expected);
    }

    #[test]
    fn array_rebuild_from_short_stream_is_shape_mismatch() {
        let result = <[u8; 4]>::rebuild([Ok::<_, ApplyError<FormatError>>(1), Ok(2)]);
        assert_eq!(
            result,
            Err(ApplyError::Arity(ArityError::ShapeMismatch {
                expected: 4,
                actual: 2,
            }))
        );
    }

    #[test]
    fn tuple_rebuild_from_long_stream_is_shape_mismatch() {
        let result = <(u8, u8)>::rebuild([Ok::<_, ArityError>(1), Ok(2), Ok(3)]);
        assert_eq!(
            result,
            Err(ArityError::ShapeMismatch {
                expected: 2,
                actual: 3,
            })
        );
    }

    #[test]
    fn formatter_failure_keeps_error_for_fixed_shapes() {
        let result = apply_formatter_to_array(increment, [254, 255, 0]);
        assert_eq!(
            result,
            Err(ApplyError::Formatter(FormatError::value_error("overflow")))
        );
    }
}

// =============================================================================
// Mappings
// =============================================================================

mod mappings {
    use super::*;

    type FixedHashMap<K, V> = HashMap<K, V, BuildHasherDefault<DefaultHasher>>;

    #[test]
    fn custom_hasher_map_keeps_its_type() {
        let mut value: FixedHashMap<&str, u8> = FixedHashMap::default();
        value.insert("a", 1);
        value.insert("b", 2);

        let formatted: Result<FixedHashMap<&str, u8>, _> =
            apply_formatters_to_dict(&[("a", increment)], value);
        let formatted = formatted.expect("registered formatter succeeds");
        assert_eq!(formatted.get("a"), Some(&2));
        assert_eq!(formatted.get("b"), Some(&2));
    }

    #[test]
    fn btree_map_keeps_sorted_order_after_rename() {
        let value: BTreeMap<&str, u8> = [("b", 1), ("c", 2)].into_iter().collect();
        let renamed = apply_key_map(&[("c", "a")], value);
        let keys: Vec<&str> = renamed.keys().copied().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_like_keeps_nothing() {
        let value: BTreeMap<&str, u8> = [("a", 1)].into_iter().collect();
        assert_eq!(value.empty_like().entry_count(), 0);
    }
}

// =============================================================================
// SmallVec
// =============================================================================

#[cfg(feature = "smallvec")]
mod small_vectors {
    use super::*;
    use smallvec::{SmallVec, smallvec};

    #[test]
    fn small_vec_stays_small_vec() {
        let values: SmallVec<[u8; 4]> = smallvec![1, 2, 3];
        let result: Result<SmallVec<[u8; 4]>, _> = apply_formatter_to_array(increment, values);
        assert_eq!(result.map(|values| values.into_vec()), Ok(vec![2, 3, 4]));
    }
}
