//! Typed collections as attributes.
//!
//! - Sequences (`Vec`, `VecDeque`) and sets (`HashSet`, `BTreeSet`, and the
//!   `hashbrown` set) decode from JSON arrays.
//! - Maps with `String` keys (`HashMap`, `BTreeMap`, and the `hashbrown` map)
//!   decode from JSON objects.
//!
//! Elements that fail to decode are dropped and the rest of the collection is
//! kept. Sequences compare and hash in order; sets and maps compare by
//! membership and hash independently of iteration order.

// -----------------------------------------------------------------------------
// Modules

mod map;
mod sequence;
mod set;

use core::hash::{BuildHasher, Hasher};

use log::trace;
use mm_utils::hash::{FixedHashState, FixedHasher};
use serde_json::Value;

use crate::AttrValue;
use crate::error::node_kind;
use crate::info::{ModelClass, TypeSchema};
use crate::walker::DecodeContext;

/// The element model declared for container attribute `name`.
///
/// Returns `None` if the attribute is unknown, not a container, or its
/// elements are not models.
#[inline]
pub fn element_type_for(schema: &TypeSchema, name: &str) -> Option<ModelClass> {
    schema.element_type(name)
}

/// Decode one element, logging a dropped one.
#[inline]
fn decode_element<T: AttrValue>(node: &Value, cx: &mut DecodeContext) -> Option<T> {
    let element = T::from_node(node, cx);
    if element.is_none() {
        trace!(
            "dropping container element: cannot read {} as `{}`",
            node_kind(node),
            core::any::type_name::<T>(),
        );
    }
    element
}

/// The order-independent hash of a collection.
///
/// Each entry is hashed alone and the results are summed, so equal sets or
/// maps hash equally whatever their iteration order.
fn hash_unordered<I: IntoIterator>(
    len: usize,
    entries: I,
    state: &mut FixedHasher,
    mut write: impl FnMut(I::Item, &mut FixedHasher),
) {
    let mut combined = 0_u64;
    for item in entries {
        let mut entry = FixedHashState.build_hasher();
        write(item, &mut entry);
        combined = combined.wrapping_add(entry.finish());
    }
    state.write_usize(len);
    state.write_u64(combined);
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use core::hash::{BuildHasher, Hasher};
    use std::collections::{HashMap, HashSet};

    use mm_utils::hash::FixedHashState;
    use serde_json::{Value, json};

    use crate::AttrValue;
    use crate::walker::DecodeContext;

    fn decode<T: AttrValue>(node: Value) -> Option<T> {
        T::from_node(&node, &mut DecodeContext::new())
    }

    fn hash_of<T: AttrValue>(value: &T) -> u64 {
        let mut state = FixedHashState.build_hasher();
        value.attr_hash(&mut state);
        state.finish()
    }

    #[test]
    fn sequence_drops_bad_elements() {
        let values: Vec<u8> = decode(json!([1, "2", "x", 300, 4])).unwrap();
        assert_eq!(values, [1, 2, 4]);
        assert_eq!(decode::<Vec<u8>>(json!({ "a": 1 })), None);
        assert_eq!(values.to_node(), Some(json!([1, 2, 4])));
    }

    #[test]
    fn sequence_order_matters() {
        let a = vec![1, 2];
        let b = vec![2, 1];
        assert!(!a.attr_eq(&b));
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn set_is_unordered() {
        let a: HashSet<String> = decode(json!(["x", "y", "y"])).unwrap();
        let b: HashSet<String> = decode(json!(["y", "x"])).unwrap();
        assert_eq!(a.len(), 2);
        assert!(a.attr_eq(&b));
        assert_eq!(hash_of(&a), hash_of(&b));

        let sorted: BTreeSet<i64> = decode(json!([3, 1, 2])).unwrap();
        assert_eq!(sorted.to_node(), Some(json!([1, 2, 3])));
    }

    #[test]
    fn map_by_key() {
        let a: HashMap<String, i32> = decode(json!({ "a": 1, "b": "2", "c": [] })).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a["b"], 2);

        let b: mm_utils::hash::HashMap<String, i32> = decode(json!({ "b": 2, "a": 1 })).unwrap();
        let c: mm_utils::hash::HashMap<String, i32> = decode(json!({ "a": 1, "b": 2 })).unwrap();
        assert!(b.attr_eq(&c));
        assert_eq!(hash_of(&b), hash_of(&c));

        let sorted: BTreeMap<String, i32> = decode(json!({ "z": 1, "a": 2 })).unwrap();
        assert_eq!(sorted.to_node(), Some(json!({ "a": 2, "z": 1 })));
        assert_eq!(decode::<BTreeMap<String, i32>>(json!([1])), None);
    }
}
