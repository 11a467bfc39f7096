use core::hash::{BuildHasher, Hash, Hasher};

use mm_utils::hash::{FixedHashState, FixedHasher};
use serde_json::{Number, Value};

use crate::AttrValue;
use crate::info::AttrKind;
use crate::walker::DecodeContext;

/// Hash a JSON node consistently with `Value`'s equality.
///
/// Object entries are combined commutatively, so key order does not matter.
pub fn hash_value(node: &Value, state: &mut FixedHasher) {
    core::mem::discriminant(node).hash(state);
    match node {
        Value::Null => {}
        Value::Bool(value) => value.hash(state),
        Value::Number(number) => hash_number(number, state),
        Value::String(text) => text.hash(state),
        Value::Array(items) => {
            state.write_usize(items.len());
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(entries) => {
            let mut combined = 0_u64;
            for (key, item) in entries {
                let mut entry = FixedHashState.build_hasher();
                key.hash(&mut entry);
                hash_value(item, &mut entry);
                combined = combined.wrapping_add(entry.finish());
            }
            state.write_usize(entries.len());
            state.write_u64(combined);
        }
    }
}

// `Number` equality compares the stored variant, so hashing does too.
fn hash_number(number: &Number, state: &mut FixedHasher) {
    if let Some(value) = number.as_u64() {
        state.write_u8(0);
        state.write_u64(value);
    } else if let Some(value) = number.as_i64() {
        state.write_u8(1);
        state.write_i64(value);
    } else if let Some(value) = number.as_f64() {
        let value = if value == 0.0 { 0.0 } else { value };
        state.write_u8(2);
        state.write_u64(value.to_bits());
    }
}

// Raw JSON passes through unchanged. A `null` attribute is omitted on encode;
// a `null` element is kept.
impl AttrValue for Value {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Untyped
    }

    #[inline]
    fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
        Some(node.clone())
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        (!self.is_null()).then(|| self.clone())
    }

    #[inline]
    fn to_element_node(&self) -> Option<Value> {
        Some(self.clone())
    }

    #[inline]
    fn attr_eq(&self, other: &Self) -> bool {
        self == other
    }

    #[inline]
    fn attr_hash(&self, state: &mut FixedHasher) {
        hash_value(self, state);
    }

    #[inline]
    fn attr_copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use mm_utils::hash::FixedHashState;
    use serde_json::json;

    use super::hash_value;

    fn hash_of(node: &serde_json::Value) -> u64 {
        let mut state = FixedHashState.build_hasher();
        hash_value(node, &mut state);
        state.finish()
    }

    #[test]
    fn object_order_is_ignored() {
        let a: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"b":[true,null],"a":1}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn distinguishes_kinds() {
        assert_ne!(hash_of(&json!(1)), hash_of(&json!("1")));
        assert_ne!(hash_of(&json!([1, 2])), hash_of(&json!([2, 1])));
        assert_eq!(hash_of(&json!(0.0)), hash_of(&json!(-0.0)));
    }
}
