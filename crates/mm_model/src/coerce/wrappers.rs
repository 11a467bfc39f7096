use alloc::boxed::Box;
use alloc::sync::Arc;
use core::hash::Hasher;

use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::AttrValue;
use crate::info::AttrKind;
use crate::walker::DecodeContext;

// -----------------------------------------------------------------------------
// Option

// `null` decodes to `None`; `None` is omitted on encode, or `null` as an element.
impl<T: AttrValue> AttrValue for Option<T> {
    const NULLABLE: bool = true;

    #[inline]
    fn attr_kind() -> AttrKind {
        T::attr_kind()
    }

    #[inline]
    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match node {
            Value::Null => Some(None),
            _ => T::from_node(node, cx).map(Some),
        }
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_node)
    }

    #[inline]
    fn to_element_node(&self) -> Option<Value> {
        match self {
            Some(value) => value.to_element_node(),
            None => Some(Value::Null),
        }
    }

    #[inline]
    fn attr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.attr_eq(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn attr_hash(&self, state: &mut FixedHasher) {
        match self {
            Some(value) => {
                state.write_u8(1);
                value.attr_hash(state);
            }
            None => state.write_u8(0),
        }
    }

    #[inline]
    fn attr_copy(&self) -> Self {
        self.as_ref().map(T::attr_copy)
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: AttrValue> AttrValue for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    #[inline]
    fn attr_kind() -> AttrKind {
        T::attr_kind()
    }

    #[inline]
    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
        T::from_node(node, cx).map(Box::new)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        T::to_node(self)
    }

    #[inline]
    fn to_element_node(&self) -> Option<Value> {
        T::to_element_node(self)
    }

    #[inline]
    fn attr_eq(&self, other: &Self) -> bool {
        T::attr_eq(self, other)
    }

    #[inline]
    fn attr_hash(&self, state: &mut FixedHasher) {
        T::attr_hash(self, state);
    }

    #[inline]
    fn attr_copy(&self) -> Self {
        Box::new(T::attr_copy(self))
    }
}

// -----------------------------------------------------------------------------
// Arc

/// Shared values.
///
/// Within one decode, a JSON node decoded into `Arc<T>` more than once yields
/// the same allocation. Copies are deep: the copy gets its own allocation.
impl<T: AttrValue> AttrValue for Arc<T> {
    const NULLABLE: bool = T::NULLABLE;

    #[inline]
    fn attr_kind() -> AttrKind {
        T::attr_kind()
    }

    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
        if let Some(shared) = cx.shared::<T>(node) {
            return Some(shared);
        }
        let value = Arc::new(T::from_node(node, cx)?);
        cx.share(node, &value);
        Some(value)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        T::to_node(self)
    }

    #[inline]
    fn to_element_node(&self) -> Option<Value> {
        T::to_element_node(self)
    }

    #[inline]
    fn attr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || T::attr_eq(self, other)
    }

    #[inline]
    fn attr_hash(&self, state: &mut FixedHasher) {
        T::attr_hash(self, state);
    }

    #[inline]
    fn attr_copy(&self) -> Self {
        Arc::new(T::attr_copy(self))
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde_json::{Value, json};

    use crate::AttrValue;
    use crate::walker::DecodeContext;

    #[test]
    fn option_null() {
        let mut cx = DecodeContext::new();
        assert_eq!(Option::<i32>::from_node(&Value::Null, &mut cx), Some(None));
        assert_eq!(Option::<i32>::from_node(&json!(5), &mut cx), Some(Some(5)));
        assert_eq!(Option::<i32>::from_node(&json!("x"), &mut cx), None);
        assert_eq!(i32::from_node(&Value::Null, &mut cx), None);

        assert_eq!(None::<i32>.to_node(), None);
        assert_eq!(None::<i32>.to_element_node(), Some(Value::Null));
        assert_eq!(Some(3_i32).to_element_node(), Some(json!(3)));
        const { assert!(<Option<i32> as AttrValue>::NULLABLE) };
    }

    #[test]
    fn arc_identity() {
        let node = json!("shared");
        let mut cx = DecodeContext::new();
        let a = Arc::<String>::from_node(&node, &mut cx).unwrap();
        let b = Arc::<String>::from_node(&node, &mut cx).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let other = json!("shared");
        let c = Arc::<String>::from_node(&other, &mut cx).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(a.attr_eq(&c));

        let copy = a.attr_copy();
        assert!(!Arc::ptr_eq(&a, &copy));
        assert!(copy.attr_eq(&a));
    }
}
