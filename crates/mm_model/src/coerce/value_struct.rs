use core::hash::Hash;

use mm_utils::hash::FixedHasher;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::coerce::hash_value;

const STRUCT_KEY: &str = "struct";
const VALUE_KEY: &str = "value";

/// A plain value struct (a point, a range, a color) stored as one attribute.
///
/// Value structs travel through JSON wrapped with their tag,
/// `{"struct": TAG, "value": <serde form>}`, and a node with another tag is
/// rejected. Implement this trait, then [`impl_value_struct!`] to make the type
/// usable as an attribute.
///
/// ```
/// use mm_model::{Model, ValueStruct, decode_from_text, impl_value_struct};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Debug)]
/// struct Point { x: f64, y: f64 }
///
/// impl ValueStruct for Point {
///     const TAG: &'static str = "Point";
/// }
/// impl_value_struct!(Point);
///
/// #[derive(Model)]
/// struct Marker { at: Point }
///
/// let marker: Marker =
///     decode_from_text(r#"{"at":{"struct":"Point","value":{"x":1.0,"y":2.0}}}"#).unwrap();
/// assert_eq!(marker.at, Point { x: 1.0, y: 2.0 });
/// ```
///
/// [`impl_value_struct!`]: crate::impl_value_struct
pub trait ValueStruct: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// The tag written next to the value.
    const TAG: &'static str;
}

/// Read a tagged value struct node.
pub fn struct_from_node<T: ValueStruct>(node: &Value) -> Option<T> {
    let object = node.as_object()?;
    if object.get(STRUCT_KEY)?.as_str()? != T::TAG {
        return None;
    }
    serde_json::from_value(object.get(VALUE_KEY)?.clone()).ok()
}

/// Write a value struct as a tagged node.
pub fn struct_to_node<T: ValueStruct>(value: &T) -> Option<Value> {
    let inner = serde_json::to_value(value).ok()?;
    let mut object = Map::new();
    object.insert(STRUCT_KEY.into(), Value::String(T::TAG.into()));
    object.insert(VALUE_KEY.into(), inner);
    Some(Value::Object(object))
}

/// Hash a value struct through its serialized form.
pub fn struct_hash<T: ValueStruct>(value: &T, state: &mut FixedHasher) {
    T::TAG.hash(state);
    if let Ok(node) = serde_json::to_value(value) {
        hash_value(&node, state);
    }
}

/// Implement [`AttrValue`](crate::AttrValue) for [`ValueStruct`] types.
#[macro_export]
macro_rules! impl_value_struct {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::AttrValue for $ty {
            #[inline]
            fn attr_kind() -> $crate::info::AttrKind {
                $crate::info::AttrKind::ValueStruct(<$ty as $crate::ValueStruct>::TAG)
            }

            #[inline]
            fn from_node(
                node: &$crate::Value,
                _: &mut $crate::walker::DecodeContext,
            ) -> ::core::option::Option<Self> {
                $crate::coerce::struct_from_node(node)
            }

            #[inline]
            fn to_node(&self) -> ::core::option::Option<$crate::Value> {
                $crate::coerce::struct_to_node(self)
            }

            #[inline]
            fn attr_eq(&self, other: &Self) -> bool {
                ::core::cmp::PartialEq::eq(self, other)
            }

            #[inline]
            fn attr_hash(&self, state: &mut $crate::__macro_exports::FixedHasher) {
                $crate::coerce::struct_hash(self, state)
            }

            #[inline]
            fn attr_copy(&self) -> Self {
                ::core::clone::Clone::clone(self)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::AttrValue;
    use crate::walker::DecodeContext;

    #[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Debug)]
    struct Range {
        start: i64,
        len: i64,
    }

    impl ValueStruct for Range {
        const TAG: &'static str = "Range";
    }

    crate::impl_value_struct!(Range);

    #[test]
    fn tagged_node() {
        let range = Range { start: 3, len: 4 };
        let node = range.to_node().unwrap();
        assert_eq!(node, json!({ "struct": "Range", "value": { "start": 3, "len": 4 } }));

        let mut cx = DecodeContext::new();
        assert_eq!(Range::from_node(&node, &mut cx), Some(range));

        let wrong_tag = json!({ "struct": "Size", "value": { "start": 3, "len": 4 } });
        assert_eq!(Range::from_node(&wrong_tag, &mut cx), None);
        assert_eq!(Range::from_node(&json!({ "start": 3, "len": 4 }), &mut cx), None);
    }
}
