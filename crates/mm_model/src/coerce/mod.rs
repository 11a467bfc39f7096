//! Attribute value kinds and their JSON coercion rules.
//!
//! Every attribute type implements [`AttrValue`], which classifies it
//! ([`AttrKind`]) and converts it from and to a JSON node. The walker reaches
//! attributes through the object-safe [`DynAttr`], implemented for every
//! `AttrValue`.
//!
//! Coercion is lenient and never fails the enclosing model: a node that cannot
//! be converted leaves the attribute at its current value.
//!
//! | Rust type | JSON accepted | JSON written |
//! |-----------|---------------|--------------|
//! | integers, floats | number, numeric string | number |
//! | `bool` | bool, number, `"true"`/`"yes"`/`"1"` | bool |
//! | `String` | string, number, bool | string |
//! | `DateTime<Utc>` | string, see [`DATE_FORMATS`] | string |
//! | `Url` | string | string |
//! | [`ValueStruct`] | `{"struct": TAG, "value": ..}` | same |
//! | `serde_json::Value` | anything | unchanged |
//! | [`Opaque<T>`] | ignored | omitted |
//! | `Option<T>` | `null` or `T` | `T`, omitted when `None` (`null` in containers) |
//! | `Box<T>`, `Arc<T>` | as `T` | as `T` |
//!
//! Containers and nested models implement `AttrValue` in
//! [`container`](crate::container) and through `#[derive(Model)]`.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "chrono")]
mod date;
#[cfg(feature = "url")]
mod link;
mod opaque;
mod scalar;
mod untyped;
mod value_struct;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "chrono")]
pub use date::{DATE_FORMATS, format_date, parse_date};
pub use opaque::Opaque;
pub use untyped::hash_value;
pub use value_struct::{ValueStruct, struct_from_node, struct_hash, struct_to_node};

use core::any::Any;

use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::info::AttrKind;
use crate::walker::DecodeContext;

// -----------------------------------------------------------------------------
// AttrValue

/// A type that can be stored in a model attribute.
///
/// Implementations must keep [`attr_eq`](Self::attr_eq) and
/// [`attr_hash`](Self::attr_hash) consistent: equal values hash equally.
pub trait AttrValue: Send + Sync + Sized + 'static {
    /// `true` if a JSON `null` decodes to a valid value.
    const NULLABLE: bool = false;

    /// The classified kind of this type.
    fn attr_kind() -> AttrKind;

    /// Convert a JSON node, or return `None` if it has an incompatible kind.
    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self>;

    /// Convert to a JSON node, or return `None` to omit the attribute.
    fn to_node(&self) -> Option<Value>;

    /// Convert a container element. An absent element is written as `null`
    /// so arrays keep their positions and maps their keys.
    #[inline]
    fn to_element_node(&self) -> Option<Value> {
        self.to_node()
    }

    fn attr_eq(&self, other: &Self) -> bool;

    fn attr_hash(&self, state: &mut FixedHasher);

    /// A deep copy: nested models and containers are copied, not shared.
    fn attr_copy(&self) -> Self;
}

// -----------------------------------------------------------------------------
// DynAttr

/// The object-safe view of an [`AttrValue`], returned by
/// [`Model::attr`](crate::Model::attr).
pub trait DynAttr: Any + Send + Sync {
    /// Replace the value with one converted from `node`.
    ///
    /// Returns `false` and keeps the current value if conversion fails.
    fn assign_node(&mut self, node: &Value, cx: &mut DecodeContext) -> bool;

    fn encode_node(&self) -> Option<Value>;

    /// Returns `false` if `other` is a different type.
    fn dyn_eq(&self, other: &dyn DynAttr) -> bool;

    fn dyn_hash(&self, state: &mut FixedHasher);

    fn as_any(&self) -> &dyn Any;
}

impl<T: AttrValue> DynAttr for T {
    #[inline]
    fn assign_node(&mut self, node: &Value, cx: &mut DecodeContext) -> bool {
        match T::from_node(node, cx) {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn encode_node(&self) -> Option<Value> {
        self.to_node()
    }

    #[inline]
    fn dyn_eq(&self, other: &dyn DynAttr) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.attr_eq(other))
    }

    #[inline]
    fn dyn_hash(&self, state: &mut FixedHasher) {
        self.attr_hash(state);
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}
