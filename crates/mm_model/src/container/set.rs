use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash, Hasher};

use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::AttrValue;
use crate::container::{decode_element, hash_unordered};
use crate::info::{AttrKind, ContainerShape};
use crate::walker::DecodeContext;

// Set membership uses the element's `Eq`, which for models deriving
// `#[model(eq)]` is the schema-driven equality.
macro_rules! impl_attr_for_hash_set {
    ($ty:path) => {
        impl<T, S> AttrValue for $ty
        where
            T: AttrValue + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn attr_kind() -> AttrKind {
                AttrKind::Container(ContainerShape::Set, Box::new(T::attr_kind()))
            }

            fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
                let items = node.as_array()?;
                Some(
                    items
                        .iter()
                        .filter_map(|item| decode_element::<T>(item, cx))
                        .collect(),
                )
            }

            fn to_node(&self) -> Option<Value> {
                Some(Value::Array(self.iter().filter_map(T::to_element_node).collect()))
            }

            fn attr_eq(&self, other: &Self) -> bool {
                self.len() == other.len() && self.iter().all(|item| other.contains(item))
            }

            fn attr_hash(&self, state: &mut FixedHasher) {
                hash_unordered(self.len(), self.iter(), state, |item, entry| item.attr_hash(entry));
            }

            fn attr_copy(&self) -> Self {
                self.iter().map(T::attr_copy).collect()
            }
        }
    };
}

impl_attr_for_hash_set!(::std::collections::HashSet<T, S>);
impl_attr_for_hash_set!(::mm_utils::hash::hashbrown::HashSet<T, S>);

impl<T: AttrValue + Ord> AttrValue for BTreeSet<T> {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Container(ContainerShape::Set, Box::new(T::attr_kind()))
    }

    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
        let items = node.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| decode_element::<T>(item, cx))
                .collect(),
        )
    }

    fn to_node(&self) -> Option<Value> {
        Some(Value::Array(self.iter().filter_map(T::to_element_node).collect()))
    }

    fn attr_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.attr_eq(b))
    }

    // Iteration is sorted, so an ordered hash is already order-independent.
    fn attr_hash(&self, state: &mut FixedHasher) {
        state.write_usize(self.len());
        for item in self {
            item.attr_hash(state);
        }
    }

    fn attr_copy(&self) -> Self {
        self.iter().map(T::attr_copy).collect()
    }
}
