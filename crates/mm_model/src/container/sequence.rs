use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::hash::Hasher;

use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::AttrValue;
use crate::container::decode_element;
use crate::info::{AttrKind, ContainerShape};
use crate::walker::DecodeContext;

macro_rules! impl_attr_for_sequence {
    ($ty:ident) => {
        impl<T: AttrValue> AttrValue for $ty<T> {
            #[inline]
            fn attr_kind() -> AttrKind {
                AttrKind::Container(ContainerShape::Sequence, Box::new(T::attr_kind()))
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
                self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.attr_eq(b))
            }

            fn attr_hash(&self, state: &mut FixedHasher) {
                state.write_usize(self.len());
                for item in self.iter() {
                    item.attr_hash(state);
                }
            }

            fn attr_copy(&self) -> Self {
                self.iter().map(T::attr_copy).collect()
            }
        }
    };
}

impl_attr_for_sequence!(Vec);
impl_attr_for_sequence!(VecDeque);
