use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash, Hasher};

use mm_utils::hash::FixedHasher;
use serde_json::{Map, Value};

use crate::AttrValue;
use crate::container::{decode_element, hash_unordered};
use crate::info::{AttrKind, ContainerShape};
use crate::walker::DecodeContext;

fn decode_entries<T: AttrValue>(
    node: &Value,
    cx: &mut DecodeContext,
) -> Option<impl Iterator<Item = (String, T)>> {
    let entries = node.as_object()?;
    let mut decoded = Vec::with_capacity(entries.len());
    for (key, item) in entries {
        if let Some(value) = decode_element::<T>(item, cx) {
            decoded.push((key.clone(), value));
        }
    }
    Some(decoded.into_iter())
}

fn encode_entries<'a, T: AttrValue>(entries: impl Iterator<Item = (&'a String, &'a T)>) -> Value {
    let object: Map<String, Value> = entries
        .filter_map(|(key, value)| Some((key.clone(), value.to_element_node()?)))
        .collect();
    Value::Object(object)
}

macro_rules! impl_attr_for_hash_map {
    ($ty:path) => {
        impl<T, S> AttrValue for $ty
        where
            T: AttrValue,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn attr_kind() -> AttrKind {
                AttrKind::Container(ContainerShape::Map, Box::new(T::attr_kind()))
            }

            #[inline]
            fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
                decode_entries(node, cx).map(Iterator::collect)
            }

            #[inline]
            fn to_node(&self) -> Option<Value> {
                Some(encode_entries(self.iter()))
            }

            fn attr_eq(&self, other: &Self) -> bool {
                self.len() == other.len()
                    && self
                        .iter()
                        .all(|(key, value)| other.get(key).is_some_and(|other| value.attr_eq(other)))
            }

            fn attr_hash(&self, state: &mut FixedHasher) {
                hash_unordered(self.len(), self.iter(), state, |(key, value), entry| {
                    key.hash(entry);
                    value.attr_hash(entry);
                });
            }

            fn attr_copy(&self) -> Self {
                self.iter()
                    .map(|(key, value)| (key.clone(), value.attr_copy()))
                    .collect()
            }
        }
    };
}

impl_attr_for_hash_map!(::std::collections::HashMap<String, T, S>);
impl_attr_for_hash_map!(::mm_utils::hash::hashbrown::HashMap<String, T, S>);

impl<T: AttrValue> AttrValue for BTreeMap<String, T> {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Container(ContainerShape::Map, Box::new(T::attr_kind()))
    }

    #[inline]
    fn from_node(node: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_entries(node, cx).map(Iterator::collect)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        Some(encode_entries(self.iter()))
    }

    fn attr_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|((ka, va), (kb, vb))| ka == kb && va.attr_eq(vb))
    }

    fn attr_hash(&self, state: &mut FixedHasher) {
        state.write_usize(self.len());
        for (key, value) in self {
            key.hash(state);
            value.attr_hash(state);
        }
    }

    fn attr_copy(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.attr_copy()))
            .collect()
    }
}
