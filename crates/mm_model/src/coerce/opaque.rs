use core::hash::Hash;
use core::ops::{Deref, DerefMut};

use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::AttrValue;
use crate::info::AttrKind;
use crate::walker::DecodeContext;

/// A model attribute the mapper never reads from or writes to JSON.
///
/// The value still takes part in equality, hashing and copies.
///
/// ```
/// use mm_model::{Model, Opaque, decode_from_text, encode_to_value};
///
/// #[derive(Model)]
/// struct Session {
///     user: String,
///     handle: Opaque<u64>,
/// }
///
/// let session: Session = decode_from_text(r#"{"user":"ann","handle":7}"#).unwrap();
/// assert_eq!(*session.handle, 0);
/// assert!(encode_to_value(&session).unwrap().get("handle").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opaque<T>(pub T);

impl<T> Deref for Opaque<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Opaque<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> AttrValue for Opaque<T>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
{
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Opaque
    }

    #[inline]
    fn from_node(_: &Value, _: &mut DecodeContext) -> Option<Self> {
        None
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        None
    }

    #[inline]
    fn attr_eq(&self, other: &Self) -> bool {
        self == other
    }

    #[inline]
    fn attr_hash(&self, state: &mut FixedHasher) {
        self.hash(state);
    }

    #[inline]
    fn attr_copy(&self) -> Self {
        self.clone()
    }
}
