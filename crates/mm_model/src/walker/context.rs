use alloc::sync::Arc;
use core::any::{Any, TypeId};

use mm_utils::hash::HashMap;
use serde_json::Value;

type SharedKey = (usize, TypeId);

/// State carried through one top-level decode.
///
/// Records the `Arc` built for each JSON node, so that a node decoded into
/// `Arc<T>` twice yields one allocation. Nodes are identified by address,
/// which is only stable while the source tree is borrowed. Objects replaced by
/// [`ModelHooks::will_decode`](crate::ModelHooks::will_decode) are temporary,
/// so sharing is suspended while one is walked.
#[derive(Default)]
pub struct DecodeContext {
    shared: HashMap<SharedKey, Arc<dyn Any + Send + Sync>>,
    detached: usize,
}

impl DecodeContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key<T: Any>(node: &Value) -> SharedKey {
        (core::ptr::from_ref(node) as usize, TypeId::of::<T>())
    }

    /// The value already decoded from `node` as `Arc<T>`.
    pub fn shared<T: Any + Send + Sync>(&self, node: &Value) -> Option<Arc<T>> {
        if self.detached > 0 {
            return None;
        }
        let value = self.shared.get(&Self::key::<T>(node))?;
        Arc::clone(value).downcast::<T>().ok()
    }

    /// Record `value` as decoded from `node`.
    pub fn share<T: Any + Send + Sync>(&mut self, node: &Value, value: &Arc<T>) {
        if self.detached == 0 {
            let value: Arc<dyn Any + Send + Sync> = value.clone();
            self.shared.insert(Self::key::<T>(node), value);
        }
    }

    /// Number of recorded shared values.
    #[inline]
    pub fn shared_len(&self) -> usize {
        self.shared.len()
    }

    #[inline]
    pub(crate) fn detach(&mut self) {
        self.detached += 1;
    }

    #[inline]
    pub(crate) fn attach(&mut self) {
        self.detached -= 1;
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde_json::json;

    use super::DecodeContext;

    #[test]
    fn share_by_node_and_type() {
        let node = json!(1);
        let mut cx = DecodeContext::new();
        let value = Arc::new(1_u8);
        cx.share(&node, &value);

        assert!(Arc::ptr_eq(&cx.shared::<u8>(&node).unwrap(), &value));
        assert!(cx.shared::<u16>(&node).is_none());
        assert!(cx.shared::<u8>(&json!(1)).is_none());
    }

    #[test]
    fn detached_is_not_recorded() {
        let node = json!(1);
        let mut cx = DecodeContext::new();
        cx.detach();
        cx.share(&node, &Arc::new(1_u8));
        assert_eq!(cx.shared_len(), 0);
        cx.attach();
        assert!(cx.shared::<u8>(&node).is_none());
    }
}
