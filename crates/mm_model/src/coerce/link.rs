use alloc::borrow::ToOwned;
use core::hash::Hash;

use mm_utils::hash::FixedHasher;
use serde_json::Value;
use url::Url;

use crate::AttrValue;
use crate::info::AttrKind;
use crate::walker::DecodeContext;

// `Url` has no default value, so attributes are declared as `Option<Url>`.
impl AttrValue for Url {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Url
    }

    #[inline]
    fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
        Url::parse(node.as_str()?.trim()).ok()
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        Some(Value::String(self.as_str().to_owned()))
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

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_url() {
        let mut cx = DecodeContext::new();
        let url = Url::from_node(&json!("https://example.com/a?b=1"), &mut cx).unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.to_node(), Some(json!("https://example.com/a?b=1")));

        assert_eq!(Url::from_node(&json!("not a url"), &mut cx), None);
        assert_eq!(Url::from_node(&json!(3), &mut cx), None);
    }
}
