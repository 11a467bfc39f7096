//! Locate attribute values inside JSON objects.
//!
//! Each attribute owns one or more candidate [`KeyPath`]s. Decoding reads the
//! first candidate present in the object ([`resolve_first`]); encoding writes
//! the primary one ([`KeyPath::insert`]).

// -----------------------------------------------------------------------------
// Modules

mod path;

// -----------------------------------------------------------------------------
// Exports

pub use path::{KeyPath, ParseError};

use alloc::string::String;

use serde_json::{Map, Value};

/// Resolve the first key in `keys` that is present in `object`.
///
/// An explicit `null` counts as present, so a `null` under a higher-priority
/// key hides later candidates.
///
/// # Example
///
/// ```
/// use mm_model::access::{KeyPath, resolve_first};
/// use serde_json::json;
///
/// let keys = [KeyPath::single("id"), KeyPath::single("ID")];
/// let node = json!({ "ID": 2, "id": 1 });
/// assert_eq!(resolve_first(node.as_object().unwrap(), &keys), Some(&json!(1)));
/// ```
#[inline]
pub fn resolve_first<'v>(object: &'v Map<String, Value>, keys: &[KeyPath]) -> Option<&'v Value> {
    keys.iter().find_map(|key| key.resolve(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_wins() {
        let keys = [
            KeyPath::single("id"),
            KeyPath::single("ID"),
            KeyPath::parse("meta.id").unwrap(),
        ];

        let node = json!({ "ID": 2, "meta": { "id": 3 } });
        assert_eq!(resolve_first(node.as_object().unwrap(), &keys), Some(&json!(2)));

        let node = json!({ "meta": { "id": 3 } });
        assert_eq!(resolve_first(node.as_object().unwrap(), &keys), Some(&json!(3)));

        let node = json!({ "id": null, "ID": 2 });
        assert_eq!(resolve_first(node.as_object().unwrap(), &keys), Some(&Value::Null));

        let node = json!({ "other": 1 });
        assert_eq!(resolve_first(node.as_object().unwrap(), &keys), None);
    }
}
