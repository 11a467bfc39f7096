use alloc::borrow::Cow;
use alloc::string::String;

use serde_json::{Map, Value};

use crate::info::ModelClass;

/// Attribute name to candidate JSON keys, in priority order.
///
/// A key may be a dotted path (`"ext.desc"`).
pub type KeyMapper = &'static [(&'static str, &'static [&'static str])];

/// Per-type configuration and callbacks of a model.
///
/// Every method has a default, so an empty impl is valid. `#[derive(Model)]`
/// writes that empty impl unless the type is marked `#[model(Hooks = false)]`.
///
/// The static methods are read once, when the type's schema is built.
///
/// # Example
///
/// ```
/// use mm_model::{KeyMapper, Map, Model, ModelHooks, Value, decode_from_text};
///
/// #[derive(Model)]
/// #[model(Hooks = false)]
/// struct User {
///     id: u64,
///     name: String,
///     password: String,
/// }
///
/// impl ModelHooks for User {
///     fn key_mapper() -> KeyMapper {
///         &[("id", &["id", "ID", "user_id"])]
///     }
///
///     fn blacklist() -> Option<&'static [&'static str]> {
///         Some(&["password"])
///     }
///
///     fn did_decode(&mut self, _: &Map<String, Value>) -> bool {
///         self.id != 0
///     }
/// }
///
/// let user: User = decode_from_text(r#"{"ID":7,"name":"ann","password":"x"}"#).unwrap();
/// assert_eq!(user.id, 7);
/// assert!(user.password.is_empty());
///
/// assert!(decode_from_text::<User>(r#"{"name":"ann"}"#).is_none());
/// ```
pub trait ModelHooks {
    /// Custom JSON keys per attribute; unlisted attributes use their
    /// `#[model(key = ..)]` keys or their name.
    fn key_mapper() -> KeyMapper {
        &[]
    }

    /// Attributes excluded from mapping, equality and hashing.
    ///
    /// Ignored when [`whitelist`](Self::whitelist) returns `Some`.
    fn blacklist() -> Option<&'static [&'static str]> {
        None
    }

    /// The only attributes included in mapping, equality and hashing.
    fn whitelist() -> Option<&'static [&'static str]> {
        None
    }

    /// Choose the concrete class to instantiate for `object`.
    ///
    /// Returning `None`, or a class the declared type cannot hold, falls back
    /// to the declared type.
    fn select_class(object: &Map<String, Value>) -> Option<ModelClass> {
        let _ = object;
        None
    }

    /// Inspect the object before decoding.
    ///
    /// Return a replacement object, the same one, or `None` to reject it.
    fn will_decode(object: &Map<String, Value>) -> Option<Cow<'_, Map<String, Value>>> {
        Some(Cow::Borrowed(object))
    }

    /// Validate or post-process after all attributes are assigned.
    ///
    /// `false` rejects the model.
    fn did_decode(&mut self, object: &Map<String, Value>) -> bool {
        let _ = object;
        true
    }

    /// Adjust the encoded object. `false` rejects the encode.
    fn did_encode(&self, object: &mut Map<String, Value>) -> bool {
        let _ = object;
        true
    }
}
