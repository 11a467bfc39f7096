//! Items referenced by code generated from `#[derive(Model)]`.
//!
//! Not public API.

pub use crate::coerce::{AttrValue, DynAttr};
pub use crate::hooks::ModelHooks;
pub use crate::info::{AttrKind, AttributeDecl, GenericSchemaCell, ModelClass, SchemaCell, TypeSchema};
pub use crate::model::Model;
pub use crate::walker::{DecodeContext, decode_nested, encode_nested, hash_model_into, model_eq, model_hash};

pub use alloc::borrow::Cow;
pub use mm_utils::hash::FixedHasher;
pub use serde_json::{Map, Value};

/// A JSON object, as passed to hooks.
pub type JsonObject = Map<alloc::string::String, Value>;

#[cfg(feature = "auto_register")]
pub use crate::registry::__AutoRegisterClass;
#[cfg(feature = "auto_register")]
pub use inventory;
