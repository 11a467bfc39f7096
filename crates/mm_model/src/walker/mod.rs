//! Schema-driven traversals of models.
//!
//! Each operation iterates a model's [`TypeSchema`](crate::info::TypeSchema)
//! and recurses through nested models and containers via
//! [`AttrValue`](crate::AttrValue):
//!
//! - [`decode_node`] / [`populate_node`]: JSON to model.
//! - [`encode_model`]: model to JSON.
//! - [`model_eq`] / [`model_hash`]: structural equality and hashing over the
//!   included attributes.
//!
//! Copies are generated per type by `#[derive(Model)]`, see
//! [`Model::model_copy`](crate::Model::model_copy).

// -----------------------------------------------------------------------------
// Modules

mod context;
mod decode;
mod encode;
mod equality;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use context::DecodeContext;
pub use decode::{decode_nested, decode_node, populate, populate_node};
pub use encode::{encode_attributes, encode_model, encode_nested};
pub use equality::{hash_model_into, model_eq, model_hash};
