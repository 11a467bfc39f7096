use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use mm_utils::hash::HashMap;
use serde_json::Value;

use crate::error::node_kind;
use crate::walker::{DecodeContext, decode_nested, decode_node, encode_attributes, encode_model, populate_node};
use crate::{MapError, Model};

#[inline]
fn parse(text: impl AsRef<[u8]>) -> Result<Value, MapError> {
    serde_json::from_slice(text.as_ref()).map_err(MapError::Parse)
}

#[inline]
fn absent<T>(result: Result<T, MapError>) -> Option<T> {
    result.inspect_err(|err| debug!("{err}")).ok()
}

// -----------------------------------------------------------------------------
// Decode

/// Decode a model from a JSON node.
///
/// See [`decode_node`] for the steps.
#[inline]
pub fn try_decode_from_value<T: Model>(node: &Value) -> Result<T, MapError> {
    decode_node(node, &mut DecodeContext::new())
}

/// Decode a model from a JSON node, or `None` if it is not an object or a hook
/// rejects it.
#[inline]
pub fn decode_from_value<T: Model>(node: &Value) -> Option<T> {
    absent(try_decode_from_value(node))
}

/// Decode a model from JSON text.
pub fn try_decode_from_text<T: Model>(text: impl AsRef<[u8]>) -> Result<T, MapError> {
    let node = parse(text)?;
    try_decode_from_value(&node)
}

/// Decode a model from JSON text, or `None` on invalid text or a rejected object.
#[inline]
pub fn decode_from_text<T: Model>(text: impl AsRef<[u8]>) -> Option<T> {
    absent(try_decode_from_text(text))
}

// -----------------------------------------------------------------------------
// Populate

/// Assign the attributes found in `node` to `model`.
///
/// `model` is left unchanged when the result is an error.
#[inline]
pub fn try_populate_from_value<T: Model>(model: &mut T, node: &Value) -> Result<(), MapError> {
    populate_node(model, node, &mut DecodeContext::new())
}

/// Assign the attributes found in `node` to `model`, returning `false` and
/// leaving `model` unchanged if the node is rejected.
#[inline]
pub fn populate_from_value<T: Model>(model: &mut T, node: &Value) -> bool {
    absent(try_populate_from_value(model, node)).is_some()
}

/// [`populate_from_value`] from JSON text.
pub fn populate_from_text<T: Model>(model: &mut T, text: impl AsRef<[u8]>) -> bool {
    let populated = parse(text).and_then(|node| try_populate_from_value(model, &node));
    absent(populated).is_some()
}

// -----------------------------------------------------------------------------
// Encode

/// Encode a model to a JSON object node.
#[inline]
pub fn try_encode_to_value<T: Model>(model: &T) -> Result<Value, MapError> {
    encode_model(model)
}

/// Encode a model, or `None` if [`did_encode`](crate::ModelHooks::did_encode)
/// rejects it.
#[inline]
pub fn encode_to_value<T: Model>(model: &T) -> Option<Value> {
    absent(try_encode_to_value(model))
}

/// Encode a model to compact JSON text.
pub fn try_encode_to_text<T: Model>(model: &T) -> Result<String, MapError> {
    let node = try_encode_to_value(model)?;
    serde_json::to_string(&node).map_err(MapError::Serialize)
}

#[inline]
pub fn encode_to_text<T: Model>(model: &T) -> Option<String> {
    absent(try_encode_to_text(model))
}

/// Encode models to a JSON array, leaving out rejected ones.
pub fn encode_slice<T: Model>(models: &[T]) -> Value {
    Value::Array(models.iter().filter_map(encode_to_value).collect())
}

// -----------------------------------------------------------------------------
// Collections

/// Decode every object of a JSON array, skipping elements that fail.
pub fn try_decode_array<T: Model>(node: &Value) -> Result<Vec<T>, MapError> {
    let Value::Array(items) = node else {
        return Err(MapError::NotAnArray { found: node_kind(node) });
    };
    let mut cx = DecodeContext::new();
    Ok(items
        .iter()
        .filter_map(|item| decode_nested::<T>(item, &mut cx))
        .collect())
}

#[inline]
pub fn decode_array<T: Model>(node: &Value) -> Option<Vec<T>> {
    absent(try_decode_array(node))
}

/// [`decode_array`] from JSON text.
pub fn decode_array_from_text<T: Model>(text: impl AsRef<[u8]>) -> Option<Vec<T>> {
    absent(parse(text).and_then(|node| try_decode_array(&node)))
}

/// Decode every value of a JSON object, keyed by its member name and
/// skipping values that fail.
pub fn try_decode_map<T: Model>(node: &Value) -> Result<HashMap<String, T>, MapError> {
    let Value::Object(entries) = node else {
        return Err(MapError::NotAMap { found: node_kind(node) });
    };
    let mut cx = DecodeContext::new();
    Ok(entries
        .iter()
        .filter_map(|(key, item)| Some((key.clone(), decode_nested::<T>(item, &mut cx)?)))
        .collect())
}

#[inline]
pub fn decode_map<T: Model>(node: &Value) -> Option<HashMap<String, T>> {
    absent(try_decode_map(node))
}

/// [`decode_map`] from JSON text.
pub fn decode_map_from_text<T: Model>(text: impl AsRef<[u8]>) -> Option<HashMap<String, T>> {
    absent(parse(text).and_then(|node| try_decode_map(&node)))
}

// -----------------------------------------------------------------------------
// Misc

/// A deep copy of `model`, see [`Model::model_copy`].
#[inline]
pub fn model_copy<T: Model>(model: &T) -> T {
    model.model_copy()
}

/// A readable dump of the model: its type name and pretty-printed attributes.
///
/// Hooks are not run.
pub fn describe<T: Model>(model: &T) -> String {
    let node = Value::Object(encode_attributes(model));
    let body = serde_json::to_string_pretty(&node).unwrap_or_default();
    format!("{} {body}", model.model_schema().type_name())
}
