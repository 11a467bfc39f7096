use alloc::string::String;

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::{HookStage, MapError, Model};

/// Encode a model to a JSON object.
///
/// Included attributes are written at their primary key in declaration order,
/// then [`did_encode`](crate::ModelHooks::did_encode) may adjust or reject the
/// object.
pub fn encode_model<T: Model>(model: &T) -> Result<Value, MapError> {
    let mut object = encode_attributes(model);
    if model.did_encode(&mut object) {
        Ok(Value::Object(object))
    } else {
        Err(MapError::rejected(T::type_name(), HookStage::DidEncode))
    }
}

/// Encode a nested model, logging why it is omitted.
#[inline]
pub fn encode_nested<T: Model>(model: &T) -> Option<Value> {
    encode_model(model)
        .inspect_err(|err| debug!("nested model omitted: {err}"))
        .ok()
}

/// Write the included attributes of `model` without running hooks.
///
/// Attributes that encode to nothing (`None`, non-finite floats, opaque
/// values) are left out. When two attributes share a key, the first wins.
pub fn encode_attributes<T: Model>(model: &T) -> Map<String, Value> {
    let schema = model.model_schema();
    let mut object = Map::new();
    for attr in schema.included() {
        if attr.kind().is_opaque() {
            continue;
        }
        let Some(node) = model.attr(attr.index()).and_then(|value| value.encode_node()) else {
            continue;
        };
        if !attr.primary_key().insert(&mut object, node) {
            trace!(
                "`{}.{}` not written: `{}` is taken",
                schema.type_name(),
                attr.name(),
                attr.primary_key(),
            );
        }
    }
    object
}
