use alloc::borrow::Cow;
use alloc::string::String;

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::access::resolve_first;
use crate::error::node_kind;
use crate::walker::DecodeContext;
use crate::{HookStage, MapError, Model};

/// Decode a model from a JSON node.
///
/// The steps, in order:
///
/// 1. reject a node that is not an object;
/// 2. [`will_decode`](crate::ModelHooks::will_decode) may replace or reject it;
/// 3. [`select_class`](crate::ModelHooks::select_class) picks the class,
///    falling back to `T` when unset or not holdable by `T`;
/// 4. every included attribute is read from its first present key;
/// 5. [`did_decode`](crate::ModelHooks::did_decode) validates the result.
pub fn decode_node<T: Model>(node: &Value, cx: &mut DecodeContext) -> Result<T, MapError> {
    let Value::Object(object) = node else {
        return Err(MapError::not_an_object(T::type_name(), node));
    };
    with_object::<T, _>(object, cx, |object, cx| {
        let mut model = instantiate::<T>(object);
        populate(&mut model, object, cx);
        Ok(model)
    })
}

/// Decode a nested model, logging why it is absent.
#[inline]
pub fn decode_nested<T: Model>(node: &Value, cx: &mut DecodeContext) -> Option<T> {
    decode_node::<T>(node, cx)
        .inspect_err(|err| debug!("nested model dropped: {err}"))
        .ok()
}

/// Decode into an existing model.
///
/// Attributes are assigned to a copy which replaces `model` only once
/// [`did_decode`](crate::ModelHooks::did_decode) accepts it, so a rejected
/// node leaves `model` unchanged. The class of `model` is kept.
pub fn populate_node<T: Model>(model: &mut T, node: &Value, cx: &mut DecodeContext) -> Result<(), MapError> {
    let Value::Object(object) = node else {
        return Err(MapError::not_an_object(T::type_name(), node));
    };
    let staged = with_object::<T, _>(object, cx, |object, cx| {
        let mut staged = model.model_copy();
        populate(&mut staged, object, cx);
        Ok(staged)
    })?;
    *model = staged;
    Ok(())
}

/// Run the object hooks around `build`.
fn with_object<T, F>(object: &Map<String, Value>, cx: &mut DecodeContext, build: F) -> Result<T, MapError>
where
    T: Model,
    F: FnOnce(&Map<String, Value>, &mut DecodeContext) -> Result<T, MapError>,
{
    let Some(object) = T::will_decode(object) else {
        return Err(MapError::rejected(T::type_name(), HookStage::WillDecode));
    };

    let detached = matches!(object, Cow::Owned(_));
    if detached {
        cx.detach();
    }
    let built = build(&object, cx);
    if detached {
        cx.attach();
    }

    let mut model = built?;
    if model.did_decode(&object) {
        Ok(model)
    } else {
        Err(MapError::rejected(T::type_name(), HookStage::DidDecode))
    }
}

fn instantiate<T: Model>(object: &Map<String, Value>) -> T {
    let Some(class) = T::select_class(object) else {
        return T::zeroed();
    };
    T::new_for_class(&class).unwrap_or_else(|| {
        debug!(
            "`{}` cannot hold selected class `{}`, using the declared type",
            T::type_name(),
            class.type_name(),
        );
        T::zeroed()
    })
}

/// Assign every included attribute found in `object`.
///
/// Attributes without a present key, or whose node cannot be coerced, keep
/// their current value.
pub fn populate<T: Model>(model: &mut T, object: &Map<String, Value>, cx: &mut DecodeContext) {
    let schema = model.model_schema();
    for attr in schema.included() {
        if attr.kind().is_opaque() {
            continue;
        }
        let Some(node) = resolve_first(object, attr.keys()) else {
            continue;
        };
        let Some(slot) = model.attr_mut(attr.index()) else {
            continue;
        };
        if !slot.assign_node(node, cx) {
            trace!(
                "`{}.{}` keeps its value: cannot read {}",
                schema.type_name(),
                attr.name(),
                node_kind(node),
            );
        }
    }
}
