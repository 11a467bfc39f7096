use core::fmt;

use serde_json::Value;
use thiserror::Error;

/// The user hook that refused a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    WillDecode,
    DidDecode,
    DidEncode,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WillDecode => "will_decode",
            Self::DidDecode => "did_decode",
            Self::DidEncode => "did_encode",
        })
    }
}

/// Why a decode or encode produced no result.
///
/// The plain entry points (`decode_from_value`, `encode_to_value`, ...) log this
/// error at debug level and return `None`; the `try_*` variants return it.
/// Attribute-level coercion failures never surface here: the attribute keeps
/// its default and the walk continues.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid JSON text: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to write JSON text: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("`{type_name}` expects a JSON object, found {found}")]
    NotAnObject {
        type_name: &'static str,
        found: &'static str,
    },
    #[error("expected a JSON array, found {found}")]
    NotAnArray { found: &'static str },
    #[error("expected a JSON object of models, found {found}")]
    NotAMap { found: &'static str },
    #[error("`{type_name}` rejected the object in `{hook}`")]
    Rejected {
        type_name: &'static str,
        hook: HookStage,
    },
}

impl MapError {
    #[inline]
    pub(crate) fn not_an_object(type_name: &'static str, node: &Value) -> Self {
        Self::NotAnObject {
            type_name,
            found: node_kind(node),
        }
    }

    #[inline]
    pub(crate) fn rejected(type_name: &'static str, hook: HookStage) -> Self {
        Self::Rejected { type_name, hook }
    }
}

/// A short name of the JSON node kind, for diagnostics.
pub(crate) fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = MapError::not_an_object("Book", &Value::from(3));
        assert_eq!(err.to_string(), "`Book` expects a JSON object, found a number");

        let err = MapError::rejected("Book", HookStage::DidDecode);
        assert_eq!(err.to_string(), "`Book` rejected the object in `did_decode`");
    }
}
