use alloc::string::{String, ToString};
use core::hash::{Hash, Hasher};

use mm_utils::hash::FixedHasher;
use serde_json::{Number, Value};

use crate::AttrValue;
use crate::info::{AttrKind, NumericKind, ScalarKind};
use crate::walker::DecodeContext;

// -----------------------------------------------------------------------------
// Node readers

/// Read an integer from a number or a numeric string, truncating fractions.
fn integer_from_node(node: &Value) -> Option<i128> {
    match node {
        Value::Number(number) => integer_from_number(number),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i128>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn integer_from_number(number: &Number) -> Option<i128> {
    if let Some(value) = number.as_i64() {
        Some(i128::from(value))
    } else if let Some(value) = number.as_u64() {
        Some(i128::from(value))
    } else {
        number.as_f64().and_then(truncate)
    }
}

fn truncate(value: f64) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }
    let value = value.trunc();
    // `as` saturates, so only values far outside every target are rejected here.
    (value >= i128::MIN as f64 && value <= i128::MAX as f64).then_some(value as i128)
}

/// Read a finite float from a number or a numeric string.
fn float_from_node(node: &Value) -> Option<f64> {
    let value = match node {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// `true`, `"true"`, `"yes"`, `"1"` and non-zero numbers read as `true`.
fn bool_from_node(node: &Value) -> Option<bool> {
    match node {
        Value::Bool(value) => Some(*value),
        Value::Number(number) => Some(number.as_f64().is_some_and(|value| value != 0.0)),
        Value::String(text) => {
            let text = text.trim();
            Some(["true", "yes", "1"].iter().any(|yes| text.eq_ignore_ascii_case(yes)))
        }
        _ => None,
    }
}

fn string_from_node(node: &Value) -> Option<String> {
    match node {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer_attr {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl AttrValue for $ty {
            #[inline]
            fn attr_kind() -> AttrKind {
                AttrKind::Scalar(ScalarKind::Numeric(NumericKind::$kind))
            }

            #[inline]
            fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
                integer_from_node(node).and_then(|value| <$ty>::try_from(value).ok())
            }

            #[inline]
            fn to_node(&self) -> Option<Value> {
                Some(Value::from(*self))
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
                *self
            }
        }
    )*};
}

impl_integer_attr!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
);

// -----------------------------------------------------------------------------
// Floats

macro_rules! impl_float_attr {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl AttrValue for $ty {
            #[inline]
            fn attr_kind() -> AttrKind {
                AttrKind::Scalar(ScalarKind::Numeric(NumericKind::$kind))
            }

            #[inline]
            fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
                float_from_node(node).map(|value| value as $ty)
            }

            /// Non-finite values have no JSON form and are omitted.
            #[inline]
            fn to_node(&self) -> Option<Value> {
                Number::from_f64(f64::from(*self)).map(Value::Number)
            }

            #[inline]
            fn attr_eq(&self, other: &Self) -> bool {
                self == other
            }

            #[inline]
            fn attr_hash(&self, state: &mut FixedHasher) {
                // `0.0 == -0.0`, so both must hash the same.
                let value = if *self == 0.0 { 0.0 } else { *self };
                state.write(&value.to_bits().to_le_bytes());
            }

            #[inline]
            fn attr_copy(&self) -> Self {
                *self
            }
        }
    )*};
}

impl_float_attr!(f32 => F32, f64 => F64);

// -----------------------------------------------------------------------------
// Bool and String

impl AttrValue for bool {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Scalar(ScalarKind::Bool)
    }

    #[inline]
    fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
        bool_from_node(node)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        Some(Value::Bool(*self))
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
        *self
    }
}

impl AttrValue for String {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Scalar(ScalarKind::String)
    }

    #[inline]
    fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
        string_from_node(node)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
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
    use core::hash::{BuildHasher, Hasher};

    use mm_utils::hash::FixedHashState;
    use serde_json::{Value, json};

    use crate::AttrValue;
    use crate::walker::DecodeContext;

    fn decode<T: AttrValue>(node: Value) -> Option<T> {
        T::from_node(&node, &mut DecodeContext::new())
    }

    fn hash_of<T: AttrValue>(value: &T) -> u64 {
        let mut state = FixedHashState.build_hasher();
        value.attr_hash(&mut state);
        state.finish()
    }

    #[test]
    fn integers() {
        assert_eq!(decode::<i32>(json!(42)), Some(42));
        assert_eq!(decode::<i32>(json!(" 42 ")), Some(42));
        assert_eq!(decode::<i32>(json!(3.9)), Some(3));
        assert_eq!(decode::<i32>(json!("-3.9")), Some(-3));
        assert_eq!(decode::<u8>(json!(300)), None);
        assert_eq!(decode::<u8>(json!(-1)), None);
        assert_eq!(decode::<u64>(json!(u64::MAX)), Some(u64::MAX));
        assert_eq!(decode::<i64>(json!("twelve")), None);
        assert_eq!(decode::<i64>(json!(true)), None);
        assert_eq!(decode::<i64>(Value::Null), None);
    }

    #[test]
    fn floats() {
        assert_eq!(decode::<f64>(json!(1.5)), Some(1.5));
        assert_eq!(decode::<f64>(json!("2.25")), Some(2.25));
        assert_eq!(decode::<f32>(json!(7)), Some(7.0));
        assert_eq!(decode::<f64>(json!("NaN")), None);
        assert_eq!(decode::<f64>(json!("inf")), None);

        assert_eq!(f64::NAN.to_node(), None);
        assert_eq!(0.5_f32.to_node(), Some(json!(0.5)));
        assert_eq!(hash_of(&0.0_f64), hash_of(&-0.0_f64));
    }

    #[test]
    fn bools() {
        assert_eq!(decode::<bool>(json!(true)), Some(true));
        assert_eq!(decode::<bool>(json!(0)), Some(false));
        assert_eq!(decode::<bool>(json!(2)), Some(true));
        assert_eq!(decode::<bool>(json!("YES")), Some(true));
        assert_eq!(decode::<bool>(json!("1")), Some(true));
        assert_eq!(decode::<bool>(json!("nope")), Some(false));
        assert_eq!(decode::<bool>(json!([])), None);
    }

    #[test]
    fn strings() {
        assert_eq!(decode::<String>(json!("a")), Some("a".to_string()));
        assert_eq!(decode::<String>(json!(12)), Some("12".to_string()));
        assert_eq!(decode::<String>(json!(false)), Some("false".to_string()));
        assert_eq!(decode::<String>(json!({})), None);
        assert_eq!(decode::<String>(Value::Null), None);
    }
}
