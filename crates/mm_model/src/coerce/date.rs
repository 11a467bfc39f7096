use alloc::format;
use alloc::string::{String, ToString};
use core::hash::Hash;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mm_utils::hash::FixedHasher;
use serde_json::Value;

use crate::AttrValue;
use crate::info::AttrKind;
use crate::walker::DecodeContext;

/// Accepted date formats, tried in order. The first is used for encoding.
///
/// Dates without an offset are read as UTC. The first format also accepts a
/// `Z` suffix for UTC.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

/// Parse a date string with the first matching entry of [`DATE_FORMATS`].
///
/// ```
/// use mm_model::coerce::parse_date;
///
/// let date = parse_date("1965-07-31T00:00:00+0000").unwrap();
/// assert_eq!(date, parse_date("1965-07-31").unwrap());
/// assert!(parse_date("31/07/1965").is_none());
/// ```
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let parsed = match text.strip_suffix(['Z', 'z']) {
        Some(local) => DateTime::parse_from_str(&format!("{local}+0000"), DATE_FORMATS[0]),
        None => DateTime::parse_from_str(text, DATE_FORMATS[0]),
    };
    if let Ok(date) = parsed {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(text, DATE_FORMATS[1]) {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(text, DATE_FORMATS[2])
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Format a date with the first entry of [`DATE_FORMATS`].
#[inline]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMATS[0]).to_string()
}

impl AttrValue for DateTime<Utc> {
    #[inline]
    fn attr_kind() -> AttrKind {
        AttrKind::Date
    }

    #[inline]
    fn from_node(node: &Value, _: &mut DecodeContext) -> Option<Self> {
        node.as_str().and_then(parse_date)
    }

    #[inline]
    fn to_node(&self) -> Option<Value> {
        Some(Value::String(format_date(self)))
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

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 10, 20, 30).unwrap();
        assert_eq!(parse_date("2024-03-09T10:20:30+0000"), Some(expected));
        assert_eq!(parse_date("2024-03-09T12:20:30+0200"), Some(expected));
        assert_eq!(parse_date("2024-03-09T10:20:30Z"), Some(expected));
        assert_eq!(expected.to_node(), Some(json!("2024-03-09T10:20:30+0000")));
        assert_eq!(parse_date("2024-03-09 10:20:30"), Some(expected));
        assert_eq!(
            parse_date("2024-03-09"),
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("09.03.2024"), None);
    }

    #[test]
    fn node_round_trip() {
        let date = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let node = date.to_node().unwrap();
        assert_eq!(node, json!("1999-12-31T23:59:59+0000"));

        let mut cx = DecodeContext::new();
        assert_eq!(DateTime::<Utc>::from_node(&node, &mut cx), Some(date));
        assert_eq!(DateTime::<Utc>::from_node(&json!(946684799), &mut cx), None);
    }
}
