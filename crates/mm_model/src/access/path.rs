use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde_json::map::Entry;
use serde_json::{Map, Value};

// -----------------------------------------------------------------------------
// ParseError

/// An error from parsing a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: &'a str,
    /// The underlying error.
    pub error: Cow<'a, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Encountered an error at offset {} while parsing `{}`: {}",
            self.offset, self.path, self.error,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// KeyPath

/// A JSON key, or a dotted path into nested objects.
///
/// `"name"` addresses a top-level key, `"ext.desc"` addresses `desc` inside
/// the object at `ext`. Every segment must be non-empty.
///
/// # Example
///
/// ```
/// use mm_model::access::KeyPath;
/// use serde_json::json;
///
/// let path = KeyPath::parse("ext.desc").unwrap();
/// let node = json!({ "ext": { "desc": "types" } });
/// assert_eq!(path.resolve(node.as_object().unwrap()), Some(&json!("types")));
///
/// assert!(KeyPath::parse("ext..desc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Box<[Box<str>]>,
}

impl KeyPath {
    /// Split `raw` at every `.` into a path.
    pub fn parse(raw: &str) -> Result<Self, ParseError<'_>> {
        let mut segments = Vec::new();
        let mut offset = 0;
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(ParseError {
                    offset,
                    path: raw,
                    error: Cow::Borrowed("empty key segment"),
                });
            }
            segments.push(Box::from(segment));
            offset += segment.len() + 1;
        }
        Ok(Self {
            segments: segments.into_boxed_slice(),
        })
    }

    /// A path of one key, taken verbatim (dots included).
    #[inline]
    pub fn single(key: &str) -> Self {
        Self {
            segments: Box::new([Box::from(key)]),
        }
    }

    #[inline]
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> {
        self.segments.iter().map(|segment| &**segment)
    }

    /// Returns `true` if the path has more than one segment.
    #[inline]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Look the path up in `object`.
    ///
    /// Returns `None` if a segment is missing or an intermediate node is not an
    /// object. An explicit `null` leaf is returned as `Some(&Value::Null)`.
    pub fn resolve<'v>(&self, object: &'v Map<String, Value>) -> Option<&'v Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut node = object.get(&**first)?;
        for segment in rest {
            node = node.as_object()?.get(&**segment)?;
        }
        Some(node)
    }

    /// Write `value` at the path, creating intermediate objects as needed.
    ///
    /// Returns `false` and leaves `object` unchanged for the leaf if an
    /// intermediate node is not an object or the leaf is already present.
    pub fn insert(&self, object: &mut Map<String, Value>, value: Value) -> bool {
        let Some((leaf, parents)) = self.segments.split_last() else {
            return false;
        };
        let mut current = object;
        for segment in parents {
            let next = current
                .entry(&**segment)
                .or_insert_with(|| Value::Object(Map::new()));
            let Value::Object(next) = next else {
                return false;
            };
            current = next;
        }
        match current.entry(&**leaf) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = String;

    #[inline]
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(node: Value) -> Map<String, Value> {
        match node {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_segments() {
        let path = KeyPath::parse("ext.desc").unwrap();
        assert!(path.is_nested());
        assert_eq!(path.segments().collect::<Vec<_>>(), ["ext", "desc"]);
        assert_eq!(path.to_string(), "ext.desc");

        let err = KeyPath::parse("ext.").unwrap_err();
        assert_eq!(err.offset, 4);
        assert!(KeyPath::parse("").is_err());
        assert!(KeyPath::parse(".ext").is_err());
    }

    #[test]
    fn resolve_nested() {
        let node = object(json!({ "ext": { "desc": "d", "none": null }, "flat": 1 }));
        let desc = KeyPath::parse("ext.desc").unwrap();
        assert_eq!(desc.resolve(&node), Some(&json!("d")));

        let none = KeyPath::parse("ext.none").unwrap();
        assert_eq!(none.resolve(&node), Some(&Value::Null));

        let through_scalar = KeyPath::parse("flat.x").unwrap();
        assert_eq!(through_scalar.resolve(&node), None);
    }

    #[test]
    fn insert_creates_parents() {
        let mut node = Map::new();
        let desc = KeyPath::parse("ext.desc").unwrap();
        let lang = KeyPath::parse("ext.lang").unwrap();
        assert!(desc.insert(&mut node, json!("d")));
        assert!(lang.insert(&mut node, json!("en")));
        assert_eq!(Value::Object(node), json!({ "ext": { "desc": "d", "lang": "en" } }));
    }

    #[test]
    fn insert_keeps_existing() {
        let mut node = object(json!({ "ext": 3, "name": "a" }));
        let desc = KeyPath::parse("ext.desc").unwrap();
        assert!(!desc.insert(&mut node, json!("d")));
        assert!(!KeyPath::single("name").insert(&mut node, json!("b")));
        assert_eq!(Value::Object(node), json!({ "ext": 3, "name": "a" }));
    }
}
