//! Document value representation.
//!
//! This module provides the generic tree shape every descriptor is reduced to
//! before it is flattened: ordered mappings with string keys, sequences, and
//! scalars. Parsers for XML, YAML and JSON all produce a `DocValue`, so the
//! assertion engine never sees the source format.
//!
//! # Example
//!
//! ```
//! use pomassert::document::node::{DocValue, DocNumber};
//! use indexmap::IndexMap;
//!
//! let mut properties = IndexMap::new();
//! properties.insert("java.version".to_string(), DocValue::String("11".to_string()));
//! properties.insert("retries".to_string(), DocValue::Number(DocNumber::Integer(3)));
//!
//! let value = DocValue::Object(properties);
//! assert!(value.is_container());
//! assert_eq!(value.to_string(), "{java.version=11, retries=3}");
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Represents document numbers (integer or float)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for DocNumber {
    /// Whole floats keep one fractional digit, so `4.0` stays `4.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocNumber::Integer(i) => write!(f, "{}", i),
            DocNumber::Float(fl) if fl.is_finite() && fl.fract() == 0.0 => write!(f, "{:.1}", fl),
            DocNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A node of a parsed descriptor document.
///
/// Objects keep their key order, which matters for how nodes render and for
/// the order elements are emitted during flattening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocValue {
    /// A mapping of keys to child values
    Object(IndexMap<String, DocValue>),
    /// An ordered sequence of values
    Array(Vec<DocValue>),
    String(String),
    Number(DocNumber),
    Boolean(bool),
    Null,
}

impl DocValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, DocValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, DocValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use pomassert::document::node::DocValue;
    ///
    /// assert!(DocValue::Array(vec![]).is_container());
    /// assert!(!DocValue::Boolean(true).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, DocValue::Object(_) | DocValue::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    /// Looks up a direct child of an object by key.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        match self {
            DocValue::Object(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Looks up a nested child by a dotted key path, e.g. `goals.goal`.
    ///
    /// Only object keys are followed; sequences end the lookup.
    pub fn get_dotted(&self, dotted: &str) -> Option<&DocValue> {
        dotted
            .split('.')
            .try_fold(self, |current, key| current.get(key))
    }

    /// Returns the string form used by value predicates, or `None` for null.
    ///
    /// Null never matches a value comparison, so it has no string form here
    /// even though it renders as `null` inside containers.
    pub fn string_form(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Iterates a value that may hold one item or a sequence of items.
    ///
    /// XML descriptors produce a bare value for a single repeated element and
    /// a sequence once it occurs twice, so callers treat both alike.
    pub fn one_or_many(&self) -> Box<dyn Iterator<Item = &DocValue> + '_> {
        match self {
            DocValue::Array(items) => Box::new(items.iter()),
            other => Box::new(std::iter::once(other)),
        }
    }
}

impl fmt::Display for DocValue {
    /// Renders scalars bare, arrays as `[a, b]` and objects as `{k=v, k2=v2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocValue::Object(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            DocValue::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            DocValue::String(s) => write!(f, "{}", s),
            DocValue::Number(n) => write!(f, "{}", n),
            DocValue::Boolean(b) => write!(f, "{}", b),
            DocValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for DocValue {
    fn from(value: &str) -> Self {
        DocValue::String(value.to_string())
    }
}

impl From<String> for DocValue {
    fn from(value: String) -> Self {
        DocValue::String(value)
    }
}
