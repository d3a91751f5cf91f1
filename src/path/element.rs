//! Addressable `(path, value)` pairs produced by flattening.

use crate::document::node::DocValue;
use serde::Serialize;

/// One node of a flattened document.
///
/// `path` joins map keys with `.` and sequence positions as `[i]`, relative to
/// the document root, e.g. `dependencies.dependency[0].artifactId`. For
/// container nodes `value` holds the whole sub-structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathElement {
    path: String,
    value: DocValue,
}

impl PathElement {
    pub fn new(path: impl Into<String>, value: DocValue) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &DocValue {
        &self.value
    }
}
