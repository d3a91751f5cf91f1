//! A parsed descriptor document.
//!
//! `DocTree` owns the root value of a document together with the text it
//! was parsed from, and is the input to flattening.
//!
//! # Example
//!
//! ```
//! use pomassert::document::tree::DocTree;
//! use pomassert::document::node::DocValue;
//! use indexmap::IndexMap;
//!
//! let mut root = IndexMap::new();
//! root.insert("artifactId".to_string(), DocValue::from("shop"));
//! let tree = DocTree::new(DocValue::Object(root));
//!
//! let elements = tree.elements();
//! assert_eq!(elements.len(), 1);
//! assert_eq!(elements[0].path(), "artifactId");
//! ```

use super::node::DocValue;
use crate::path::element::PathElement;
use crate::path::flatten::flatten;

/// A complete descriptor document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTree {
    root: DocValue,
    /// The source text the tree was parsed from, if any
    original_source: Option<String>,
}

impl DocTree {
    /// Creates a tree with no source text.
    pub fn new(root: DocValue) -> Self {
        Self {
            root,
            original_source: None,
        }
    }

    /// Creates a tree remembering the text it was parsed from.
    pub fn with_source(root: DocValue, original_source: Option<String>) -> Self {
        Self {
            root,
            original_source,
        }
    }

    /// Returns a reference to the original source, if available.
    pub fn original_source(&self) -> Option<&str> {
        self.original_source.as_deref()
    }

    /// Returns a reference to the root value of the tree.
    pub fn root(&self) -> &DocValue {
        &self.root
    }

    /// Flattens the tree into one `PathElement` per node below the root.
    pub fn elements(&self) -> Vec<PathElement> {
        flatten(&self.root)
    }
}
