//! Fluent structural assertions for build-descriptor documents.
//!
//! Descriptors (`pom.xml`, or YAML/JSON equivalents) are parsed into a generic
//! tree, flattened into `(path, value)` pairs, and checked with chains such as
//!
//! ```
//! use pomassert::check::{Analyzer, Checker};
//! use pomassert::document::parser::parse_xml;
//!
//! let tree = parse_xml(
//!     "<project><modules><module>customer</module><module>product</module></modules></project>",
//! )
//! .unwrap();
//! let checker = Checker::from_tree(&tree);
//!
//! checker
//!     .checking("modules.module")
//!     .should()
//!     .contain_value("customer")
//!     .unwrap()
//!     .and()
//!     .contain_value("product")
//!     .unwrap()
//!     .validate()
//!     .unwrap();
//! ```
//!
//! Mismatches are collected, not raised: a chain only fails when `validate`
//! is called on it.

pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod path;
