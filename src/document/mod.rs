//! Descriptor documents as generic trees.
//!
//! Parsers turn XML, YAML or JSON text into a [`tree::DocTree`] whose
//! [`node::DocValue`]s are ordered mappings, sequences and scalars.

pub mod node;
pub mod parser;
pub mod tree;
