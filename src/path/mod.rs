//! Path addressing for flattened documents.
//!
//! A document is flattened into `PathElement`s whose paths join map keys
//! with `.` and sequence positions with `[i]`:
//!
//! - `properties.java.version` - a nested mapping entry
//! - `modules.module[0]` - the first item of a sequence
//! - `dependencies.dependency[1].artifactId` - a field of a sequence item
//!
//! Queries compare these strings against a given node prefix and a tag
//! suffix, see [`matching::PathMatching`].

pub mod element;
pub mod flatten;
pub mod matching;

pub use element::PathElement;
pub use flatten::flatten;
pub use matching::PathMatching;
