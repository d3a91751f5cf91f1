//! Matching of element paths against a given node and a tag name.

use serde::{Deserialize, Serialize};

/// How a path is compared against the given node prefix and tag suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// Plain `starts_with` / `ends_with` on the path string.
    ///
    /// A given node of `dep` also matches `dependencies`.
    Literal,
    /// Matches only on `.` / `[` segment boundaries.
    #[default]
    Segment,
}

impl PathMatching {
    /// Returns true if `path` lies at or below `node`.
    ///
    /// # Example
    ///
    /// ```
    /// use pomassert::path::matching::PathMatching;
    ///
    /// assert!(PathMatching::Segment.is_under("modules.module[0]", "modules.module"));
    /// assert!(!PathMatching::Segment.is_under("dependencies", "dep"));
    /// assert!(PathMatching::Literal.is_under("dependencies", "dep"));
    /// ```
    pub fn is_under(self, path: &str, node: &str) -> bool {
        match self {
            PathMatching::Literal => path.starts_with(node),
            PathMatching::Segment => {
                if node.is_empty() {
                    return true;
                }
                match path.strip_prefix(node) {
                    Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
                    None => false,
                }
            }
        }
    }

    /// Returns true if `path` ends with the tag `tag`.
    pub fn ends_with_tag(self, path: &str, tag: &str) -> bool {
        match self {
            PathMatching::Literal => path.ends_with(tag),
            PathMatching::Segment => match path.strip_suffix(tag) {
                Some(head) => head.is_empty() || head.ends_with('.') || tag.starts_with('['),
                None => false,
            },
        }
    }
}
