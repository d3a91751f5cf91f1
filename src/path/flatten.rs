//! Flattening of nested documents into path/value pairs.

use super::element::PathElement;
use crate::document::node::DocValue;

/// Flattens `root` into one element per node reachable below it.
///
/// Mapping entries extend the path with `.key` (no dot at the root level) and
/// sequence items with `[i]`. Container nodes are emitted as well as leaves,
/// each carrying its full sub-structure. Elements come out in pre-order, but
/// callers should only rely on path matching, not on position.
///
/// # Example
///
/// ```
/// use pomassert::document::parser::parse_yaml;
/// use pomassert::path::flatten::flatten;
///
/// let tree = parse_yaml("modules:\n  module: [customer, product]\n").unwrap();
/// let paths: Vec<String> = flatten(tree.root())
///     .iter()
///     .map(|e| e.path().to_string())
///     .collect();
///
/// assert_eq!(
///     paths,
///     vec!["modules", "modules.module", "modules.module[0]", "modules.module[1]"]
/// );
/// ```
pub fn flatten(root: &DocValue) -> Vec<PathElement> {
    let mut elements = Vec::new();
    traverse("", root, &mut elements);
    tracing::trace!(count = elements.len(), "flattened document");
    elements
}

fn traverse(path: &str, value: &DocValue, elements: &mut Vec<PathElement>) {
    match value {
        DocValue::Object(entries) => {
            for (key, child) in entries {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                elements.push(PathElement::new(child_path.clone(), child.clone()));
                traverse(&child_path, child, elements);
            }
        }
        DocValue::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let child_path = format!("{}[{}]", path, idx);
                elements.push(PathElement::new(child_path.clone(), child.clone()));
                traverse(&child_path, child, elements);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::DocNumber;
    use indexmap::IndexMap;

    fn object(entries: Vec<(&str, DocValue)>) -> DocValue {
        DocValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert!(flatten(&DocValue::from("plain")).is_empty());
        assert!(flatten(&DocValue::Null).is_empty());
    }

    #[test]
    fn test_nested_paths_and_container_values() {
        let root = object(vec![(
            "dependencies",
            object(vec![(
                "dependency",
                DocValue::Array(vec![
                    object(vec![("artifactId", DocValue::from("junit"))]),
                    object(vec![("artifactId", DocValue::from("slf4j"))]),
                ]),
            )]),
        )]);

        let elements = flatten(&root);
        let paths: Vec<&str> = elements.iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec![
                "dependencies",
                "dependencies.dependency",
                "dependencies.dependency[0]",
                "dependencies.dependency[0].artifactId",
                "dependencies.dependency[1]",
                "dependencies.dependency[1].artifactId",
            ]
        );

        assert!(elements[1].value().is_array());
        assert_eq!(elements[3].value(), &DocValue::from("junit"));
    }

    #[test]
    fn test_root_sequence_uses_bare_indices() {
        let root = DocValue::Array(vec![
            DocValue::Number(DocNumber::Integer(1)),
            DocValue::Array(vec![DocValue::Boolean(true)]),
        ]);

        let paths: Vec<String> = flatten(&root)
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        assert_eq!(paths, vec!["[0]", "[1]", "[1][0]"]);
    }

    #[test]
    fn test_empty_containers_emit_no_children() {
        let root = object(vec![
            ("modules", DocValue::Array(vec![])),
            ("properties", object(vec![])),
        ]);

        let elements = flatten(&root);
        assert_eq!(elements.len(), 2);
    }
}
