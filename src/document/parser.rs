//! Parsing of descriptor text into `DocTree` structures.
//!
//! Three source formats are supported, all reduced to the same generic tree:
//!
//! - XML (`pom.xml`): the root element is dropped and its children become the
//!   top-level mapping. Repeated sibling elements turn into a sequence,
//!   attributes become entries, text-only elements become strings and empty
//!   elements become `""`.
//! - YAML, via `serde_yaml`. Non-string mapping keys are rendered as strings.
//! - JSON, via `serde_json` with key order preserved.
//!
//! # Example
//!
//! ```
//! use pomassert::document::parser::parse_xml;
//!
//! let xml = r#"<project>
//!   <modules>
//!     <module>customer</module>
//!     <module>product</module>
//!   </modules>
//! </project>"#;
//! let tree = parse_xml(xml).unwrap();
//!
//! let modules = tree.root().get_dotted("modules.module").unwrap();
//! assert_eq!(modules.to_string(), "[customer, product]");
//! ```

use super::node::{DocNumber, DocValue};
use super::tree::DocTree;
use crate::error::ParseError;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Source format of a descriptor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Xml,
    Yaml,
    Json,
}

impl DocFormat {
    /// Determines the format from a file name, ignoring a trailing `.gz`.
    ///
    /// Examples:
    /// - `pom.xml` → Xml
    /// - `pom.yaml.gz` → Yaml
    /// - `descriptor` → None
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);

        if base.ends_with(".xml") {
            Some(DocFormat::Xml)
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Some(DocFormat::Yaml)
        } else if base.ends_with(".json") {
            Some(DocFormat::Json)
        } else {
            None
        }
    }

    /// Guesses the format from content: markup is XML, anything else YAML.
    ///
    /// YAML is a superset of JSON, so JSON content parses either way.
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('<') {
            DocFormat::Xml
        } else {
            DocFormat::Yaml
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocFormat::Xml => "xml",
            DocFormat::Yaml => "yaml",
            DocFormat::Json => "json",
        }
    }
}

/// Parses `content` in the given format.
pub fn parse_document(content: &str, format: DocFormat) -> Result<DocTree, ParseError> {
    match format {
        DocFormat::Xml => parse_xml(content),
        DocFormat::Yaml => parse_yaml(content),
        DocFormat::Json => parse_json(content),
    }
}

/// Parses a YAML string into a `DocTree`.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not valid YAML.
pub fn parse_yaml(yaml_str: &str) -> Result<DocTree, ParseError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml_str).map_err(|e| ParseError::new("yaml", e.to_string()))?;
    Ok(DocTree::with_source(
        convert_yaml_value(&value),
        Some(yaml_str.to_string()),
    ))
}

/// Parses a JSON string into a `DocTree`.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not valid JSON.
pub fn parse_json(json_str: &str) -> Result<DocTree, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::new("json", e.to_string()))?;
    Ok(DocTree::with_source(
        convert_json_value(&value),
        Some(json_str.to_string()),
    ))
}

/// Parses an XML string into a `DocTree`.
///
/// # Errors
///
/// Returns a `ParseError` for malformed markup, mismatched or unclosed tags,
/// and documents without a root element.
pub fn parse_xml(xml_str: &str) -> Result<DocTree, ParseError> {
    let mut reader = Reader::from_str(xml_str);
    let mut stack: Vec<XmlFrame> = Vec::new();
    let mut root: Option<DocValue> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ParseError::new(
                "xml",
                format!("error at position {}: {}", reader.buffer_position(), e),
            )
        })?;

        match event {
            Event::Start(start) => stack.push(XmlFrame::open(&start)?),
            Event::Empty(start) => {
                let frame = XmlFrame::open(&start)?;
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ParseError::new("xml", "unexpected closing tag"))?;
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ParseError::new("xml", e.to_string()))?;
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::new(
            "xml",
            format!("unclosed element '{}'", open.name),
        ));
    }

    let root = match root {
        Some(DocValue::String(text)) if text.is_empty() => DocValue::Object(IndexMap::new()),
        Some(value) => value,
        None => return Err(ParseError::new("xml", "document has no root element")),
    };

    Ok(DocTree::with_source(root, Some(xml_str.to_string())))
}

/// An XML element whose closing tag has not been read yet.
struct XmlFrame {
    name: String,
    children: IndexMap<String, DocValue>,
    text: String,
}

impl XmlFrame {
    fn open(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut children = IndexMap::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::new("xml", e.to_string()))?;
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::new("xml", e.to_string()))?;
            insert_repeated(&mut children, key, DocValue::String(value.into_owned()));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn into_value(self) -> DocValue {
        let text = self.text.trim();
        if self.children.is_empty() {
            return DocValue::String(text.to_string());
        }

        let mut children = self.children;
        if !text.is_empty() {
            children.insert(String::new(), DocValue::String(text.to_string()));
        }
        DocValue::Object(children)
    }
}

fn close_frame(
    frame: XmlFrame,
    stack: &mut [XmlFrame],
    root: &mut Option<DocValue>,
) -> Result<(), ParseError> {
    let name = frame.name.clone();
    let value = frame.into_value();

    match stack.last_mut() {
        Some(parent) => insert_repeated(&mut parent.children, name, value),
        None if root.is_none() => *root = Some(value),
        None => {
            return Err(ParseError::new(
                "xml",
                format!("unexpected second root element '{}'", name),
            ))
        }
    }
    Ok(())
}

/// Inserts a child, turning repeated keys into a sequence.
fn insert_repeated(children: &mut IndexMap<String, DocValue>, key: String, value: DocValue) {
    match children.get_mut(&key) {
        Some(DocValue::Array(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, DocValue::Null);
            *existing = DocValue::Array(vec![first, value]);
        }
        None => {
            children.insert(key, value);
        }
    }
}

fn convert_yaml_value(value: &serde_yaml::Value) -> DocValue {
    match value {
        serde_yaml::Value::Mapping(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| (yaml_key_to_string(k), convert_yaml_value(v)))
                .collect();
            DocValue::Object(entries)
        }
        serde_yaml::Value::Sequence(items) => {
            DocValue::Array(items.iter().map(convert_yaml_value).collect())
        }
        serde_yaml::Value::String(s) => DocValue::String(s.clone()),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => DocValue::Number(DocNumber::Integer(i)),
            None => DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0))),
        },
        serde_yaml::Value::Bool(b) => DocValue::Boolean(*b),
        serde_yaml::Value::Null => DocValue::Null,
        serde_yaml::Value::Tagged(tagged) => convert_yaml_value(&tagged.value),
    }
}

fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        other => convert_yaml_value(other).to_string(),
    }
}

fn convert_json_value(value: &serde_json::Value) -> DocValue {
    match value {
        serde_json::Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| (k.clone(), convert_json_value(v)))
                .collect();
            DocValue::Object(entries)
        }
        serde_json::Value::Array(items) => {
            DocValue::Array(items.iter().map(convert_json_value).collect())
        }
        serde_json::Value::String(s) => DocValue::String(s.clone()),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => DocValue::Number(DocNumber::Integer(i)),
            None => DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0))),
        },
        serde_json::Value::Bool(b) => DocValue::Boolean(*b),
        serde_json::Value::Null => DocValue::Null,
    }
}
