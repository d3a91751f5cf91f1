// tests/loader_tests.rs
use flate2::write::GzEncoder;
use flate2::Compression;
use pomassert::check::{Analyzer, Checker};
use pomassert::config::Config;
use pomassert::document::node::DocValue;
use pomassert::error::ParseError;
use pomassert::file::loader::load_document_file;
use pomassert::path::PathMatching;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const POM_XML: &str = r#"<project>
    <artifactId>shop</artifactId>
    <properties>
        <java.version>11</java.version>
    </properties>
</project>"#;

fn write(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn java_version(path: &Path) -> Option<String> {
    let tree = load_document_file(path).unwrap();
    tree.root()
        .get("properties")
        .and_then(|p| p.get("java.version"))
        .and_then(DocValue::string_form)
}

#[test]
fn test_load_each_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write(&dir, "pom.xml", POM_XML.as_bytes());
    let yaml = write(&dir, "pom.yaml", b"properties:\n  java.version: '11'\n");
    let json = write(&dir, "pom.json", br#"{"properties": {"java.version": "11"}}"#);

    for path in [xml, yaml, json] {
        assert_eq!(java_version(&path).as_deref(), Some("11"), "{:?}", path);
    }
}

#[test]
fn test_load_gzipped_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pom.xml.gz", &gzip(POM_XML));
    assert_eq!(java_version(&path).as_deref(), Some("11"));
}

#[test]
fn test_format_is_sniffed_without_extension() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write(&dir, "descriptor", POM_XML.as_bytes());
    let yaml = write(&dir, "Descriptorfile", b"properties:\n  java.version: '11'\n");

    assert_eq!(java_version(&xml).as_deref(), Some("11"));
    assert_eq!(java_version(&yaml).as_deref(), Some("11"));
}

#[test]
fn test_original_source_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pom.xml", POM_XML.as_bytes());
    let tree = load_document_file(&path).unwrap();
    assert_eq!(tree.original_source(), Some(POM_XML));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_document_file(dir.path().join("absent.xml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_malformed_document_carries_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pom.xml", b"<project><artifactId>shop</project>");
    let err = load_document_file(&path).unwrap_err();

    let parse_error = err
        .downcast_ref::<ParseError>()
        .expect("parse error in chain");
    assert_eq!(parse_error.format, "xml");
}

#[test]
fn test_corrupt_gzip_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pom.xml.gz", b"not gzip at all");
    assert!(load_document_file(&path).is_err());
}

#[test]
fn test_analyze_pom_at_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pom.xml", POM_XML.as_bytes());

    let checker = Checker::analyze_pom_at(&path).unwrap();
    let result = checker
        .checking("properties")
        .should()
        .have_property("java.version")
        .unwrap()
        .validate();
    assert!(result.is_ok());
}

#[test]
fn test_analyze_pom_at_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Checker::analyze_pom_at(dir.path().join("pom.xml")).is_err());
}

#[test]
fn test_analyze_default_document_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "descriptor.yaml", b"dependencies:\n  dependency:\n    artifactId: slf4j-api\n");
    let config = Config {
        default_document: path.to_string_lossy().into_owned(),
        path_matching: PathMatching::Literal,
        ..Config::default()
    };

    let checker = Checker::analyze_default(&config).unwrap();
    let result = checker
        .checking("dep")
        .should()
        .contain_value("slf4j-api")
        .unwrap()
        .validate();
    assert!(result.is_ok(), "literal matching from the config is applied");
}

#[test]
fn test_analyze_default_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        default_document: dir.path().join("pom.xml").to_string_lossy().into_owned(),
        ..Config::default()
    };
    assert!(Checker::analyze_default(&config).is_err());
}
