use pomassert::config::Config;
use pomassert::path::PathMatching;
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.default_document, "pom.xml");
    assert_eq!(config.path_matching, PathMatching::Segment);
    assert_eq!(config.module_root, PathBuf::from("."));
    assert_eq!(config.module_descriptor, "pom.xml");
}

#[test]
fn test_custom_config() {
    let config = Config {
        default_document: "descriptor.yaml".to_string(),
        path_matching: PathMatching::Literal,
        module_root: PathBuf::from("services"),
        module_descriptor: "descriptor.yaml".to_string(),
    };

    assert_eq!(config.default_document, "descriptor.yaml");
    assert_eq!(config.path_matching, PathMatching::Literal);
    assert_eq!(config.module_root, PathBuf::from("services"));
}

#[test]
fn test_config_serialization() {
    let config = Config {
        path_matching: PathMatching::Literal,
        ..Config::default()
    };

    let toml_string = toml::to_string(&config).unwrap();
    assert!(toml_string.contains("path_matching = \"literal\""));
    assert!(toml_string.contains("default_document = \"pom.xml\""));

    let parsed: Config = toml::from_str(&toml_string).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_empty_config_is_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_unknown_matching_mode_is_rejected() {
    let result: Result<Config, _> = toml::from_str("path_matching = \"fuzzy\"");
    assert!(result.is_err());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/pomassert/config.toml"));
    }
}
