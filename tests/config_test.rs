// tests/config_test.rs
use git_versioner::config::{
    load_config, Config, StrategyKind, CONFIG_FILE_NAME, DEFAULT_KEYWORD_PATTERN,
    DEFAULT_VERSION_PATTERN,
};
use git_versioner::domain::DEFAULT_TAG_PATTERN;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.strategy, StrategyKind::Tag);
    assert_eq!(config.tag_pattern, DEFAULT_TAG_PATTERN);
    assert_eq!(config.version_pattern, DEFAULT_VERSION_PATTERN);
    assert_eq!(config.keyword_pattern, DEFAULT_KEYWORD_PATTERN);
    assert_eq!(config.release_branches, vec!["main", "master"]);
    assert_eq!(config.version_override, None);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
strategy = "keyword"
release_branches = ["trunk"]
keyword_pattern = "%M.%m.%p(-%B)"

[keywords]
major = "BREAKING"
use_regex = true

[initial]
major = 1
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.strategy, StrategyKind::Keyword);
    assert_eq!(config.release_branches, vec!["trunk"]);
    assert_eq!(config.active_pattern(), "%M.%m.%p(-%B)");
    assert_eq!(config.keywords.major, "BREAKING");
    assert_eq!(config.keywords.minor, "[minor]");
    assert!(config.keywords.use_regex);
    assert_eq!(config.initial.major, 1);
    assert_eq!(config.initial.minor, 0);
}

#[test]
fn test_override_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"version_override = \"2.0.0-rc.1\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.override_version(), Some("2.0.0-rc.1"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"strategy = [unclosed").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}

#[test]
#[serial]
fn test_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "release_branches = [\"production\"]\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    env::set_current_dir(original).unwrap();

    assert_eq!(loaded.unwrap().release_branches, vec!["production"]);
}
