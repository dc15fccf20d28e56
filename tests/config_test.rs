//! Integration tests for Settings loading with layered merge semantics.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise project config merging on top of the compiled defaults.

use std::fs;

use tempfile::TempDir;

use santree::application::ApplicationError;
use santree::config::{config_template, project_config_path, Settings};
use santree::domain::{GameParser, GrammarOptions, ParseOptions};

#[test]
fn given_no_project_config_when_load_then_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.tree.root_label, "Game");
    assert!(!settings.grammar.castling_suffix);
    assert!(!settings.parser.strict_numbering);
}

#[test]
fn given_project_config_when_load_then_overrides_only_given_keys() {
    // Arrange
    let project = TempDir::new().unwrap();
    let content = r#"
[grammar]
castling_suffix = true

[tree]
root_label = "Partida"
"#;
    fs::write(project_config_path(project.path()), content).unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert!(settings.grammar.castling_suffix);
    assert!(!settings.parser.strict_numbering, "not specified, keeps default");
    assert_eq!(settings.tree.root_label, "Partida");
    assert_eq!(
        settings.parse_options(),
        ParseOptions {
            grammar: GrammarOptions {
                castling_suffix: true
            },
            strict_numbering: false,
        }
    );
}

#[test]
fn given_project_config_when_parsing_then_options_reach_parser() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        project_config_path(project.path()),
        "[parser]\nstrict_numbering = true\n",
    )
    .unwrap();
    let settings = Settings::load(Some(project.path())).unwrap();

    // Act
    let result = GameParser::new(settings.parse_options()).parse("2. e4 e5");

    // Assert
    assert!(result.is_err());
}

#[test]
fn given_malformed_project_config_when_load_then_config_error() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        project_config_path(project.path()),
        "[tree]\nroot_label = \n",
    )
    .unwrap();

    // Act
    let result = Settings::load(Some(project.path()));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_file_when_load_file_then_equals_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("santree.toml");
    fs::write(&path, config_template()).unwrap();

    // Act
    let settings = Settings::load_file(&path).unwrap();

    // Assert
    assert_eq!(settings, Settings::default());
}
