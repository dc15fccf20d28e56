//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/santree/santree.toml`
//! 3. Project config: `<project_dir>/.santree.toml`
//! 4. Environment variables: `SANTREE_*` prefix
//!
//! Command-line switches are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::{GrammarOptions, ParseOptions, DEFAULT_ROOT_LABEL};

/// Move grammar switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrammarSettings {
    /// Accept `O-O+`, `O-O-O#` and friends
    pub castling_suffix: bool,
}

/// Turn sequencing switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserSettings {
    /// Require turn numbers 1, 2, 3, ...
    pub strict_numbering: bool,
}

/// Turn tree presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Label of the synthetic root node
    pub root_label: String,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

/// Unified configuration for santree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub grammar: GrammarSettings,
    pub parser: ParserSettings,
    pub tree: TreeSettings,
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub grammar: RawGrammarSettings,
    pub parser: RawParserSettings,
    pub tree: RawTreeSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGrammarSettings {
    pub castling_suffix: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawParserSettings {
    pub strict_numbering: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeSettings {
    pub root_label: Option<String>,
}

/// Get the XDG config directory for santree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "santree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("santree.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".santree.toml")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a `.santree.toml`
    #[instrument(level = "debug")]
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = project_config_path(dir);
            if local_path.exists() {
                debug!("project config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load settings from exactly one file on top of the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            grammar: GrammarSettings {
                castling_suffix: overlay
                    .grammar
                    .castling_suffix
                    .unwrap_or(self.grammar.castling_suffix),
            },
            parser: ParserSettings {
                strict_numbering: overlay
                    .parser
                    .strict_numbering
                    .unwrap_or(self.parser.strict_numbering),
            },
            tree: TreeSettings {
                root_label: overlay
                    .tree
                    .root_label
                    .clone()
                    .unwrap_or_else(|| self.tree.root_label.clone()),
            },
        }
    }

    /// Apply SANTREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `SANTREE_TREE__ROOT_LABEL=Partida`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SANTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("grammar.castling_suffix") {
            settings.grammar.castling_suffix = val;
        }
        if let Ok(val) = config.get_bool("parser.strict_numbering") {
            settings.parser.strict_numbering = val;
        }
        if let Ok(val) = config.get_string("tree.root_label") {
            settings.tree.root_label = val;
        }

        Ok(settings)
    }

    /// Parser options derived from these settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            grammar: GrammarOptions {
                castling_suffix: self.grammar.castling_suffix,
            },
            strict_numbering: self.parser.strict_numbering,
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Commented template written by `config init`.
pub fn config_template() -> String {
    format!(
        r#"# santree configuration

[grammar]
# Accept check/mate suffixes on castling (O-O+, O-O-O#)
castling_suffix = false

[parser]
# Require turn numbers 1, 2, 3, ... without gaps or repeats
strict_numbering = false

[tree]
# Label of the synthetic root node of the turn tree
root_label = "{}"
"#,
        DEFAULT_ROOT_LABEL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.grammar.castling_suffix);
        assert!(!settings.parser.strict_numbering);
        assert_eq!(settings.tree.root_label, "Game");
        assert_eq!(settings.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_merge_keeps_unspecified_values() {
        let base = Settings {
            parser: ParserSettings {
                strict_numbering: true,
            },
            ..Settings::default()
        };
        let overlay: RawSettings = toml::from_str("[tree]\nroot_label = \"Partida\"\n").unwrap();

        let merged = base.merge_with(&overlay);
        assert!(merged.parser.strict_numbering);
        assert_eq!(merged.tree.root_label, "Partida");
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let raw: RawSettings = toml::from_str(&config_template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn test_to_toml_round_trips_through_raw() {
        let settings = Settings {
            grammar: GrammarSettings {
                castling_suffix: true,
            },
            ..Settings::default()
        };
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
