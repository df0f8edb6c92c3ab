//! Registry options and the on-disk project configuration.
//!
//! [`RegistryOptions`] are fixed when a [`crate::Registry`] is created and frozen into
//! every template it compiles. [`HeirloomConfig`] is the `heirloom.config.json` file the
//! CLI reads: a templates directory plus the same options, flattened.
//!
//! ```json
//! {
//!   "templates_dir": "templates",
//!   "extension": "hbs",
//!   "strict_mode": false,
//!   "escape": "html",
//!   "max_chain_depth": null
//! }
//! ```

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use crate::error::{HeirloomError, Result};

/// Default name of the project configuration file.
pub const CONFIG_FILE: &str = "heirloom.config.json";

/// How expression output is escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Handlebars' default HTML escaping.
    #[default]
    Html,
    /// Write expression output verbatim (plain-text templates).
    None,
}

impl EscapeMode {
    pub(crate) fn apply(self, engine: &mut Handlebars<'static>) {
        if self == EscapeMode::None {
            engine.register_escape_fn(handlebars::no_escape);
        }
    }
}

/// Options frozen into every template a registry compiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Fail on `{{variable}}` references missing from the data.
    pub strict_mode: bool,
    pub escape: EscapeMode,
    /// Abort a render whose chain visits more templates than this. `None` (the default)
    /// lets a chain run until a template stops calling `inherits`.
    pub max_chain_depth: Option<usize>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            escape: EscapeMode::Html,
            max_chain_depth: None,
        }
    }
}

/// Project configuration stored in `heirloom.config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeirloomConfig {
    /// Directory holding template files, relative to the config file.
    pub templates_dir: PathBuf,
    /// File extension (without the dot) of template files.
    pub extension: String,
    #[serde(flatten)]
    pub registry: RegistryOptions,
}

impl Default for HeirloomConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            extension: "hbs".into(),
            registry: RegistryOptions::default(),
        }
    }
}

impl HeirloomConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| HeirloomError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| HeirloomError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| HeirloomError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the templates directory against the directory holding the config file.
    pub fn templates_path(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(base) if self.templates_dir.is_relative() => base.join(&self.templates_dir),
            _ => self.templates_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = HeirloomConfig {
            templates_dir: PathBuf::from("views"),
            extension: "html".into(),
            registry: RegistryOptions {
                strict_mode: true,
                escape: EscapeMode::None,
                max_chain_depth: Some(16),
            },
        };
        config.save(&path).unwrap();
        assert_eq!(HeirloomConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "strict_mode": true }"#).unwrap();

        let config = HeirloomConfig::load(&path).unwrap();
        assert!(config.registry.strict_mode);
        assert_eq!(config.registry.escape, EscapeMode::Html);
        assert_eq!(config.registry.max_chain_depth, None);
        assert_eq!(config.extension, "hbs");
    }

    #[test]
    fn test_load_missing_config() {
        let result = HeirloomConfig::load(Path::new("/tmp/nonexistent_heirloom/heirloom.config.json"));
        assert!(matches!(result, Err(HeirloomError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            HeirloomConfig::load(&path),
            Err(HeirloomError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_templates_path_relative_to_config() {
        let config = HeirloomConfig::default();
        let resolved = config.templates_path(Path::new("/srv/site/heirloom.config.json"));
        assert_eq!(resolved, PathBuf::from("/srv/site/templates"));
    }
}
