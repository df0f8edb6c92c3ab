//! CLI command implementations for heirloom.
//!
//! Each module corresponds to a subcommand (`heirloom <command>`).

pub mod check;
pub mod init;
pub mod list;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};

use heirloom_core::loader;
use heirloom_core::{HeirloomConfig, Registry};

/// A project's configuration with its templates registered.
pub struct Project {
    pub config: HeirloomConfig,
    pub registry: Registry,
    pub names: Vec<String>,
}

/// Load the config at `config_path` and register every template it points at.
pub fn open_project(config_path: &Path) -> Result<Project> {
    let config = HeirloomConfig::load(config_path)?;
    let templates_dir = config.templates_path(config_path);
    tracing::debug!("loading templates from {}", templates_dir.display());

    let registry = Registry::with_options(config.registry.clone());
    let names = loader::load_dir(&registry, &templates_dir, &config.extension)
        .with_context(|| format!("loading templates from {}", templates_dir.display()))?;

    Ok(Project {
        config,
        registry,
        names,
    })
}
