//! Unified error types for heirloom.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while registering or rendering templates.
#[derive(Error, Debug)]
pub enum HeirloomError {
    // --- Configuration ---

    /// The configuration file (`heirloom.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Templates ---

    /// The template source was rejected by Handlebars. The registry is left unchanged.
    #[error("failed to compile template '{name}'")]
    Compile {
        name: String,
        #[source]
        source: handlebars::TemplateError,
    },

    /// A template in the chain is not registered.
    ///
    /// Always carries the name that was originally requested, even when the
    /// missing entry is an ancestor further up the chain.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Handlebars failed while executing a template (or serializing its data).
    #[error("failed to execute template '{template}'")]
    Execution {
        template: String,
        #[source]
        source: handlebars::RenderError,
    },

    /// The chain visited more templates than `max_chain_depth` allows.
    #[error("inheritance chain for '{name}' exceeded {limit} templates")]
    ChainTooDeep { name: String, limit: usize },

    // --- Project ---

    /// The templates directory configured for a project does not exist.
    #[error("templates directory not found: {0}")]
    TemplateDirNotFound(PathBuf),

    /// Attempted to scaffold a project where a config file already exists.
    #[error("project already exists: {0}")]
    ProjectExists(PathBuf),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, HeirloomError>`.
pub type Result<T> = std::result::Result<T, HeirloomError>;
