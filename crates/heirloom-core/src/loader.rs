//! Register every template file under a directory.
//!
//! Template names are the file paths relative to the root, without the extension and
//! with `/` separators on every platform:
//!
//! ```text
//! templates/
//! ├── base.hbs              -> "base"
//! └── pages/
//!     └── index.hbs         -> "pages/index"
//! ```

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{HeirloomError, Result};
use crate::registry::Registry;

/// Parse every `*.{extension}` file under `dir` into `registry`.
///
/// Files are visited in sorted order. Returns the registered names. Stops at the first
/// file that fails to read or compile.
pub fn load_dir(registry: &Registry, dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(HeirloomError::TemplateDirNotFound(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            tracing::trace!("skipping {}", path.display());
            continue;
        }

        let Some(name) = template_name(dir, path) else {
            tracing::warn!("skipping template with non UTF-8 path: {}", path.display());
            continue;
        };
        let source = std::fs::read_to_string(path)?;
        registry.parse(&name, &source)?;
        names.push(name);
    }

    tracing::info!("loaded {} templates from {}", names.len(), dir.display());
    Ok(names)
}

/// Register a single file under an explicit name.
pub fn load_file(registry: &Registry, name: &str, path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)?;
    registry.parse(name, &source)
}

fn template_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
