//! Starter project scaffolding for `heirloom init`.
//!
//! Templates are embedded at compile time via [`include_str!`]; paths are relative to
//! this file. The starter is a three-level chain (`index` -> `page` -> `base`) plus a
//! sample data file.
//!
//! ```text
//! <project>/
//! ├── heirloom.config.json
//! ├── data.json
//! └── templates/
//!     ├── base.hbs
//!     ├── page.hbs
//!     └── index.hbs
//! ```

use std::path::Path;

use crate::config::{HeirloomConfig, CONFIG_FILE};
use crate::error::{HeirloomError, Result};

pub const BASE_TEMPLATE: &str = include_str!("../templates/starter/base.hbs");
pub const PAGE_TEMPLATE: &str = include_str!("../templates/starter/page.hbs");
pub const INDEX_TEMPLATE: &str = include_str!("../templates/starter/index.hbs");
pub const SAMPLE_DATA: &str = include_str!("../templates/starter/data.json");

/// Write a starter project into `project_dir`, creating it if needed.
///
/// The config is written as `config_file` (usually [`CONFIG_FILE`]). Refuses to touch a
/// directory that already holds a file of that name.
pub fn create_project(project_dir: &Path, config_file: &str, config: &HeirloomConfig) -> Result<()> {
    let config_path = project_dir.join(config_file);
    if config_path.exists() {
        return Err(HeirloomError::ProjectExists(config_path));
    }

    let templates_dir = project_dir.join(&config.templates_dir);
    std::fs::create_dir_all(&templates_dir)?;

    let ext = &config.extension;
    for (name, source) in [
        ("base", BASE_TEMPLATE),
        ("page", PAGE_TEMPLATE),
        ("index", INDEX_TEMPLATE),
    ] {
        std::fs::write(templates_dir.join(format!("{name}.{ext}")), source)?;
    }
    std::fs::write(project_dir.join("data.json"), SAMPLE_DATA)?;
    config.save(&config_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_dir;
    use crate::registry::Registry;

    #[test]
    fn test_create_project_layout() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("site");
        create_project(&project, CONFIG_FILE, &HeirloomConfig::default()).unwrap();

        assert!(project.join(CONFIG_FILE).is_file());
        assert!(project.join("data.json").is_file());
        assert!(project.join("templates/base.hbs").is_file());
        assert!(project.join("templates/page.hbs").is_file());
        assert!(project.join("templates/index.hbs").is_file());
    }

    #[test]
    fn test_create_project_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), CONFIG_FILE, &HeirloomConfig::default()).unwrap();
        assert!(matches!(
            create_project(dir.path(), CONFIG_FILE, &HeirloomConfig::default()),
            Err(HeirloomError::ProjectExists(_))
        ));
    }

    #[test]
    fn test_create_project_custom_config_name() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "site.json", &HeirloomConfig::default()).unwrap();

        assert!(dir.path().join("site.json").is_file());
        assert!(!dir.path().join(CONFIG_FILE).exists());
        assert_eq!(
            HeirloomConfig::load(&dir.path().join("site.json")).unwrap(),
            HeirloomConfig::default()
        );

        // A different name in the same directory is a separate project file.
        create_project(dir.path(), CONFIG_FILE, &HeirloomConfig::default()).unwrap();
        assert!(matches!(
            create_project(dir.path(), "site.json", &HeirloomConfig::default()),
            Err(HeirloomError::ProjectExists(path)) if path.ends_with("site.json")
        ));
    }

    #[test]
    fn test_starter_chain_renders() {
        let dir = tempfile::tempdir().unwrap();
        let config = HeirloomConfig::default();
        create_project(dir.path(), CONFIG_FILE, &config).unwrap();

        let registry = Registry::with_options(config.registry.clone());
        load_dir(&registry, &config.templates_path(&dir.path().join(CONFIG_FILE)), "hbs").unwrap();

        let data: serde_json::Value = serde_json::from_str(SAMPLE_DATA).unwrap();
        let html = registry.render("index", &data).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>heirloom</title>"));
        assert!(html.contains("<h1>heirloom</h1>"));
        assert!(html.contains("Hello, world!"));
        assert!(html.find("<main>").unwrap() < html.find("Hello, world!").unwrap());
    }
}
