use std::path::Path;

use anyhow::Result;

/// Print registered template names, one per line.
pub fn run(config_path: &Path) -> Result<()> {
    let project = super::open_project(config_path)?;
    for name in project.registry.names() {
        println!("{name}");
    }
    Ok(())
}
