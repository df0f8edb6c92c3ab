use std::path::Path;

use anyhow::Result;

use crate::output;

/// Compile every template in the project. Fails on the first compile error.
pub fn run(config_path: &Path) -> Result<()> {
    output::print_header("heirloom check");
    let project = super::open_project(config_path)?;

    output::print_key_value(
        "templates dir",
        &project.config.templates_path(config_path).display().to_string(),
    );
    output::print_key_value("strict mode", &project.config.registry.strict_mode.to_string());
    output::print_success(&format!("{} templates compiled", project.names.len()));
    Ok(())
}
