use std::path::Path;

use anyhow::Result;

use heirloom_core::config::CONFIG_FILE;
use heirloom_core::{scaffold, HeirloomConfig};

use crate::output;

/// Scaffold a starter project into `dir`.
///
/// Writes the config file, a `base` -> `page` -> `index` template chain, and sample data.
/// The config file takes the file name of `config` (the global `--config` flag), so
/// later commands run from `dir` with the same flag find it.
pub fn run(dir: &Path, config: &Path) -> Result<()> {
    output::print_header(&format!("heirloom init: {}", dir.display()));

    let config_file = config
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(CONFIG_FILE);

    output::print_step(1, 2, "Writing configuration and starter templates");
    scaffold::create_project(dir, config_file, &HeirloomConfig::default())?;

    output::print_step(2, 2, "Checking the starter chain");
    let project = super::open_project(&dir.join(config_file))?;
    output::print_key_value("config", config_file);
    output::print_key_value("templates", &project.names.join(", "));

    output::print_success(&format!("Project created in {}", dir.display()));
    eprintln!();
    eprintln!("  Next steps:");
    eprintln!("    cd {}", dir.display());
    if config_file == CONFIG_FILE {
        eprintln!("    heirloom render index --data data.json");
    } else {
        eprintln!("    heirloom --config {config_file} render index --data data.json");
    }
    eprintln!();

    Ok(())
}
