use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::output;

/// Render `name` (and every layout it inherits from) with optional JSON data.
///
/// The result is written to `out_path` when given, otherwise to stdout.
pub fn run(
    config_path: &Path,
    name: &str,
    data: Option<&Path>,
    out_path: Option<&Path>,
) -> Result<()> {
    let project = super::open_project(config_path)?;
    let data = match data {
        Some(path) => load_data(path)?,
        None => Value::Null,
    };

    let rendered = project
        .registry
        .render(name, &data)
        .with_context(|| format!("rendering '{name}'"))?;

    match out_path {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            output::print_success(&format!(
                "Rendered '{name}' to {} ({} bytes)",
                path.display(),
                rendered.len()
            ));
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn load_data(path: &Path) -> Result<Value> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}
