//! heirloom CLI: render Handlebars templates with layout inheritance.
//!
//! Provides four commands over a project described by `heirloom.config.json`:
//! `init`, `render`, `check`, and `list`.
//!
//! Every command loads the configured templates directory into a
//! [`heirloom_core::Registry`] and works against it.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "heirloom",
    about = "Layered template rendering: leaf content wrapped by inherited layouts",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to heirloom.config.json (default: ./heirloom.config.json)
    #[arg(long, global = true, env = "HEIRLOOM_CONFIG", default_value = "heirloom.config.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter project with a three-level layout chain
    ///
    /// The config file is named after `--config` (its file name only).
    Init {
        /// Project directory (created if missing)
        dir: PathBuf,
    },

    /// Render a template and its chain of layouts
    Render {
        /// Template name, e.g. `index` or `pages/about`
        name: String,

        /// JSON file with the data passed to every template in the chain
        #[arg(long, short)]
        data: Option<PathBuf>,

        /// Write the result to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Compile every template and report errors
    Check,

    /// List registered template names
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { dir } => {
            commands::init::run(&dir, &cli.config)?;
        }
        Commands::Render { name, data, output } => {
            commands::render::run(&cli.config, &name, data.as_deref(), output.as_deref())?;
        }
        Commands::Check => {
            commands::check::run(&cli.config)?;
        }
        Commands::List => {
            commands::list::run(&cli.config)?;
        }
    }

    Ok(())
}
