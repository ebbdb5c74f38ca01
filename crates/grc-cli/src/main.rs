//! GRC explorer diagnostics CLI.
//!
//! Offline tools for checking how the explorer will treat a resource,
//! converting weapon documents, and inspecting the configuration.
//!
//! # Examples
//!
//! ```bash
//! # Which handler serves a path
//! grc route grc:///npcserver/weapons/-System/Bomb?delete
//!
//! # Split an edited weapon document back into image and script
//! grc weapon split bomb.gs2
//!
//! # Show the effective configuration
//! grc config show
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Diagnostics for the GraalScript server explorer.
#[derive(Parser, Debug)]
#[command(name = "grc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Pretty,
    /// Compact JSON, one document per line
    Json,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a resource identifier against the route table.
    ///
    /// Accepts either a full `grc:///` identifier or a bare path.
    Route {
        /// Identifier or path to resolve
        resource: String,
    },

    /// List the route table in match order.
    Routes,

    /// Convert between weapon documents and (image, script) pairs.
    Weapon {
        /// Conversion to run
        #[command(subcommand)]
        action: WeaponAction,
    },

    /// Inspect or create the explorer configuration.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Weapon document conversions.
#[derive(Subcommand, Debug)]
pub enum WeaponAction {
    /// Split a weapon document into its image and script.
    Split {
        /// Document to read, `-` for stdin
        file: PathBuf,
    },

    /// Join an image and a script into a weapon document.
    Join {
        /// Image file name
        #[arg(long, default_value = "")]
        image: String,

        /// Script to read, `-` for stdin
        file: PathBuf,
    },
}

/// Configuration actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show {
        /// Configuration file (default: platform config directory)
        #[arg(long, env = "GRC_EXPLORER_CONFIG")]
        path: Option<PathBuf>,
    },

    /// Print the default configuration file location.
    Path,

    /// Write a configuration file with default values.
    Init {
        /// Configuration file (default: platform config directory)
        #[arg(long, env = "GRC_EXPLORER_CONFIG")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = execute_command(cli.command, cli.format)?;
    println!("{output}");
    Ok(())
}

/// Initializes logging to stderr; `RUST_LOG` applies unless `verbose` is set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs a command and returns what to print.
///
/// # Errors
///
/// Returns an error if the command fails.
fn execute_command(command: Commands, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Route { resource } => commands::route::resolve(&resource, format),
        Commands::Routes => commands::route::list(format),
        Commands::Weapon { action } => match action {
            WeaponAction::Split { file } => commands::weapon::split(&file, format),
            WeaponAction::Join { image, file } => commands::weapon::join(&image, &file),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { path } => commands::config::show(path.as_deref()),
            ConfigAction::Path => commands::config::default_path(),
            ConfigAction::Init { path, force } => commands::config::init(path.as_deref(), force),
        },
    }
}
