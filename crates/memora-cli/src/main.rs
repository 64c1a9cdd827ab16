//! Memora CLI
//!
//! Command-line interface for Memora - reading academic papers by mode.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memora_core::{Config, ReadingMode};

mod commands;
mod output;
mod surface;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "memora")]
#[command(about = "Memora - Smart Paper Reader")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/memora/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the reading modes
    Modes,
    /// Open a paper in a reading mode
    Read {
        /// PDF to open (omit to use the mode's reference document)
        file: Option<PathBuf>,
        /// Reading mode (exploratory, understanding, revisiting)
        #[arg(short, long)]
        mode: Option<ReadingMode>,
        /// Activate the annotation at this index after rendering
        #[arg(short, long)]
        activate: Vec<usize>,
    },
    /// Show the annotations a reading mode applies
    Annotations {
        /// Reading mode (exploratory, understanding, revisiting)
        mode: ReadingMode,
    },
    /// Ask the reading assistant
    Chat {
        /// Message to send
        #[arg(required_unless_present = "explain")]
        message: Option<String>,
        /// Ask for an explanation of the selected lines
        #[arg(long, conflicts_with = "message")]
        explain: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (default_mode, assets_dir, fallback.<mode>, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands manage the file themselves
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Modes => commands::modes::list(&config, &output),
        Commands::Read {
            file,
            mode,
            activate,
        } => commands::read::read(&config, file, mode, activate, &output).map(|_| ()),
        Commands::Annotations { mode } => commands::annotations::show(&config, mode, &output),
        Commands::Chat { message, explain } => {
            commands::chat::ask(&config, message, explain, &output).await
        }
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize file-based logging
///
/// Logging is best-effort: failures are reported and the command continues.
fn init_logging(config: &Config, verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, e);
            return;
        }
    }

    let log_file = match File::options().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("memora_core={},memora_cli={}", log_level, log_level))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
