//! Folio CLI
//!
//! Command-line dashboard for Folio: log in, edit site content and settings,
//! and render the theme files.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio_core::{Config, FileStore, StorageError};

mod appearance;
mod commands;
mod output;
mod prompt;
mod theme_writer;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - Local-first portfolio site editor")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the dashboard
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// End the dashboard session
    Logout,
    /// Show session and storage status
    Status,
    /// Show or change site settings
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show or render the derived theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show or edit site content
    Content {
        #[command(subcommand)]
        command: Option<ContentCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show all settings, or one of them
    Show { key: Option<String> },
    /// Change settings (KEY=VALUE...)
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Restore the default settings
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Apply a template
    Template { name: String },
    /// List templates
    Templates,
    /// Apply a color scheme
    Scheme { name: String },
    /// List color schemes
    Schemes,
    /// Write portfolio-settings.json
    Export {
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Load settings from a JSON file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Show the derived style directives
    Show,
    /// Write theme.css and head.html
    Render {
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Re-render on appearance or settings changes
    Watch {
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Polling interval in seconds
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
}

#[derive(Subcommand)]
enum ContentCommands {
    /// Show all content, a section, or one item
    Show {
        section: Option<String>,
        #[arg(long)]
        id: Option<u64>,
    },
    /// Save fields (KEY=VALUE...) into a section or item
    Set {
        section: String,
        #[arg(long)]
        id: Option<u64>,
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Add an item to a list section
    #[command(alias = "create")]
    Add {
        section: String,
        assignments: Vec<String>,
    },
    /// Delete an item from a list section
    #[command(alias = "rm")]
    Delete {
        section: String,
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Edit a section or item interactively
    Edit {
        section: String,
        #[arg(long)]
        id: Option<u64>,
    },
    /// Write portfolio-data.json
    Export {
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Load content from a JSON file
    Import { file: PathBuf },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, output_dir, log_file, admin_username, admin_password, appearance)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    if let Err(e) = run(cli, &output).await {
        output.failure(&format!("{:#}", e), recovery_hint(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands work even when the data directory is unusable
    if let Commands::Config { command } = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let storage = FileStore::open(&config.data_dir)
        .with_context(|| format!("Failed to open data directory {:?}", config.data_dir))?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(storage, &config, username, password, output)
        }
        Commands::Logout => commands::auth::logout(storage, &config, output),
        Commands::Status => commands::auth::status(storage, &config, output),
        Commands::Settings { command } => {
            handle_settings_command(command, storage, &config, output)
        }
        Commands::Theme { command } => handle_theme_command(command, storage, &config, output).await,
        Commands::Content { command } => handle_content_command(command, storage, &config, output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_settings_command(
    command: Option<SettingsCommands>,
    storage: FileStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    use commands::settings;

    match command {
        Some(SettingsCommands::Show { key }) => settings::show(storage, config, key, output),
        None => settings::show(storage, config, None, output),
        Some(SettingsCommands::Set { assignments }) => {
            settings::set(storage, config, assignments, output)
        }
        Some(SettingsCommands::Reset { yes }) => settings::reset(storage, config, yes, output),
        Some(SettingsCommands::Template { name }) => {
            settings::template(storage, config, name, output)
        }
        Some(SettingsCommands::Templates) => settings::templates(storage, config, output),
        Some(SettingsCommands::Scheme { name }) => settings::scheme(storage, config, name, output),
        Some(SettingsCommands::Schemes) => settings::schemes(storage, config, output),
        Some(SettingsCommands::Export { output: dir }) => {
            settings::export(storage, config, dir, output)
        }
        Some(SettingsCommands::Import { file }) => settings::import(storage, config, file, output),
    }
}

async fn handle_theme_command(
    command: Option<ThemeCommands>,
    storage: FileStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    use commands::theme;

    match command {
        Some(ThemeCommands::Show) | None => theme::show(storage, config, output),
        Some(ThemeCommands::Render { output: dir }) => theme::render(storage, config, dir, output),
        Some(ThemeCommands::Watch {
            output: dir,
            interval,
        }) => theme::watch(storage, config, dir, interval, output).await,
    }
}

fn handle_content_command(
    command: Option<ContentCommands>,
    storage: FileStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    use commands::content;

    match command {
        Some(ContentCommands::Show { section, id }) => content::show(storage, section, id, output),
        None => content::show(storage, None, None, output),
        Some(ContentCommands::Set {
            section,
            id,
            assignments,
        }) => content::set(storage, config, section, id, assignments, output),
        Some(ContentCommands::Add {
            section,
            assignments,
        }) => content::add(storage, config, section, assignments, output),
        Some(ContentCommands::Delete { section, id, yes }) => {
            content::delete(storage, config, section, id, yes, output)
        }
        Some(ContentCommands::Edit { section, id }) => {
            content::edit(storage, config, section, id, output)
        }
        Some(ContentCommands::Export { output: dir }) => {
            content::export(storage, config, dir, output)
        }
        Some(ContentCommands::Import { file }) => content::import(storage, config, file, output),
    }
}

/// Suggestion for the first storage error behind `error`
fn recovery_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion)
}

/// Send logs to the configured log file, or warnings to stderr
fn init_logging(config: &Config) {
    let filter = |default: &str| {
        EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(default))
    };

    let Some(log_path) = &config.log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("folio_core=info,folio_cli=info"))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_recovery_hint_finds_wrapped_storage_error() {
        let storage_error = StorageError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/srv/folio/portfolioData.json"),
        );
        let error = anyhow::Error::new(storage_error).context("Failed to save content");

        let hint = recovery_hint(&error).unwrap();
        assert!(hint.contains("folio config set data_dir"));
    }

    #[test]
    fn test_recovery_hint_ignores_other_errors() {
        let error = anyhow::anyhow!("Not logged in. Run `folio login` first.");
        assert_eq!(recovery_hint(&error), None);

        let busy = StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "device busy"),
            PathBuf::from("/srv/folio"),
        );
        assert_eq!(recovery_hint(&anyhow::Error::new(busy)), None);
    }
}
