use anyhow::Result;
use clap::Parser;
use encore_client::{config, Config, ProviderKind};
use encore_core::Domain;
use std::path::PathBuf;

mod commands;
mod logging;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "encore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Recommendation provider: stub or http (overrides config)
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Base URL of the recommendation service (overrides config)
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Path to the config file (default: ~/.config/encore/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Open the interactive recommendation wizard (the default)
    ///
    /// Pick a section on the landing page, enter up to five favorite titles,
    /// optionally describe what you are in the mood for, and get a list of
    /// recommendations. Progress in a wizard is kept or discarded when you
    /// leave it according to the `leave_policy` setting.
    Tui,
    /// Run the wizard non-interactively and print the recommendations
    ///
    /// Favorites are added in order; blank titles are rejected and at most
    /// five are accepted. Preference values that a section does not offer
    /// are passed through unchanged.
    Recommend {
        /// Section to get recommendations for: movie, anime or book
        #[arg(long, short)]
        domain: Domain,

        /// A favorite title (repeat up to five times)
        #[arg(long = "favorite", short = 'f', required = true)]
        favorites: Vec<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        era: Option<String>,

        /// Mood (for anime: preferred series length)
        #[arg(long)]
        mood: Option<String>,

        /// Your name (used for the greeting only)
        #[arg(long)]
        name: Option<String>,

        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the recommendation service for titles
    Search {
        #[arg(long, short)]
        domain: Domain,

        /// Search TV shows instead of films (movie section only)
        #[arg(long)]
        tv: bool,

        query: String,
    },
    /// List the sections and their preference options
    Domains,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
    /// Print a single config value
    Get { key: String },
    /// Set a config value in the config file
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::config_file_path);
    let settings =
        Config::load_from(&config_path)?.with_overrides(cli.provider, cli.service_url);

    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);
    logging::init(&settings, interactive)?;

    match command {
        Commands::Tui => {
            tokio::task::block_in_place(|| tui::run_tui(&settings))?;
        }
        Commands::Recommend {
            domain,
            favorites,
            genre,
            era,
            mood,
            name,
            json,
        } => {
            let prefs = commands::recommend::Prefs {
                name,
                genre,
                era,
                mood,
            };
            commands::recommend::run(&settings, domain, &favorites, prefs, json).await?;
        }
        Commands::Search { domain, tv, query } => {
            commands::search::run(&settings, domain, tv, &query).await?;
        }
        Commands::Domains => commands::domains::show(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config_path, &settings),
            ConfigAction::Path => commands::config::show_path(&config_path),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config(&config_path)?,
            ConfigAction::Get { key } => commands::config::get_config(&settings, &key)?,
            ConfigAction::Set { key, value } => {
                commands::config::set_config(&config_path, &key, &value)?;
            }
        },
    }

    Ok(())
}
