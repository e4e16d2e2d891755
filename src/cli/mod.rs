//! CLI adapter for NutriGraph
//!
//! Provides a command-line interface to the catalogue search. The adapter
//! only depends on `core/`; every command goes through [`Services`].
//!
//! [`Services`]: crate::core::services::Services

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// NutriGraph - Food catalogue search
///
/// Searches a food knowledge graph by free text and structured filters.
/// Free text is ranked by a local full-text index; every result is
/// completed from the graph store.
#[derive(Parser, Debug)]
#[command(name = "nutrigraph")]
#[command(version)]
#[command(about = "Hybrid knowledge-graph and full-text food search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalogue by text and filters
    Search(commands::SearchArgs),

    /// Show full detail for one food
    Detail(commands::DetailArgs),

    /// List the distinct values of a facet (region, cooking-method, spice-level)
    Facets(commands::FacetsArgs),

    /// List food classes usable as --class filters
    Classes,

    /// List food groups
    Groups,

    /// Suggest food names for a prefix
    Autocomplete(commands::AutocompleteArgs),

    /// List foods with an exact facet value
    #[command(name = "by-attribute")]
    ByAttribute(commands::AttributeArgs),

    /// Count foods per region
    #[command(name = "regional-stats")]
    RegionalStats,

    /// Rebuild the text index from the graph store
    Reindex,

    /// Show text index statistics
    #[command(name = "index-stats")]
    IndexStats,

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  nutrigraph completions bash > ~/.local/share/bash-completion/completions/nutrigraph
    ///   zsh:   nutrigraph completions zsh > ~/.zfunc/_nutrigraph
    ///   fish:  nutrigraph completions fish > ~/.config/fish/completions/nutrigraph.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    dispatch(cli.command, &services, cli.format)
}

/// Execute one command against ready services
pub fn dispatch(
    command: Commands,
    services: &std::sync::Arc<crate::core::services::Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Search(args) => commands::search::execute(args, services, format),
        Commands::Detail(args) => commands::detail::execute(args, services, format),
        Commands::Facets(args) => commands::facets::execute_facets(args, services, format),
        Commands::Classes => commands::facets::execute_classes(services, format),
        Commands::Groups => commands::facets::execute_groups(services, format),
        Commands::Autocomplete(args) => {
            commands::search::execute_autocomplete(args, services, format)
        }
        Commands::ByAttribute(args) => commands::attribute::execute(args, services, format),
        Commands::RegionalStats => commands::facets::execute_regional_stats(services, format),
        Commands::Reindex => commands::index::execute_reindex(services, format),
        Commands::IndexStats => commands::index::execute_stats(services, format),
        Commands::ShowConfig(args) => commands::config::execute(args, services, format),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
