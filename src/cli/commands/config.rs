//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Also show where the configuration file is looked up
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(flatten)]
    pub config: Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = args
        .all
        .then(|| XdgDirs::new().config_file().to_string_lossy().into_owned());

    let response = ConfigResponse {
        config_file,
        config: services.config.as_ref().clone(),
    };
    let config = &response.config;

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            if let Some(path) = &response.config_file {
                println!("  config_file: {path}");
            }
            println!("  graph:");
            println!("    endpoint: {}", config.graph.endpoint);
            println!("    namespace: {}", config.graph.namespace);
            println!("    request_timeout_ms: {}", config.graph.request_timeout_ms);
            println!("  text_index:");
            println!("    index_dir: {}", config.text_index.index_dir.display());
            println!("  search:");
            println!("    default_page_size: {}", config.search.default_page_size);
            println!("    max_page_size: {}", config.search.max_page_size);
            println!("    text_over_fetch: {}", config.search.text_over_fetch);
            println!("    autocomplete_limit: {}", config.search.autocomplete_limit);
            println!("    max_query_length: {}", config.search.max_query_length);
            println!("  enrichment:");
            println!("    workers: {}", config.enrichment.workers);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
