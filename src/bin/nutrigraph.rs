//! NutriGraph CLI - command-line interface for the food catalogue search
//!
//! # Examples
//!
//! ```bash
//! # Rebuild the text index from the graph store
//! nutrigraph reindex
//!
//! # Hybrid search with a protein floor
//! nutrigraph search "tomato stew" --min-protein 5
//!
//! # Structured search only
//! nutrigraph search --class Stew --sort name
//!
//! # Full record of one food
//! nutrigraph detail http://example.org/food-ontology#Ful_Medames
//! ```

use clap::Parser;
use nutrigraph::cli::{output, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(json: bool) {
    // Logs go to stderr so stdout stays clean for --format json
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrigraph=info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
        }))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
