//! By-attribute command - foods with an exact facet value

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::graph::Facet;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the by-attribute command
#[derive(Args, Debug)]
pub struct AttributeArgs {
    /// Facet name: region, cooking-method or spice-level
    pub facet: String,

    /// Exact value, e.g. East_Africa or Grilled
    pub value: String,

    /// Zero-based page index
    #[arg(long, short = 'p', default_value = "0")]
    pub page: usize,

    /// Page size (defaults to search.default_page_size)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,
}

/// Execute the by-attribute command
pub fn execute(
    args: AttributeArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let facet = Facet::from_name(&args.facet)?;
    let size = args
        .size
        .unwrap_or(services.config.search.default_page_size);

    let page = services
        .search
        .search_by_attribute(facet, &args.value, args.page, size);

    match format {
        OutputFormat::Human => {
            println!(
                "Foods with {} = '{}':\n",
                colors::label(facet.label()),
                args.value
            );
            output::print_page(&page);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}
