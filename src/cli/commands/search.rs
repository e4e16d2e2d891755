//! Search commands - catalogue search and name completion

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{SearchCriteria, SortDirection, SortField};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free text (omit for a graph-only search)
    pub query: Option<String>,

    /// Class filter, e.g. Stew or Flatbread (see `nutrigraph classes`)
    #[arg(long = "class")]
    pub class_id: Option<String>,

    /// Food group filter (honoured together with text only)
    #[arg(long)]
    pub group: Option<String>,

    #[arg(long)]
    pub min_calories: Option<f64>,

    #[arg(long)]
    pub max_calories: Option<f64>,

    #[arg(long)]
    pub min_protein: Option<f64>,

    #[arg(long)]
    pub max_protein: Option<f64>,

    /// Zero-based page index
    #[arg(long, short = 'p', default_value = "0")]
    pub page: usize,

    /// Page size (defaults to search.default_page_size)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,

    /// Sort field: relevance, name, calories or protein
    #[arg(long, default_value = "relevance")]
    pub sort: SortField,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

impl SearchArgs {
    /// Build search criteria, filling the page size from configuration
    pub fn to_criteria(&self, default_page_size: usize) -> SearchCriteria {
        SearchCriteria {
            query: self.query.clone(),
            class_id: self.class_id.clone(),
            food_group: self.group.clone(),
            min_calories: self.min_calories,
            max_calories: self.max_calories,
            min_protein: self.min_protein,
            max_protein: self.max_protein,
            page: self.page,
            size: self.size.unwrap_or(default_page_size),
            sort: self.sort,
            direction: self.direction,
        }
    }
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let criteria = args.to_criteria(services.config.search.default_page_size);

    // Caller errors are reported; backend failures come back as an empty page
    let page = services.search.try_execute_search(&criteria)?;

    match format {
        OutputFormat::Human => {
            if let Some(text) = criteria.text() {
                println!("Results for '{}':\n", colors::label(text));
            }
            output::print_page(&page);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

/// Arguments for the autocomplete command
#[derive(Args, Debug)]
pub struct AutocompleteArgs {
    /// Beginning of a food name
    pub prefix: String,
}

/// Autocomplete response
#[derive(Debug, Serialize)]
pub struct AutocompleteOutput {
    pub prefix: String,
    pub suggestions: Vec<String>,
}

/// Execute the autocomplete command
pub fn execute_autocomplete(
    args: AutocompleteArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = AutocompleteOutput {
        suggestions: services.search.get_autocomplete(&args.prefix),
        prefix: args.prefix,
    };

    match format {
        OutputFormat::Human => {
            if output.suggestions.is_empty() {
                println!("No suggestions for '{}'", colors::label(&output.prefix));
            } else {
                for suggestion in &output.suggestions {
                    println!("{suggestion}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
