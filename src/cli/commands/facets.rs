//! Facet commands - facet values, classes, groups and regional counts

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the facets command
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Facet name: region, cooking-method or spice-level
    pub facet: String,
}

/// Facet values response
#[derive(Debug, Serialize)]
pub struct FacetValuesOutput {
    pub facet: String,
    pub values: Vec<String>,
}

/// Execute the facets command
pub fn execute_facets(
    args: FacetsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let values = services.search.list_distinct_facet_values(&args.facet)?;
    let output = FacetValuesOutput {
        facet: args.facet,
        values,
    };

    match format {
        OutputFormat::Human => output::print_values(&output.facet, &output.values),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Execute the classes command
pub fn execute_classes(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let classes = services.search.list_food_classes()?;

    match format {
        OutputFormat::Human => {
            output::print_header(&format!("Food classes ({})", classes.len()));
            for class in &classes {
                println!("  {:<24}{}", class.label, colors::identifier(&class.id));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&classes)?);
        }
    }

    Ok(())
}

/// Execute the groups command
pub fn execute_groups(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let groups = services.search.list_food_groups()?;

    match format {
        OutputFormat::Human => output::print_values("Food groups", &groups),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
    }

    Ok(())
}

/// Execute the regional-stats command
pub fn execute_regional_stats(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.search.regional_stats()?;

    match format {
        OutputFormat::Human => {
            output::print_header(&format!("Regions ({})", stats.total_regions));
            for (region, count) in &stats.foods_by_region {
                println!(
                    "  {:<28}{}",
                    region.replace('_', " "),
                    colors::number(&count.to_string())
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
