//! Index commands - rebuild the text index and inspect it

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::IndexStats;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Reindex response
#[derive(Debug, Serialize)]
pub struct ReindexOutput {
    pub index_dir: String,
    pub duration_ms: u64,
    pub stats: IndexStats,
}

/// Execute the reindex command
pub fn execute_reindex(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let stats = services.search.reindex()?;
    let elapsed = start.elapsed();

    let output = ReindexOutput {
        index_dir: services
            .config
            .text_index
            .index_dir
            .to_string_lossy()
            .into_owned(),
        duration_ms: elapsed.as_millis() as u64,
        stats,
    };

    match format {
        OutputFormat::Human => {
            output::print_success(&format!(
                "Indexed {} foods in {}",
                output.stats.documents,
                output::format_duration(elapsed.as_secs_f64())
            ));
            println!("  {}", colors::dim(&output.index_dir));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Execute the index-stats command
pub fn execute_stats(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.search.index_stats()?;

    match format {
        OutputFormat::Human => {
            output::print_header("Text index");
            println!(
                "  Documents:  {}",
                colors::number(&stats.documents.to_string())
            );
            println!(
                "  Deleted:    {}",
                colors::number(&stats.deleted_documents.to_string())
            );
            println!(
                "  Segments:   {}",
                colors::number(&stats.segments.to_string())
            );
            let rebuilt = stats
                .last_rebuilt_at
                .as_ref()
                .map(output::format_relative_time)
                .unwrap_or_else(|| "not in this process".to_string());
            println!("  Rebuilt:    {}", colors::dim(&rebuilt));

            if stats.documents == 0 {
                output::print_warning("Index is empty. Run 'nutrigraph reindex' first.");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
