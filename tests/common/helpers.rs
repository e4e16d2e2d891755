// Test helper functions

use nutrigraph::core::config::Config;
use nutrigraph::core::graph::GraphStore;
use nutrigraph::core::services::Services;
use nutrigraph::core::text::TextIndex;
use nutrigraph::core::types::SearchCriteria;
use std::sync::Arc;

/// Default configuration with a small enrichment pool
#[allow(dead_code)] // Used in integration tests
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.enrichment.workers = 2;
    config
}

/// Create services over in-memory collaborators, wrapped in Arc to match
/// the CLI execute() signatures
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(
    graph: Arc<dyn GraphStore>,
    text: Arc<dyn TextIndex>,
) -> Arc<Services> {
    let services = Services::with_collaborators(test_config(), graph, text)
        .expect("Failed to create test services");
    Arc::new(services)
}

/// Criteria with free text and default paging
#[allow(dead_code)] // Used in integration tests
pub fn text_criteria(query: &str) -> SearchCriteria {
    SearchCriteria {
        query: Some(query.to_string()),
        ..Default::default()
    }
}
