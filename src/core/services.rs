//! Unified service container for NutriGraph
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::graph::{GraphStore, QueryBuilder, SparqlHttpStore};
use crate::core::search::SearchOrchestrator;
use crate::core::text::{TantivyTextIndex, TextIndex};
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Search orchestrator for every catalogue read and the reindex
    pub search: Arc<SearchOrchestrator>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration: a SPARQL endpoint client and
    /// the on-disk text index
    pub fn new(config: Config) -> Result<Self> {
        let graph = Arc::new(SparqlHttpStore::new(
            config.graph.endpoint.clone(),
            config.graph.request_timeout(),
        )?);
        let text = Arc::new(TantivyTextIndex::open_or_create(
            &config.text_index.index_dir,
        )?);

        Self::with_collaborators(config, graph, text)
    }

    /// Create services over explicit collaborators
    pub fn with_collaborators(
        config: Config,
        graph: Arc<dyn GraphStore>,
        text: Arc<dyn TextIndex>,
    ) -> Result<Self> {
        let queries = QueryBuilder::new(&config.graph.namespace)?;
        let search = Arc::new(SearchOrchestrator::new(
            graph,
            text,
            queries,
            config.search.clone(),
            config.enrichment.workers,
        )?);

        Ok(Self {
            search,
            config: Arc::new(config),
        })
    }
}
