//! Hybrid search orchestration.
//!
//! Ties the classifier, both collaborators, the enrichment pipeline and the
//! paginator together. Requests are independent: no state is kept between
//! calls.

use super::classifier::{classify, validate_criteria, SearchPlan};
use super::fusion::{retain_protein, sort_entities, Enricher};
use super::pagination::paginate;
use crate::core::config::SearchConfig;
use crate::core::error::{NutriGraphError, Result};
use crate::core::graph::{
    entity_from_row, literal_column, AttributeParams, Facet, FacetParams, GraphStore,
    QueryBuilder,
};
use crate::core::text::{TextHit, TextIndex};
use crate::core::types::{
    Entity, FoodClass, IndexStats, RegionalStats, SearchCriteria, SearchResultPage,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

/// Entry point for every read operation on the catalogue
pub struct SearchOrchestrator {
    graph: Arc<dyn GraphStore>,
    text: Arc<dyn TextIndex>,
    queries: QueryBuilder,
    enricher: Enricher,
    settings: SearchConfig,
}

impl SearchOrchestrator {
    /// Create an orchestrator over the given collaborators
    pub fn new(
        graph: Arc<dyn GraphStore>,
        text: Arc<dyn TextIndex>,
        queries: QueryBuilder,
        settings: SearchConfig,
        workers: usize,
    ) -> Result<Self> {
        let enricher = Enricher::new(Arc::clone(&graph), queries.clone(), workers)?;
        tracing::debug!("Enrichment pool running {} worker(s)", enricher.workers());
        Ok(Self {
            graph,
            text,
            queries,
            enricher,
            settings,
        })
    }

    /// Run a search, degrading any failure to an empty page
    pub fn execute_search(&self, criteria: &SearchCriteria) -> SearchResultPage {
        match self.try_execute_search(criteria) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Search rejected: {}", e);
                SearchResultPage::empty(criteria.size)
            }
        }
    }

    /// Run a search.
    ///
    /// Caller errors ([`NutriGraphError::InvalidIdentifierParameter`],
    /// [`NutriGraphError::InvalidCriteria`]) are returned before any
    /// collaborator is called. Collaborator failures during retrieval
    /// yield an empty page.
    pub fn try_execute_search(&self, criteria: &SearchCriteria) -> Result<SearchResultPage> {
        let start = Instant::now();

        validate_criteria(
            criteria,
            self.settings.max_page_size,
            self.settings.max_query_length,
        )?;
        let plan = classify(criteria, self.settings.text_over_fetch)?;

        let rows = match self.retrieve(&plan) {
            Ok(rows) => rows,
            Err(e) if e.is_collaborator_failure() => {
                tracing::warn!("{} retrieval failed, returning empty page: {}", plan.label(), e);
                return Ok(SearchResultPage::empty(criteria.size));
            }
            Err(e) => return Err(e),
        };

        let mut entities = self.enricher.enrich(rows);
        sort_entities(&mut entities, criteria.sort, criteria.direction);
        let page = paginate(entities, criteria.page, criteria.size);

        tracing::debug!(
            "{} search: {} total, page {} of {} in {}ms",
            plan.label(),
            page.total_elements(),
            page.current_page(),
            page.total_pages(),
            start.elapsed().as_millis()
        );

        Ok(page)
    }

    /// Partial rows for a plan, before enrichment
    fn retrieve(&self, plan: &SearchPlan) -> Result<Vec<Entity>> {
        match plan {
            SearchPlan::AllEntities => self.fetch_entities(&self.queries.all_entities()),
            SearchPlan::ByClass(params) => self.fetch_entities(&self.queries.by_class(params)),
            SearchPlan::ByNutritionalRange(params) => {
                self.fetch_entities(&self.queries.by_nutritional_range(params)?)
            }
            SearchPlan::Hybrid { query, protein } => {
                let hits = self.text.search_advanced(query)?;
                let entities = dedupe_by_uri(hits.into_iter().map(TextHit::into_entity));
                Ok(retain_protein(entities, protein))
            }
        }
    }

    /// Run a listing query and map its rows, first occurrence per entity
    fn fetch_entities(&self, sparql: &str) -> Result<Vec<Entity>> {
        let rows = self.graph.query(sparql)?;
        let row_count = rows.len();
        let entities = dedupe_by_uri(rows.iter().filter_map(entity_from_row));

        if entities.len() < row_count {
            tracing::debug!("Mapped {} entities from {} rows", entities.len(), row_count);
        }
        Ok(entities)
    }

    /// Full detail of one entity, `None` when the store does not know it
    pub fn get_detail(&self, uri: &str) -> Result<Option<Entity>> {
        match self.enricher.detail(uri) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Distinct values of a categorical attribute, ascending
    pub fn list_distinct_facet_values(&self, facet_name: &str) -> Result<Vec<String>> {
        let facet = Facet::from_name(facet_name)?;
        self.facet_values(facet)
    }

    fn facet_values(&self, facet: Facet) -> Result<Vec<String>> {
        let params = FacetParams::for_facet(facet)?;
        let rows = self.graph.query(&self.queries.distinct_facet_values(&params))?;
        Ok(literal_column(&rows, "value"))
    }

    /// Entity names completing `prefix`; empty on blank input or failure
    pub fn get_autocomplete(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }

        match self.text.autocomplete(prefix, self.settings.autocomplete_limit) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Autocomplete for '{}' failed: {}", prefix, e);
                Vec::new()
            }
        }
    }

    /// Entities whose attribute equals `value`, enriched and paginated
    pub fn search_by_attribute(
        &self,
        facet: Facet,
        value: &str,
        page: usize,
        size: usize,
    ) -> SearchResultPage {
        if size == 0 || size > self.settings.max_page_size {
            tracing::warn!("Rejected {} search with page size {}", facet, size);
            return SearchResultPage::empty(size);
        }

        let params = AttributeParams {
            attribute: facet,
            value: value.trim().to_string(),
        };

        let rows = self
            .queries
            .by_attribute_value(&params)
            .and_then(|sparql| self.fetch_entities(&sparql));

        match rows {
            Ok(rows) => paginate(self.enricher.enrich(rows), page, size),
            Err(e) => {
                tracing::warn!("{} search for '{}' failed: {}", facet, params.value, e);
                SearchResultPage::empty(size)
            }
        }
    }

    /// Subclasses of `Food`, ordered by label
    pub fn list_food_classes(&self) -> Result<Vec<FoodClass>> {
        let rows = self.graph.query(&self.queries.food_classes())?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                let id = row.get("className")?.lexical().trim();
                if id.is_empty() {
                    return None;
                }
                let label = row
                    .get("classLabel")
                    .map(|t| t.lexical().trim())
                    .filter(|l| !l.is_empty())
                    .unwrap_or(id);
                Some(FoodClass {
                    id: id.to_string(),
                    label: label.to_string(),
                })
            })
            .collect())
    }

    /// Food group names, ascending
    pub fn list_food_groups(&self) -> Result<Vec<String>> {
        let rows = self.graph.query(&self.queries.food_groups())?;
        Ok(literal_column(&rows, "groupName"))
    }

    /// Regions and the number of foods recorded for each
    pub fn regional_stats(&self) -> Result<RegionalStats> {
        let regions = self.facet_values(Facet::Region)?;
        let entities = self.fetch_entities(&self.queries.all_entities())?;

        let mut foods_by_region: BTreeMap<String, usize> =
            regions.iter().map(|r| (r.clone(), 0)).collect();
        for region in entities.iter().filter_map(|e| e.region.as_ref()) {
            if let Some(count) = foods_by_region.get_mut(region) {
                *count += 1;
            }
        }

        Ok(RegionalStats {
            total_regions: regions.len(),
            regions,
            foods_by_region,
        })
    }

    /// Every entity in the catalogue with full detail
    pub fn load_catalogue(&self) -> Result<Vec<Entity>> {
        let entities = self.fetch_entities(&self.queries.all_entities())?;
        Ok(self.enricher.enrich(entities))
    }

    /// Rebuild the text index from the graph store
    pub fn reindex(&self) -> Result<IndexStats> {
        let start = Instant::now();
        let catalogue = self.load_catalogue()?;

        if catalogue.is_empty() {
            return Err(NutriGraphError::IndexError(
                "Graph store returned no entities; keeping the current index".to_string(),
            ));
        }

        let stats = self.text.rebuild(&catalogue)?;
        tracing::info!(
            "Reindexed {} entities in {}ms",
            stats.documents,
            start.elapsed().as_millis()
        );
        Ok(stats)
    }

    pub fn index_stats(&self) -> Result<IndexStats> {
        self.text.stats()
    }
}

/// Keep the first entity seen for each identifier
fn dedupe_by_uri(entities: impl IntoIterator<Item = Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert(e.uri.clone()))
        .collect()
}
