//! Result fusion and enrichment.
//!
//! Raw hits from either backend are partial. Each surviving hit is
//! re-fetched from the graph store, which is authoritative for attributes,
//! while the text relevance score is carried over unchanged. Detail
//! lookups fan out over a fixed-size worker pool and are joined back in
//! input order.

use super::classifier::ProteinRange;
use crate::core::error::{NutriGraphError, Result};
use crate::core::graph::{
    entity_from_row, image_from_row, literal_column, EntityIri, GraphStore, QueryBuilder, Term,
};
use crate::core::types::{Entity, SortDirection, SortField};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Completes partial entities with their graph detail
pub struct Enricher {
    graph: Arc<dyn GraphStore>,
    queries: QueryBuilder,
    pool: rayon::ThreadPool,
}

impl Enricher {
    /// Create an enricher running on `workers` threads
    pub fn new(graph: Arc<dyn GraphStore>, queries: QueryBuilder, workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("nutrigraph-enrich-{i}"))
            .build()
            .map_err(|e| {
                NutriGraphError::ConfigError(format!("Failed to start enrichment pool: {e}"))
            })?;

        Ok(Self {
            graph,
            queries,
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Full detail of one entity: attributes, images in store order and
    /// ingredients in alphabetical order.
    ///
    /// Returns [`NutriGraphError::EnrichmentMiss`] when the store knows
    /// nothing about `uri`.
    pub fn detail(&self, uri: &str) -> Result<Entity> {
        let iri = EntityIri::parse(uri)?;

        let rows = self.graph.query(&self.queries.detail(&iri))?;
        let mut entity = rows
            .into_iter()
            .find_map(|mut row| {
                if !row.contains("food") {
                    row.insert("food", Term::Iri(iri.as_str().to_string()));
                }
                entity_from_row(&row)
            })
            .ok_or_else(|| NutriGraphError::EnrichmentMiss(uri.to_string()))?;

        let image_rows = self.graph.query(&self.queries.images(&iri))?;
        entity.images = image_rows.iter().filter_map(image_from_row).collect();

        let ingredient_rows = self.graph.query(&self.queries.ingredients(&iri))?;
        entity.ingredients = literal_column(&ingredient_rows, "ingredientName");

        Ok(entity)
    }

    /// Detail for one partial row, keeping its relevance score
    fn enrich_row(&self, partial: &Entity) -> Result<Entity> {
        let mut detailed = self.detail(&partial.uri)?;
        detailed.relevance_score = partial.relevance_score;
        Ok(detailed)
    }

    /// Enrich every row; a row whose detail is missing or fails is kept
    /// as it was. Output order equals input order.
    pub fn enrich(&self, rows: Vec<Entity>) -> Vec<Entity> {
        if rows.is_empty() {
            return rows;
        }

        self.pool.install(|| {
            rows.into_par_iter()
                .map(|partial| match self.enrich_row(&partial) {
                    Ok(detailed) => detailed,
                    Err(e) => {
                        tracing::debug!("Keeping partial row for {}: {}", partial.uri, e);
                        partial
                    }
                })
                .collect()
        })
    }
}

/// Keep entities whose protein passes `range`, preserving order
pub fn retain_protein(entities: Vec<Entity>, range: &ProteinRange) -> Vec<Entity> {
    if range.is_unbounded() {
        return entities;
    }
    entities
        .into_iter()
        .filter(|e| range.admits(e.nutrition.protein))
        .collect()
}

/// Stable sort by the requested field.
///
/// [`SortField::Relevance`] keeps the current order. Entities without a
/// numeric key go last in both directions.
pub fn sort_entities(entities: &mut [Entity], field: SortField, direction: SortDirection) {
    let directed = |ordering: Ordering| match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    match field {
        SortField::Relevance => {}
        SortField::Name => entities.sort_by(|a, b| {
            directed(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        SortField::Calories => entities.sort_by(|a, b| {
            compare_present_first(a.nutrition.calories, b.nutrition.calories, directed)
        }),
        SortField::Protein => entities.sort_by(|a, b| {
            compare_present_first(a.nutrition.protein, b.nutrition.protein, directed)
        }),
    }
}

fn compare_present_first(
    a: Option<f64>,
    b: Option<f64>,
    directed: impl Fn(Ordering) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.total_cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
