//! Query intent classification.
//!
//! Decides, from the criteria alone, which backend answers a request.
//! Blank text means graph-only; any real text means the text index ranks
//! candidates and the graph store completes them.

use crate::core::error::{NutriGraphError, Result};
use crate::core::graph::{ClassParams, RangeParams, SafeIdentifier};
use crate::core::text::TextQuery;
use crate::core::types::SearchCriteria;

/// Retrieval strategy for one request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    /// Every entity, ordered by name
    AllEntities,

    /// Entities of one declared class
    ByClass(ClassParams),

    /// Entities asserting calories and protein within bounds
    ByNutritionalRange(RangeParams),

    /// Text-ranked candidates, then an in-process protein filter
    Hybrid {
        query: TextQuery,
        protein: ProteinRange,
    },
}

impl SearchPlan {
    /// Short name for logging
    pub fn label(&self) -> &'static str {
        match self {
            SearchPlan::AllEntities => "all-entities",
            SearchPlan::ByClass(_) => "by-class",
            SearchPlan::ByNutritionalRange(_) => "by-nutritional-range",
            SearchPlan::Hybrid { .. } => "hybrid",
        }
    }
}

/// Inclusive protein bounds applied after text retrieval
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProteinRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ProteinRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether an entity with this protein value passes.
    ///
    /// With any bound set, an unknown value never passes.
    pub fn admits(&self, protein: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = protein else {
            return false;
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Check caller-side constraints that do not depend on any collaborator
pub fn validate_criteria(criteria: &SearchCriteria, max_page_size: usize, max_query_length: usize) -> Result<()> {
    if criteria.size == 0 {
        return Err(NutriGraphError::InvalidCriteria(
            "Page size must be positive".to_string(),
        ));
    }

    if criteria.size > max_page_size {
        return Err(NutriGraphError::InvalidCriteria(format!(
            "Page size {} exceeds maximum {max_page_size}",
            criteria.size
        )));
    }

    if let Some(text) = criteria.text() {
        if text.chars().count() > max_query_length {
            return Err(NutriGraphError::InvalidCriteria(format!(
                "Query exceeds {max_query_length} characters"
            )));
        }
    }

    check_bounds("calories", criteria.min_calories, criteria.max_calories)?;
    check_bounds("protein", criteria.min_protein, criteria.max_protein)?;

    Ok(())
}

fn check_bounds(name: &str, min: Option<f64>, max: Option<f64>) -> Result<()> {
    for bound in [min, max].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            return Err(NutriGraphError::InvalidCriteria(format!(
                "{name} bounds must be non-negative numbers"
            )));
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(NutriGraphError::InvalidCriteria(format!(
                "min {name} ({min}) is greater than max {name} ({max})"
            )));
        }
    }

    Ok(())
}

/// Choose the retrieval strategy.
///
/// Precedence without text: class filter, then nutritional bounds, then
/// everything. A group filter is only honoured together with text. The
/// class filter is validated here so an unsafe value never reaches a
/// collaborator.
pub fn classify(criteria: &SearchCriteria, over_fetch: usize) -> Result<SearchPlan> {
    let class_id = criteria
        .class_filter()
        .map(SafeIdentifier::parse)
        .transpose()?;

    if let Some(text) = criteria.text() {
        let query = TextQuery {
            text: text.to_string(),
            class_id: class_id.map(|c| c.as_str().to_string()),
            food_group: criteria.group_filter().map(str::to_string),
            min_calories: criteria.min_calories,
            max_calories: criteria.max_calories,
            limit: over_fetch,
        };
        let protein = ProteinRange {
            min: criteria.min_protein,
            max: criteria.max_protein,
        };
        return Ok(SearchPlan::Hybrid { query, protein });
    }

    if let Some(class_id) = class_id {
        return Ok(SearchPlan::ByClass(ClassParams { class_id }));
    }

    if criteria.has_nutrition_bounds() {
        return Ok(SearchPlan::ByNutritionalRange(RangeParams {
            min_calories: criteria.min_calories,
            max_calories: criteria.max_calories,
            min_protein: criteria.min_protein,
            max_protein: criteria.max_protein,
        }));
    }

    Ok(SearchPlan::AllEntities)
}
