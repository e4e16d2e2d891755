//! Full-text index integration.
//!
//! The text index owns relevance scoring. The search pipeline only asks it
//! for ranked candidates and name completions; everything it returns is a
//! partial entity that the graph store later completes.

mod query;
mod tantivy;

use crate::core::error::Result;
use crate::core::types::{Entity, IndexStats};

pub use self::query::prepare_text_query;
pub use self::tantivy::TantivyTextIndex;

/// Advanced search request sent to the text index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextQuery {
    /// Non-blank free text
    pub text: String,

    /// Exact class local name filter
    pub class_id: Option<String>,

    /// Exact food group filter
    pub food_group: Option<String>,

    /// Inclusive calorie bounds
    pub min_calories: Option<f64>,
    pub max_calories: Option<f64>,

    /// Maximum number of hits
    pub limit: usize,
}

/// One ranked hit: the identifier, its score and whatever the index stores
#[derive(Debug, Clone, PartialEq)]
pub struct TextHit {
    pub score: f32,
    pub entity: Entity,
}

impl TextHit {
    pub fn uri(&self) -> &str {
        &self.entity.uri
    }

    /// The partial entity with its relevance score attached
    pub fn into_entity(self) -> Entity {
        let mut entity = self.entity;
        entity.relevance_score = Some(self.score);
        entity
    }
}

/// Full-text collaborator.
///
/// Hits are returned by descending relevance and never exceed
/// `query.limit`.
pub trait TextIndex: Send + Sync {
    fn search_advanced(&self, query: &TextQuery) -> Result<Vec<TextHit>>;

    /// Distinct entity names starting with `prefix`, at most `limit`
    fn autocomplete(&self, prefix: &str, limit: usize) -> Result<Vec<String>>;

    /// Replace the whole index content with the given entities
    fn rebuild(&self, entities: &[Entity]) -> Result<IndexStats>;

    fn stats(&self) -> Result<IndexStats>;
}
