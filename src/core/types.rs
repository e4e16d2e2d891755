//! Core data types for the NutriGraph search service.
//!
//! This module defines the entities returned to callers, the search
//! criteria they send, and the derived result page.

use serde::{Deserialize, Serialize};

/// Default number of entities per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// An image attached to a food entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image resource identifier
    pub uri: String,

    /// Path of the image file as recorded in the graph
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Pixel width, only when known and positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, only when known and positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Nutritional values per serving.
///
/// Every value is optional: an absent value means the graph asserts
/// nothing, which is different from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub sugar: Option<f64>,
}

/// A food entity from the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Globally unique identifier (IRI in the graph store)
    pub uri: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Local name of the declared class (e.g. `Stew`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,

    /// Human readable class label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_significance: Option<String>,

    /// Entity subtype
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,

    #[serde(default)]
    pub nutrition: NutritionProfile,

    /// Ingredient names
    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Text relevance score, only set for entities that came from a
    /// full-text hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
}

impl Entity {
    /// Create an entity with only its identity populated
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: None,
            class_id: None,
            class_label: None,
            food_group: None,
            region: None,
            cooking_method: None,
            spice_level: None,
            cultural_significance: None,
            food_type: None,
            nutrition: NutritionProfile::default(),
            ingredients: Vec::new(),
            images: Vec::new(),
            relevance_score: None,
        }
    }
}

/// Field used to order the final result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Keep upstream order: text relevance for hybrid searches, the
    /// graph query's own ordering otherwise
    #[default]
    Relevance,
    Name,
    Calories,
    Protein,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" | "score" => Ok(SortField::Relevance),
            "name" => Ok(SortField::Name),
            "calories" => Ok(SortField::Calories),
            "protein" => Ok(SortField::Protein),
            other => Err(format!(
                "unknown sort field '{other}' (expected relevance, name, calories or protein)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}' (expected asc or desc)")),
        }
    }
}

/// Search request sent by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free text; blank means graph-only search
    #[serde(default)]
    pub query: Option<String>,

    /// Class local name filter (e.g. `Stew`)
    #[serde(default)]
    pub class_id: Option<String>,

    #[serde(default)]
    pub food_group: Option<String>,

    #[serde(default)]
    pub min_calories: Option<f64>,
    #[serde(default)]
    pub max_calories: Option<f64>,
    #[serde(default)]
    pub min_protein: Option<f64>,
    #[serde(default)]
    pub max_protein: Option<f64>,

    /// Zero-based page index
    #[serde(default)]
    pub page: usize,

    /// Page size, must be positive
    #[serde(default = "default_page_size")]
    pub size: usize,

    #[serde(default)]
    pub sort: SortField,

    #[serde(default)]
    pub direction: SortDirection,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: None,
            class_id: None,
            food_group: None,
            min_calories: None,
            max_calories: None,
            min_protein: None,
            max_protein: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortField::default(),
            direction: SortDirection::default(),
        }
    }
}

impl SearchCriteria {
    /// Trimmed free text, or `None` when absent or blank
    pub fn text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Class filter, ignoring empty strings
    pub fn class_filter(&self) -> Option<&str> {
        non_empty(self.class_id.as_deref())
    }

    /// Group filter, ignoring empty strings
    pub fn group_filter(&self) -> Option<&str> {
        non_empty(self.food_group.as_deref())
    }

    pub fn has_calorie_bounds(&self) -> bool {
        self.min_calories.is_some() || self.max_calories.is_some()
    }

    pub fn has_protein_bounds(&self) -> bool {
        self.min_protein.is_some() || self.max_protein.is_some()
    }

    /// True when any of the four nutritional bounds is set
    pub fn has_nutrition_bounds(&self) -> bool {
        self.has_calorie_bounds() || self.has_protein_bounds()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One page of search results.
///
/// The pagination fields are derived from the total, page and size in
/// [`SearchResultPage::new`] and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultPage {
    entities: Vec<Entity>,
    total_elements: usize,
    current_page: usize,
    size: usize,
    total_pages: usize,
    has_next: bool,
    has_previous: bool,
}

impl SearchResultPage {
    /// Build a page from its content and the size of the full result list
    pub fn new(entities: Vec<Entity>, total_elements: usize, current_page: usize, size: usize) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            entities,
            total_elements,
            current_page,
            size,
            total_pages,
            has_next: current_page.saturating_add(1) < total_pages,
            has_previous: current_page > 0,
        }
    }

    /// Degraded result returned when retrieval failed
    pub fn empty(size: usize) -> Self {
        Self::new(Vec::new(), 0, 0, size)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }
}

/// Statistics reported by the text index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Live documents
    pub documents: u64,

    /// Documents marked deleted but not yet merged away
    pub deleted_documents: u64,

    pub segments: usize,

    /// When the index was last rebuilt by this process
    pub last_rebuilt_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A subclass of `Food` in the ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodClass {
    /// Local name, usable as a class filter (e.g. `Flatbread`)
    pub id: String,
    pub label: String,
}

/// Region facet values with the number of foods in each
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionalStats {
    pub regions: Vec<String>,
    pub total_regions: usize,
    pub foods_by_region: std::collections::BTreeMap<String, usize>,
}
