//! Tantivy-backed text index over food entities.
//!
//! One document per entity. Free text is matched against the name,
//! description, ingredients and class label with BM25 ranking; class,
//! group and calorie constraints are applied as non-scoring filters.

use super::{prepare_text_query, TextHit, TextIndex, TextQuery};
use crate::core::error::{NutriGraphError, Result};
use crate::core::types::{Entity, IndexStats};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::ops::Bound;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};
use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{
    BooleanQuery, ConstScoreQuery, Occur, Query, QueryParser, RangeQuery, RegexQuery, TermQuery,
};
use tantivy::schema::*;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};

/// Writer heap size (50MB)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Create the Tantivy schema for entity indexing
///
/// Fields:
/// - uri: Entity identifier (STRING | STORED)
/// - name, description, ingredients, class_label: Searchable text (TEXT | STORED)
/// - name_key: Lower-cased name for prefix completion (STRING | STORED)
/// - class_id, food_group, region, cooking_method, spice_level: Exact filters (STRING | STORED)
/// - calories, protein, carbohydrates, fat: Numeric (f64 | INDEXED | STORED | FAST)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field("uri", STRING | STORED);

    // Searchable text
    builder.add_text_field("name", TEXT | STORED);
    builder.add_text_field("description", TEXT | STORED);
    builder.add_text_field("ingredients", TEXT | STORED);
    builder.add_text_field("class_label", TEXT | STORED);

    // Autocomplete key
    builder.add_text_field("name_key", STRING | STORED);

    // Exact filters
    builder.add_text_field("class_id", STRING | STORED);
    builder.add_text_field("food_group", STRING | STORED);
    builder.add_text_field("region", STRING | STORED);
    builder.add_text_field("cooking_method", STRING | STORED);
    builder.add_text_field("spice_level", STRING | STORED);

    // Nutrition
    builder.add_f64_field("calories", INDEXED | STORED | FAST);
    builder.add_f64_field("protein", INDEXED | STORED | FAST);
    builder.add_f64_field("carbohydrates", INDEXED | STORED | FAST);
    builder.add_f64_field("fat", INDEXED | STORED | FAST);

    builder.build()
}

/// Resolved schema fields
#[derive(Clone, Copy)]
struct Fields {
    uri: Field,
    name: Field,
    description: Field,
    ingredients: Field,
    class_label: Field,
    name_key: Field,
    class_id: Field,
    food_group: Field,
    region: Field,
    cooking_method: Field,
    spice_level: Field,
    calories: Field,
    protein: Field,
    carbohydrates: Field,
    fat: Field,
}

impl Fields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| NutriGraphError::IndexError(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            uri: field("uri")?,
            name: field("name")?,
            description: field("description")?,
            ingredients: field("ingredients")?,
            class_label: field("class_label")?,
            name_key: field("name_key")?,
            class_id: field("class_id")?,
            food_group: field("food_group")?,
            region: field("region")?,
            cooking_method: field("cooking_method")?,
            spice_level: field("spice_level")?,
            calories: field("calories")?,
            protein: field("protein")?,
            carbohydrates: field("carbohydrates")?,
            fat: field("fat")?,
        })
    }
}

/// Tantivy index wrapper
///
/// Opening only creates a reader, so any number of handles (and processes)
/// can search the same directory. The `IndexWriter` exists only inside
/// [`TantivyTextIndex::rebuild`], which holds the write side of `lock`;
/// searches hold the read side, so a rebuild never interleaves with a
/// search through the same handle.
///
/// The rebuild time travels as the commit payload in `meta.json`.
pub struct TantivyTextIndex {
    index: Index,
    fields: Fields,
    reader: IndexReader,
    lock: RwLock<()>,
}

impl std::fmt::Debug for TantivyTextIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyTextIndex")
            .field("schema", &"<schema>")
            .finish()
    }
}

impl TantivyTextIndex {
    /// Create a throwaway index held in memory
    pub fn in_memory() -> Result<Self> {
        Self::from_index(Index::create_in_ram(create_schema()))
    }

    /// Open the index stored in `index_dir`, creating it when absent
    pub fn open_or_create(index_dir: &Path) -> Result<Self> {
        let index = if index_dir.join("meta.json").exists() {
            Index::open_in_dir(index_dir)
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to open index: {e}")))?
        } else {
            std::fs::create_dir_all(index_dir)?;
            Index::create_in_dir(index_dir, create_schema())
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to create index: {e}")))?
        };

        tracing::debug!("Text index at {}", index_dir.display());
        Self::from_index(index)
    }

    fn from_index(index: Index) -> Result<Self> {
        let fields = Fields::resolve(&index.schema())?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| NutriGraphError::IndexError(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            fields,
            reader,
            lock: RwLock::new(()),
        })
    }

    fn document_for(&self, entity: &Entity) -> TantivyDocument {
        let f = &self.fields;
        let mut doc = TantivyDocument::default();

        doc.add_text(f.uri, &entity.uri);
        doc.add_text(f.name, &entity.name);
        doc.add_text(f.name_key, entity.name.to_lowercase());

        let texts = [
            (f.description, &entity.description),
            (f.class_label, &entity.class_label),
            (f.class_id, &entity.class_id),
            (f.food_group, &entity.food_group),
            (f.region, &entity.region),
            (f.cooking_method, &entity.cooking_method),
            (f.spice_level, &entity.spice_level),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                doc.add_text(field, value);
            }
        }

        for ingredient in &entity.ingredients {
            doc.add_text(f.ingredients, ingredient);
        }

        let numbers = [
            (f.calories, entity.nutrition.calories),
            (f.protein, entity.nutrition.protein),
            (f.carbohydrates, entity.nutrition.carbohydrates),
            (f.fat, entity.nutrition.fat),
        ];
        for (field, value) in numbers {
            if let Some(value) = value {
                doc.add_f64(field, value);
            }
        }

        doc
    }

    fn entity_from_document(&self, doc: &TantivyDocument) -> Entity {
        let f = &self.fields;
        let mut entity = Entity::new(
            Self::extract_text(doc, f.uri).unwrap_or_default(),
            Self::extract_text(doc, f.name).unwrap_or_default(),
        );

        entity.description = Self::extract_text(doc, f.description);
        entity.class_id = Self::extract_text(doc, f.class_id);
        entity.class_label = Self::extract_text(doc, f.class_label);
        entity.food_group = Self::extract_text(doc, f.food_group);
        entity.region = Self::extract_text(doc, f.region);
        entity.cooking_method = Self::extract_text(doc, f.cooking_method);
        entity.spice_level = Self::extract_text(doc, f.spice_level);
        entity.ingredients = doc
            .get_all(f.ingredients)
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect();

        entity.nutrition.calories = Self::extract_f64(doc, f.calories);
        entity.nutrition.protein = Self::extract_f64(doc, f.protein);
        entity.nutrition.carbohydrates = Self::extract_f64(doc, f.carbohydrates);
        entity.nutrition.fat = Self::extract_f64(doc, f.fat);

        entity
    }

    /// Combine the text clause with the exact and range filters
    fn build_query(&self, query: &TextQuery) -> Box<dyn Query> {
        let f = &self.fields;
        let parser = QueryParser::for_index(
            &self.index,
            vec![f.name, f.description, f.ingredients, f.class_label],
        );

        let (text_query, errors) = parser.parse_query_lenient(&prepare_text_query(&query.text));
        if !errors.is_empty() {
            tracing::debug!("Lenient parse of '{}' dropped {} clause(s)", query.text, errors.len());
        }

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![(Occur::Must, text_query)];

        let exact = [(f.class_id, &query.class_id), (f.food_group, &query.food_group)];
        for (field, value) in exact {
            if let Some(value) = value {
                let term = TermQuery::new(Term::from_field_text(field, value), IndexRecordOption::Basic);
                clauses.push((Occur::Must, Box::new(ConstScoreQuery::new(Box::new(term), 0.0))));
            }
        }

        if query.min_calories.is_some() || query.max_calories.is_some() {
            let lower = query.min_calories.map_or(Bound::Unbounded, Bound::Included);
            let upper = query.max_calories.map_or(Bound::Unbounded, Bound::Included);
            let range = RangeQuery::new_f64_bounds("calories".to_string(), lower, upper);
            clauses.push((Occur::Must, Box::new(ConstScoreQuery::new(Box::new(range), 0.0))));
        }

        Box::new(BooleanQuery::new(clauses))
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>> {
        self.lock
            .read()
            .map_err(|_| NutriGraphError::IndexError("Index lock poisoned".to_string()))
    }

    /// Rebuild time stored with the last commit, if any
    fn last_rebuilt_at(&self) -> Option<DateTime<Utc>> {
        let metas = match self.index.load_metas() {
            Ok(metas) => metas,
            Err(e) => {
                tracing::warn!("Failed to read index metadata: {}", e);
                return None;
            }
        };

        let payload = metas.payload?;
        match DateTime::parse_from_rfc3339(&payload) {
            Ok(stamp) => Some(stamp.with_timezone(&Utc)),
            Err(_) => {
                tracing::debug!("Ignoring commit payload '{}'", payload);
                None
            }
        }
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> Option<String> {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    /// Extract f64 field from document
    fn extract_f64(doc: &TantivyDocument, field: Field) -> Option<f64> {
        doc.get_first(field).and_then(|v| v.as_f64())
    }
}

impl TextIndex for TantivyTextIndex {
    fn search_advanced(&self, query: &TextQuery) -> Result<Vec<TextHit>> {
        if query.limit == 0 || query.text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self.read_guard()?;
        let searcher = self.reader.searcher();
        let tantivy_query = self.build_query(query);

        let top_docs = searcher
            .search(&tantivy_query, &TopDocs::with_limit(query.limit))
            .map_err(|e| NutriGraphError::IndexError(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                NutriGraphError::IndexError(format!("Failed to retrieve document: {e}"))
            })?;

            hits.push(TextHit {
                score,
                entity: self.entity_from_document(&doc),
            });
        }

        tracing::debug!("Text search '{}' returned {} hit(s)", query.text, hits.len());
        Ok(hits)
    }

    fn autocomplete(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let _guard = self.read_guard()?;
        let searcher = self.reader.searcher();

        let pattern = format!("{}.*", regex::escape(&prefix));
        let query = RegexQuery::from_pattern(&pattern, self.fields.name_key)
            .map_err(|e| NutriGraphError::IndexError(format!("Invalid completion pattern: {e}")))?;

        let addresses = searcher
            .search(&query, &DocSetCollector)
            .map_err(|e| NutriGraphError::IndexError(format!("Completion failed: {e}")))?;

        let mut names = BTreeSet::new();
        for address in addresses {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| {
                NutriGraphError::IndexError(format!("Failed to retrieve document: {e}"))
            })?;
            if let Some(name) = Self::extract_text(&doc, self.fields.name) {
                names.insert(name);
            }
        }

        Ok(names.into_iter().take(limit).collect())
    }

    fn rebuild(&self, entities: &[Entity]) -> Result<IndexStats> {
        {
            let _guard = self
                .lock
                .write()
                .map_err(|_| NutriGraphError::IndexError("Index lock poisoned".to_string()))?;

            let mut writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES).map_err(|e| {
                NutriGraphError::IndexError(format!("Failed to create writer: {e}"))
            })?;

            writer
                .delete_all_documents()
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to clear index: {e}")))?;

            for entity in entities {
                writer
                    .add_document(self.document_for(entity))
                    .map_err(|e| NutriGraphError::IndexError(format!("Failed to add document: {e}")))?;
            }

            let mut commit = writer
                .prepare_commit()
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to commit: {e}")))?;
            commit.set_payload(&Utc::now().to_rfc3339());
            commit
                .commit()
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to commit: {e}")))?;

            // Releases the directory lockfile for other processes
            writer
                .wait_merging_threads()
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to finish merges: {e}")))?;

            self.reader
                .reload()
                .map_err(|e| NutriGraphError::IndexError(format!("Failed to reload reader: {e}")))?;
        }

        tracing::info!("Text index rebuilt with {} entities", entities.len());
        self.stats()
    }

    fn stats(&self) -> Result<IndexStats> {
        let _guard = self.read_guard()?;
        let searcher = self.reader.searcher();

        let deleted_documents = searcher
            .segment_readers()
            .iter()
            .map(|segment| u64::from(segment.num_deleted_docs()))
            .sum();

        Ok(IndexStats {
            documents: searcher.num_docs(),
            deleted_documents,
            segments: searcher.segment_readers().len(),
            last_rebuilt_at: self.last_rebuilt_at(),
        })
    }
}
