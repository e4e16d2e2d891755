// Test fixtures: in-memory collaborators for the search pipeline

use chrono::Utc;
use nutrigraph::core::error::{NutriGraphError, Result};
use nutrigraph::core::graph::{GraphStore, Row, Term, XSD_DECIMAL, XSD_INTEGER};
use nutrigraph::core::text::{TextHit, TextIndex, TextQuery};
use nutrigraph::core::types::{Entity, IndexStats};
use regex::Regex;
use std::sync::Mutex;

/// Domain namespace used by every fixture
#[allow(dead_code)]
pub const NS: &str = "http://example.org/food-ontology#";

/// Full identifier for a local name
#[allow(dead_code)]
pub fn iri(local: &str) -> String {
    format!("{NS}{local}")
}

/// One food in the fake graph
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct FoodFixture {
    pub local: String,
    pub name: String,
    pub class: String,
    pub class_label: String,
    pub group: Option<String>,
    pub region: Option<String>,
    pub cooking_method: Option<String>,
    pub spice_level: Option<String>,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    /// Emit an unparseable calories literal instead of the value
    pub bad_calories: bool,
    /// (path, width, height), in store order
    pub images: Vec<(String, Option<u32>, Option<u32>)>,
    /// Unsorted; the fake answers in alphabetical order
    pub ingredients: Vec<String>,
}

#[allow(dead_code)]
impl FoodFixture {
    pub fn new(local: &str, name: &str, class: &str) -> Self {
        Self {
            local: local.to_string(),
            name: name.to_string(),
            class: class.to_string(),
            class_label: class.to_string(),
            group: None,
            region: None,
            cooking_method: None,
            spice_level: None,
            description: None,
            calories: None,
            protein: None,
            bad_calories: false,
            images: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn cooking(mut self, method: &str) -> Self {
        self.cooking_method = Some(method.to_string());
        self
    }

    pub fn spice(mut self, level: &str) -> Self {
        self.spice_level = Some(level.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn nutrition(mut self, calories: Option<f64>, protein: Option<f64>) -> Self {
        self.calories = calories;
        self.protein = protein;
        self
    }

    pub fn bad_calories(mut self) -> Self {
        self.bad_calories = true;
        self
    }

    pub fn image(mut self, path: &str, width: Option<u32>, height: Option<u32>) -> Self {
        self.images.push((path.to_string(), width, height));
        self
    }

    pub fn ingredients(mut self, names: &[&str]) -> Self {
        self.ingredients = names.iter().map(|n| n.to_string()).collect();
        self
    }

    fn listing_row(&self) -> Row {
        let mut row = Row::new()
            .with("food", Term::Iri(iri(&self.local)))
            .with("name", Term::literal(self.name.as_str()))
            .with("class", Term::Iri(iri(&self.class)))
            .with("classLabel", Term::literal(self.class_label.as_str()));

        if let Some(region) = &self.region {
            row.insert("region", Term::literal(region.as_str()));
        }
        if self.bad_calories {
            row.insert("calories", Term::literal("about 200"));
        } else if let Some(calories) = self.calories {
            row.insert("calories", Term::typed(calories.to_string(), XSD_DECIMAL));
        }
        if let Some(protein) = self.protein {
            row.insert("protein", Term::typed(protein.to_string(), XSD_DECIMAL));
        }
        row
    }

    fn detail_row(&self) -> Row {
        let mut row = self.listing_row();
        let optional = [
            ("groupName", &self.group),
            ("cookingMethod", &self.cooking_method),
            ("spiceLevel", &self.spice_level),
            ("description", &self.description),
        ];
        for (var, value) in optional {
            if let Some(value) = value {
                row.insert(var, Term::literal(value.as_str()));
            }
        }
        row
    }

    fn attribute(&self, predicate: &str) -> Option<&str> {
        match predicate {
            "region" => self.region.as_deref(),
            "cookingMethod" => self.cooking_method.as_deref(),
            "spiceLevel" => self.spice_level.as_deref(),
            _ => None,
        }
    }
}

/// A small African and Middle Eastern catalogue
#[allow(dead_code)]
pub fn sample_catalogue() -> Vec<FoodFixture> {
    vec![
        FoodFixture::new("Ful_Medames", "Ful Medames", "Stew")
            .group("Legumes")
            .region("North_Africa")
            .cooking("Boiled")
            .spice("Mild")
            .description("Slow cooked fava beans with cumin")
            .nutrition(Some(187.0), Some(13.0))
            .image("images/ful_medames_1.jpg", Some(800), Some(600))
            .image("images/ful_medames_2.jpg", None, None)
            .ingredients(&["Olive oil", "Fava beans", "Garlic", "Cumin"]),
        FoodFixture::new("Shakshuka", "Shakshuka", "Stew")
            .group("Vegetables")
            .region("North_Africa")
            .cooking("Simmered")
            .spice("Medium")
            .description("Eggs poached in a tomato and pepper stew")
            .nutrition(Some(210.0), Some(12.0))
            .ingredients(&["Tomato", "Egg", "Pepper"]),
        FoodFixture::new("Doro_Wat", "Doro Wat", "Stew")
            .group("Meat")
            .region("East_Africa")
            .cooking("Simmered")
            .spice("Hot")
            .description("Chicken stew with berbere")
            .nutrition(Some(320.0), Some(28.0))
            .ingredients(&["Chicken", "Berbere", "Onion", "Egg"]),
        FoodFixture::new("Injera", "Injera", "Flatbread")
            .group("Grains")
            .region("East_Africa")
            .cooking("Baked")
            .spice("Mild")
            .nutrition(Some(160.0), None),
        FoodFixture::new("Kibbeh", "Kibbeh", "Appetizer")
            .group("Meat")
            .region("Levant")
            .cooking("Fried")
            .spice("Mild")
            .nutrition(Some(290.0), Some(18.0)),
        FoodFixture::new("Tabbouleh", "Tabbouleh", "Salad")
            .group("Vegetables")
            .region("Levant")
            .cooking("Raw")
            .spice("Mild")
            .nutrition(Some(120.0), Some(3.0)),
        FoodFixture::new("Jollof_Rice", "Jollof Rice", "RiceDish")
            .group("Grains")
            .region("West_Africa")
            .cooking("Simmered")
            .spice("Medium")
            .nutrition(Some(350.0), Some(6.0)),
    ]
}

/// In-memory graph store answering the catalogue query templates.
///
/// Queries are recognised by their shape, every query is logged, and any
/// query containing one of the `fail_on` markers fails as an unreachable
/// endpoint would.
#[allow(dead_code)]
pub struct FakeGraph {
    foods: Vec<FoodFixture>,
    fail_on: Vec<String>,
    duplicate_listings: bool,
    log: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeGraph {
    pub fn new(foods: Vec<FoodFixture>) -> Self {
        Self {
            foods,
            fail_on: Vec::new(),
            duplicate_listings: false,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Fake over [`sample_catalogue`]
    pub fn sample() -> Self {
        Self::new(sample_catalogue())
    }

    /// Fail every query containing `marker`
    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_on.push(marker.to_string());
        self
    }

    /// Fail every query
    pub fn unavailable() -> Self {
        Self::sample().failing_on("SELECT")
    }

    /// Emit every listing row twice
    pub fn with_duplicate_listings(mut self) -> Self {
        self.duplicate_listings = true;
        self
    }

    /// Number of queries received so far
    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Every query received so far
    pub fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn find(&self, full_iri: &str) -> Option<&FoodFixture> {
        self.foods.iter().find(|f| iri(&f.local) == full_iri)
    }

    fn listing<'a>(&self, foods: impl Iterator<Item = &'a FoodFixture>) -> Vec<Row> {
        let mut rows = Vec::new();
        for food in foods {
            rows.push(food.listing_row());
            if self.duplicate_listings {
                rows.push(food.listing_row());
            }
        }
        rows
    }

    fn by_name(&self) -> Vec<&FoodFixture> {
        let mut foods: Vec<&FoodFixture> = self.foods.iter().collect();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        foods
    }

    fn class_rows(&self) -> Vec<Row> {
        let mut classes: Vec<(&str, &str)> = self
            .foods
            .iter()
            .map(|f| (f.class.as_str(), f.class_label.as_str()))
            .collect();
        classes.sort_by(|a, b| a.1.cmp(b.1));
        classes.dedup();
        classes
            .into_iter()
            .map(|(id, label)| {
                Row::new()
                    .with("className", Term::literal(id))
                    .with("classLabel", Term::literal(label))
            })
            .collect()
    }

    fn group_rows(&self) -> Vec<Row> {
        let mut groups: Vec<&str> = self.foods.iter().filter_map(|f| f.group.as_deref()).collect();
        groups.sort_unstable();
        groups.dedup();
        groups
            .into_iter()
            .map(|g| Row::new().with("groupName", Term::literal(g)))
            .collect()
    }

    fn facet_rows(&self, sparql: &str) -> Vec<Row> {
        let Some(predicate) = capture(r"\?food :(\w+) \?value", sparql) else {
            return Vec::new();
        };
        let mut values: Vec<&str> = self
            .foods
            .iter()
            .filter_map(|f| f.attribute(&predicate))
            .collect();
        values.sort_unstable();
        values.dedup();
        values
            .into_iter()
            .map(|v| Row::new().with("value", Term::literal(v)))
            .collect()
    }

    fn image_rows(&self, sparql: &str) -> Vec<Row> {
        let Some(food) = capture(r"<([^>]+)> :hasImage", sparql).and_then(|i| self.find(&i).cloned())
        else {
            return Vec::new();
        };
        food.images
            .iter()
            .enumerate()
            .map(|(i, (path, width, height))| {
                let mut row = Row::new()
                    .with("image", Term::Iri(iri(&format!("{}_image_{}", food.local, i + 1))))
                    .with("imagePath", Term::literal(path.as_str()));
                if let Some((_, filename)) = path.rsplit_once('/') {
                    row.insert("filename", Term::literal(filename));
                }
                if let Some(w) = width {
                    row.insert("width", Term::typed(w.to_string(), XSD_INTEGER));
                }
                if let Some(h) = height {
                    row.insert("height", Term::typed(h.to_string(), XSD_INTEGER));
                }
                row
            })
            .collect()
    }

    fn ingredient_rows(&self, sparql: &str) -> Vec<Row> {
        let Some(food) = capture(r"<([^>]+)> :contains", sparql).and_then(|i| self.find(&i).cloned())
        else {
            return Vec::new();
        };
        let mut names = food.ingredients.clone();
        names.sort();
        names
            .into_iter()
            .map(|n| Row::new().with("ingredientName", Term::literal(n)))
            .collect()
    }

    fn detail_rows(&self, full_iri: &str) -> Vec<Row> {
        self.find(full_iri)
            .map(|f| vec![f.detail_row()])
            .unwrap_or_default()
    }

    fn range_rows(&self, sparql: &str) -> Vec<Row> {
        let filter = Regex::new(r"FILTER\(\?(calories|protein) (>=|<=) ([0-9.]+)\)").unwrap();
        let bounds: Vec<(String, String, f64)> = filter
            .captures_iter(sparql)
            .map(|c| (c[1].to_string(), c[2].to_string(), c[3].parse().unwrap()))
            .collect();

        let mut foods: Vec<&FoodFixture> = self
            .foods
            .iter()
            .filter(|f| !f.bad_calories)
            .filter(|f| match (f.calories, f.protein) {
                (Some(calories), Some(protein)) => bounds.iter().all(|(var, op, bound)| {
                    let value = if var == "calories" { calories } else { protein };
                    if op == ">=" {
                        value >= *bound
                    } else {
                        value <= *bound
                    }
                }),
                _ => false,
            })
            .collect();
        foods.sort_by(|a, b| a.calories.partial_cmp(&b.calories).unwrap());
        foods.truncate(100);
        self.listing(foods.into_iter())
    }
}

impl GraphStore for FakeGraph {
    fn query(&self, sparql: &str) -> Result<Vec<Row>> {
        self.log.lock().unwrap().push(sparql.to_string());

        if self.fail_on.iter().any(|marker| sparql.contains(marker.as_str())) {
            return Err(NutriGraphError::graph_unavailable(
                "connection refused (scripted)",
            ));
        }

        if sparql.contains("?className") {
            return Ok(self.class_rows());
        }
        if sparql.contains("SELECT DISTINCT ?groupName") {
            return Ok(self.group_rows());
        }
        if sparql.contains("SELECT DISTINCT ?value") {
            return Ok(self.facet_rows(sparql));
        }
        if sparql.contains(":hasImage") {
            return Ok(self.image_rows(sparql));
        }
        if sparql.contains(":contains ?ingredient") {
            return Ok(self.ingredient_rows(sparql));
        }
        if let Some(full_iri) = capture(r"BIND\(<([^>]+)> AS \?food\)", sparql) {
            return Ok(self.detail_rows(&full_iri));
        }
        if sparql.contains("LIMIT ") {
            return Ok(self.range_rows(sparql));
        }
        if let Some(class) = capture(r"a :(\w+) \.", sparql) {
            let foods = self.by_name();
            return Ok(self.listing(foods.into_iter().filter(|f| f.class == class)));
        }
        let attribute = Regex::new(r#":(region|cookingMethod|spiceLevel) "([^"]*)" \."#).unwrap();
        if let Some(c) = attribute.captures(sparql) {
            let (predicate, value) = (c[1].to_string(), c[2].to_string());
            let foods = self.by_name();
            return Ok(self.listing(
                foods
                    .into_iter()
                    .filter(|f| f.attribute(&predicate) == Some(value.as_str())),
            ));
        }

        let foods = self.by_name();
        Ok(self.listing(foods.into_iter()))
    }
}

fn capture(pattern: &str, haystack: &str) -> Option<String> {
    Regex::new(pattern)
        .unwrap()
        .captures(haystack)
        .map(|c| c[1].to_string())
}

/// A text hit on a catalogue food with only the fields the index stores
#[allow(dead_code)]
pub fn hit(local: &str, name: &str, score: f32, protein: Option<f64>) -> TextHit {
    let mut entity = Entity::new(iri(local), name);
    entity.nutrition.protein = protein;
    TextHit { score, entity }
}

/// Text index returning scripted hits and recording every request
#[allow(dead_code)]
pub struct ScriptedTextIndex {
    hits: Vec<TextHit>,
    names: Vec<String>,
    fail: bool,
    requests: Mutex<Vec<TextQuery>>,
    autocomplete_calls: Mutex<usize>,
}

#[allow(dead_code)]
impl ScriptedTextIndex {
    pub fn new(hits: Vec<TextHit>) -> Self {
        Self {
            hits,
            names: Vec::new(),
            fail: false,
            requests: Mutex::new(Vec::new()),
            autocomplete_calls: Mutex::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every call fails as an unreachable index would
    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn requests(&self) -> Vec<TextQuery> {
        self.requests.lock().unwrap().clone()
    }

    pub fn autocomplete_calls(&self) -> usize {
        *self.autocomplete_calls.lock().unwrap()
    }
}

impl TextIndex for ScriptedTextIndex {
    fn search_advanced(&self, query: &TextQuery) -> Result<Vec<TextHit>> {
        self.requests.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(NutriGraphError::text_index_unavailable("index offline (scripted)"));
        }
        Ok(self.hits.iter().take(query.limit).cloned().collect())
    }

    fn autocomplete(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        *self.autocomplete_calls.lock().unwrap() += 1;
        if self.fail {
            return Err(NutriGraphError::text_index_unavailable("index offline (scripted)"));
        }
        let prefix = prefix.to_lowercase();
        Ok(self
            .names
            .iter()
            .filter(|n| n.to_lowercase().starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect())
    }

    fn rebuild(&self, entities: &[Entity]) -> Result<IndexStats> {
        Ok(IndexStats {
            documents: entities.len() as u64,
            deleted_documents: 0,
            segments: 1,
            last_rebuilt_at: Some(Utc::now()),
        })
    }

    fn stats(&self) -> Result<IndexStats> {
        Ok(IndexStats {
            documents: self.hits.len() as u64,
            deleted_documents: 0,
            segments: usize::from(!self.hits.is_empty()),
            last_rebuilt_at: None,
        })
    }
}
