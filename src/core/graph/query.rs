//! SPARQL query templates for the food catalogue.
//!
//! Every template is a pure function of a typed parameter struct. Free-form
//! strings only ever reach a query as escaped, quoted literals. Values that
//! are rendered as bare identifiers must first become a [`SafeIdentifier`]
//! (or an [`EntityIri`] for full resource identifiers), so an unchecked
//! string cannot be spliced into a query by a new call site.

use crate::core::error::{NutriGraphError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Row cap applied by the nutritional range lookup
pub const RANGE_ROW_CAP: usize = 100;

const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OWL: &str = "http://www.w3.org/2002/07/owl#";

static SAFE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Attributes fetched for the full entity projection
const DETAIL_ATTRIBUTES: [&str; 13] = [
    "region",
    "cookingMethod",
    "spiceLevel",
    "culturalSignificance",
    "foodType",
    "calories",
    "protein",
    "carbohydrates",
    "fat",
    "fiber",
    "sodium",
    "sugar",
    "description",
];

/// Attributes fetched by the catalogue listing
const LISTING_ATTRIBUTES: [&str; 12] = [
    "region",
    "cookingMethod",
    "spiceLevel",
    "culturalSignificance",
    "calories",
    "protein",
    "carbohydrates",
    "fat",
    "fiber",
    "sodium",
    "sugar",
    "description",
];

/// A token that may be rendered as a bare identifier: `[A-Za-z0-9_]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeIdentifier(String);

impl SafeIdentifier {
    /// Validate a raw token
    pub fn parse(raw: &str) -> Result<Self> {
        if SAFE_TOKEN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(NutriGraphError::InvalidIdentifierParameter(format!(
                "'{raw}' must match [A-Za-z0-9_]+"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SafeIdentifier {
    type Err = NutriGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A resource identifier that can be written between `<` and `>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityIri(String);

impl EntityIri {
    /// Validate an absolute IRI (scheme plus no IRIREF-forbidden characters)
    pub fn parse(raw: &str) -> Result<Self> {
        let forbidden = |c: char| {
            c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
        };

        let has_scheme = raw
            .split_once(':')
            .map(|(scheme, _)| {
                !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            })
            .unwrap_or(false);

        if raw.is_empty() || !has_scheme || raw.chars().any(forbidden) {
            return Err(NutriGraphError::InvalidIdentifierParameter(format!(
                "'{raw}' is not a valid entity IRI"
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Categorical attributes that can be listed and filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    Region,
    CookingMethod,
    SpiceLevel,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Region, Facet::CookingMethod, Facet::SpiceLevel];

    /// Resolve a caller supplied facet name.
    ///
    /// Accepts `region`, `cooking-method`, `cooking_method`, `cookingMethod`,
    /// `spice-level` and the like, singular or plural.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_suffix('s').unwrap_or(&normalized);

        match normalized {
            "region" => Ok(Facet::Region),
            "cookingmethod" => Ok(Facet::CookingMethod),
            "spicelevel" => Ok(Facet::SpiceLevel),
            _ => Err(NutriGraphError::InvalidIdentifierParameter(format!(
                "unknown facet '{name}' (expected region, cooking-method or spice-level)"
            ))),
        }
    }

    /// Graph predicate local name
    pub fn predicate_name(&self) -> &'static str {
        match self {
            Facet::Region => "region",
            Facet::CookingMethod => "cookingMethod",
            Facet::SpiceLevel => "spiceLevel",
        }
    }

    /// Predicate as a checked identifier
    pub fn predicate(&self) -> Result<SafeIdentifier> {
        SafeIdentifier::parse(self.predicate_name())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Region => "region",
            Facet::CookingMethod => "cooking-method",
            Facet::SpiceLevel => "spice-level",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters for the by-class lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ClassParams {
    pub class_id: SafeIdentifier,
}

/// Parameters for the nutritional range lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeParams {
    pub min_calories: Option<f64>,
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_protein: Option<f64>,
}

/// Parameters for an exact attribute value lookup
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeParams {
    pub attribute: Facet,
    pub value: String,
}

/// Parameters for a distinct values listing
#[derive(Debug, Clone, PartialEq)]
pub struct FacetParams {
    pub predicate: SafeIdentifier,
}

impl FacetParams {
    pub fn for_facet(facet: Facet) -> Result<Self> {
        Ok(Self {
            predicate: facet.predicate()?,
        })
    }
}

/// Builds the fixed catalogue of SPARQL queries
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    namespace: String,
}

impl QueryBuilder {
    /// Create a builder for the given domain namespace
    /// (e.g. `http://example.org/food-ontology#`)
    pub fn new(namespace: &str) -> Result<Self> {
        let checked = EntityIri::parse(namespace)
            .map_err(|_| NutriGraphError::ConfigError(format!("Invalid namespace: {namespace}")))?;
        Ok(Self {
            namespace: checked.as_str().to_string(),
        })
    }

    fn prologue(&self) -> String {
        format!(
            "PREFIX : <{}>\nPREFIX rdfs: <{RDFS}>\nPREFIX owl: <{OWL}>\n\n",
            self.namespace
        )
    }

    /// Every entity with a name and a labelled domain class, by name
    pub fn all_entities(&self) -> String {
        let vars = select_vars(&LISTING_ATTRIBUTES);
        let optionals = optional_block("?food", &LISTING_ATTRIBUTES);
        format!(
            "{prologue}SELECT ?food ?name ?class ?classLabel {vars} WHERE {{\n\
             \x20   ?food :name ?name ;\n\
             \x20         a ?class .\n\
             \x20   ?class rdfs:label ?classLabel .\n\
             {optionals}\
             \x20   FILTER(?class != owl:NamedIndividual)\n\
             \x20   FILTER(STRSTARTS(STR(?class), {ns}))\n\
             }}\n\
             ORDER BY ?name\n",
            prologue = self.prologue(),
            ns = quote_literal(&self.namespace),
        )
    }

    /// Entities declared with exactly the given class
    pub fn by_class(&self, params: &ClassParams) -> String {
        let class = &params.class_id;
        let attributes = ["region", "calories", "protein"];
        let vars = select_vars(&attributes);
        let optionals = optional_block("?food", &attributes);
        format!(
            "{prologue}SELECT ?food ?name ?class ?classLabel {vars} WHERE {{\n\
             \x20   ?food :name ?name ;\n\
             \x20         a :{class} .\n\
             \x20   :{class} rdfs:label ?classLabel .\n\
             {optionals}\
             \x20   BIND(:{class} AS ?class)\n\
             }}\n\
             ORDER BY ?name\n",
            prologue = self.prologue(),
        )
    }

    /// Entities asserting both calories and protein within the supplied
    /// bounds, lowest calories first, capped at [`RANGE_ROW_CAP`] rows
    pub fn by_nutritional_range(&self, params: &RangeParams) -> Result<String> {
        let attributes = ["carbohydrates", "fat"];
        let vars = select_vars(&attributes);
        let optionals = optional_block("?food", &attributes);

        let mut filters = String::new();
        let bounds = [
            ("calories", ">=", params.min_calories),
            ("calories", "<=", params.max_calories),
            ("protein", ">=", params.min_protein),
            ("protein", "<=", params.max_protein),
        ];
        for (var, op, bound) in bounds {
            if let Some(value) = bound {
                filters.push_str(&format!(
                    "    FILTER(?{var} {op} {})\n",
                    format_decimal(var, value)?
                ));
            }
        }

        Ok(format!(
            "{prologue}SELECT ?food ?name ?class ?classLabel ?calories ?protein {vars} WHERE {{\n\
             \x20   ?food :name ?name ;\n\
             \x20         a ?class ;\n\
             \x20         :calories ?calories ;\n\
             \x20         :protein ?protein .\n\
             \x20   ?class rdfs:label ?classLabel .\n\
             {optionals}\
             \x20   FILTER(?class != owl:NamedIndividual)\n\
             {filters}\
             }}\n\
             ORDER BY ?calories\n\
             LIMIT {RANGE_ROW_CAP}\n",
            prologue = self.prologue(),
        ))
    }

    /// Entities whose attribute equals the given value exactly
    pub fn by_attribute_value(&self, params: &AttributeParams) -> Result<String> {
        let predicate = params.attribute.predicate()?;
        let attributes = ["region", "cookingMethod", "spiceLevel", "calories"];
        let vars = select_vars(&attributes);
        let optionals = optional_block("?food", &attributes);
        Ok(format!(
            "{prologue}SELECT ?food ?name ?class ?classLabel {vars} WHERE {{\n\
             \x20   ?food :name ?name ;\n\
             \x20         a ?class ;\n\
             \x20         :{predicate} {value} .\n\
             \x20   ?class rdfs:label ?classLabel .\n\
             {optionals}\
             \x20   FILTER(?class != owl:NamedIndividual)\n\
             }}\n\
             ORDER BY ?name\n",
            prologue = self.prologue(),
            value = quote_literal(&params.value),
        ))
    }

    /// Full attribute projection of a single entity
    pub fn detail(&self, iri: &EntityIri) -> String {
        let vars = select_vars(&DETAIL_ATTRIBUTES);
        let optionals = optional_block(&iri.to_string(), &DETAIL_ATTRIBUTES);
        format!(
            "{prologue}SELECT ?food ?name ?class ?classLabel ?group ?groupName {vars} WHERE {{\n\
             \x20   {iri} :name ?name ;\n\
             \x20         a ?class .\n\
             \x20   ?class rdfs:label ?classLabel .\n\
             \x20   OPTIONAL {{ {iri} :belongsTo ?group . ?group :name ?groupName }}\n\
             {optionals}\
             \x20   FILTER(?class != owl:NamedIndividual)\n\
             \x20   BIND({iri} AS ?food)\n\
             }}\n",
            prologue = self.prologue(),
        )
    }

    /// Images of one entity, in store order
    pub fn images(&self, iri: &EntityIri) -> String {
        format!(
            "{prologue}SELECT ?image ?imagePath ?filename ?width ?height WHERE {{\n\
             \x20   {iri} :hasImage ?image .\n\
             \x20   ?image :imagePath ?imagePath .\n\
             \x20   OPTIONAL {{ ?image :filename ?filename }}\n\
             \x20   OPTIONAL {{ ?image :width ?width }}\n\
             \x20   OPTIONAL {{ ?image :height ?height }}\n\
             }}\n",
            prologue = self.prologue(),
        )
    }

    /// Ingredient names of one entity, alphabetical
    pub fn ingredients(&self, iri: &EntityIri) -> String {
        format!(
            "{prologue}SELECT ?ingredientName WHERE {{\n\
             \x20   {iri} :contains ?ingredient .\n\
             \x20   ?ingredient :name ?ingredientName .\n\
             }}\n\
             ORDER BY ?ingredientName\n",
            prologue = self.prologue(),
        )
    }

    /// Distinct values of one categorical attribute, ascending
    pub fn distinct_facet_values(&self, params: &FacetParams) -> String {
        format!(
            "{prologue}SELECT DISTINCT ?value WHERE {{\n\
             \x20   ?food :{predicate} ?value .\n\
             }}\n\
             ORDER BY ?value\n",
            prologue = self.prologue(),
            predicate = params.predicate,
        )
    }

    /// Local names of the labelled subclasses of `:Food`, by label
    pub fn food_classes(&self) -> String {
        format!(
            "{prologue}SELECT DISTINCT ?className ?classLabel WHERE {{\n\
             \x20   ?class a owl:Class ;\n\
             \x20          rdfs:label ?classLabel ;\n\
             \x20          rdfs:subClassOf* :Food .\n\
             \x20   FILTER(?class != :Food)\n\
             \x20   FILTER(STRSTARTS(STR(?class), {ns}))\n\
             \x20   BIND(STRAFTER(STR(?class), {ns}) AS ?className)\n\
             }}\n\
             ORDER BY ?classLabel\n",
            prologue = self.prologue(),
            ns = quote_literal(&self.namespace),
        )
    }

    /// Names of all food groups, ascending
    pub fn food_groups(&self) -> String {
        format!(
            "{prologue}SELECT DISTINCT ?groupName WHERE {{\n\
             \x20   ?group a :FoodGroup ;\n\
             \x20          :name ?groupName .\n\
             }}\n\
             ORDER BY ?groupName\n",
            prologue = self.prologue(),
        )
    }
}

fn select_vars(attributes: &[&str]) -> String {
    attributes
        .iter()
        .map(|a| format!("?{a}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn optional_block(subject: &str, attributes: &[&str]) -> String {
    attributes
        .iter()
        .map(|a| format!("    OPTIONAL {{ {subject} :{a} ?{a} }}\n"))
        .collect()
}

/// Render a string as a double-quoted SPARQL literal
pub(crate) fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Fixed-point decimal, independent of locale, never in exponent form
fn format_decimal(field: &str, value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(NutriGraphError::InvalidCriteria(format!(
            "{field} bound must be a finite number"
        )));
    }
    Ok(format!("{value:.6}"))
}
