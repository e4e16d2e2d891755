//! Graph store integration.
//!
//! The graph store is the source of truth for entity identifiers and
//! attributes. It is queried with SPARQL and answers with variable
//! binding rows.
//!
//! # Architecture
//!
//! - **GraphStore**: collaborator contract (one query in, rows out)
//! - **QueryBuilder**: fixed catalogue of parameterized query templates
//! - **mapping**: row to entity conversion with per-field isolation
//! - **SparqlHttpStore**: SPARQL 1.1 protocol client (Fuseki and friends)

mod mapping;
mod query;
mod sparql;

use crate::core::error::Result;
use std::collections::HashMap;

pub use mapping::{entity_from_row, image_from_row, literal_column, local_name};
pub use query::{
    AttributeParams, ClassParams, EntityIri, Facet, FacetParams, QueryBuilder, RangeParams,
    SafeIdentifier,
};
pub use sparql::{decode_results, SparqlHttpStore};

/// XSD datatype IRIs used by the catalogue
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// A single bound value
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Resource identifier
    Iri(String),

    /// Typed or language-tagged literal
    Literal {
        value: String,
        datatype: Option<String>,
        lang: Option<String>,
    },

    Blank(String),
}

impl Term {
    /// Plain literal without datatype
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Literal with an explicit datatype IRI
    pub fn typed(value: impl Into<String>, datatype: &str) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.to_string()),
            lang: None,
        }
    }

    /// Lexical form (IRI string for resources)
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Literal { value, .. } => value,
            Term::Blank(id) => id,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }
}

/// One solution of a query: variable name to bound term.
///
/// Optional bindings may simply be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(HashMap<String, Term>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, var: &str, term: Term) -> Self {
        self.0.insert(var.to_string(), term);
        self
    }

    pub fn insert(&mut self, var: impl Into<String>, term: Term) {
        self.0.insert(var.into(), term);
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.0.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Term)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Graph store collaborator.
///
/// Implementations execute one SPARQL SELECT query and return its rows in
/// store order. Transport and endpoint failures must be reported as
/// [`NutriGraphError::CollaboratorUnavailable`](crate::core::error::NutriGraphError).
pub trait GraphStore: Send + Sync {
    fn query(&self, sparql: &str) -> Result<Vec<Row>>;
}
