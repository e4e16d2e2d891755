//! SPARQL 1.1 protocol client.
//!
//! Queries are POSTed form-encoded (`query=...`) and answered in the
//! SPARQL 1.1 JSON results format.

use super::{GraphStore, Row, Term};
use crate::core::error::{NutriGraphError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// Graph store reached over HTTP (Apache Jena Fuseki or compatible)
pub struct SparqlHttpStore {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl SparqlHttpStore {
    /// Create a client for a query endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NutriGraphError::graph_unavailable(format!("client setup failed: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl GraphStore for SparqlHttpStore {
    fn query(&self, sparql: &str) -> Result<Vec<Row>> {
        tracing::debug!("SPARQL query to {} ({} bytes)", self.endpoint, sparql.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, RESULTS_JSON)
            .form(&[("query", sparql)])
            .send()
            .map_err(|e| NutriGraphError::graph_unavailable(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().unwrap_or_default();
            return Err(NutriGraphError::graph_unavailable(format!(
                "HTTP {status}: {}",
                body_text.trim()
            )));
        }

        let body = response
            .text()
            .map_err(|e| NutriGraphError::graph_unavailable(format!("reading response failed: {e}")))?;

        decode_results(&body)
    }
}

#[derive(Deserialize)]
struct ResultsDocument {
    results: ResultsBody,
}

#[derive(Deserialize)]
struct ResultsBody {
    #[serde(default)]
    bindings: Vec<HashMap<String, BindingValue>>,
}

#[derive(Deserialize)]
struct BindingValue {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    datatype: Option<String>,
    #[serde(rename = "xml:lang", default)]
    lang: Option<String>,
}

impl From<BindingValue> for Term {
    fn from(b: BindingValue) -> Self {
        match b.kind.as_str() {
            "uri" => Term::Iri(b.value),
            "bnode" => Term::Blank(b.value),
            _ => Term::Literal {
                value: b.value,
                datatype: b.datatype,
                lang: b.lang,
            },
        }
    }
}

/// Decode a SPARQL JSON results document into rows
pub fn decode_results(body: &str) -> Result<Vec<Row>> {
    let document: ResultsDocument = serde_json::from_str(body).map_err(|e| {
        NutriGraphError::graph_unavailable(format!("malformed SPARQL results: {e}"))
    })?;

    Ok(document
        .results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .map(|(var, value)| (var, Term::from(value)))
                .collect::<Row>()
        })
        .collect())
}
