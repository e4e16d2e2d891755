//! Tests for the detail CLI command

use crate::common::{create_test_services, iri, FakeGraph, ScriptedTextIndex};
use nutrigraph::cli::commands::detail::{execute, DetailArgs};
use nutrigraph::cli::OutputFormat;
use std::sync::Arc;

fn services() -> Arc<nutrigraph::Services> {
    create_test_services(
        Arc::new(FakeGraph::sample()),
        Arc::new(ScriptedTextIndex::empty()),
    )
}

#[test]
fn test_detail_human() {
    let args = DetailArgs {
        uri: iri("Ful_Medames"),
    };
    let result = execute(args, &services(), OutputFormat::Human);
    assert!(result.is_ok(), "Detail should succeed: {:?}", result.err());
}

#[test]
fn test_detail_json() {
    let args = DetailArgs {
        uri: iri("Injera"),
    };
    assert!(execute(args, &services(), OutputFormat::Json).is_ok());
}

#[test]
fn test_detail_not_found() {
    let args = DetailArgs {
        uri: iri("Unknown_Food"),
    };
    let err = execute(args, &services(), OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_detail_invalid_identifier() {
    let args = DetailArgs {
        uri: "not an iri".to_string(),
    };
    assert!(execute(args, &services(), OutputFormat::Human).is_err());
}
