// Integration tests for facets, classes, groups, regional counts,
// autocomplete and reindexing

use crate::common::{create_test_services, FakeGraph, ScriptedTextIndex};
use nutrigraph::core::error::NutriGraphError;
use std::sync::Arc;

#[test]
fn test_distinct_facet_values() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let regions = services.search.list_distinct_facet_values("region").unwrap();
    assert_eq!(
        regions,
        vec!["East_Africa", "Levant", "North_Africa", "West_Africa"]
    );

    let spice = services
        .search
        .list_distinct_facet_values("spice_levels")
        .unwrap();
    assert_eq!(spice, vec!["Hot", "Medium", "Mild"]);

    let methods = services
        .search
        .list_distinct_facet_values("cookingMethod")
        .unwrap();
    assert_eq!(methods, vec!["Baked", "Boiled", "Fried", "Raw", "Simmered"]);
}

#[test]
fn test_unknown_facet_rejected_without_query() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph.clone(), Arc::new(ScriptedTextIndex::empty()));

    let result = services.search.list_distinct_facet_values("colour");
    assert!(matches!(
        result,
        Err(NutriGraphError::InvalidIdentifierParameter(_))
    ));
    assert_eq!(graph.calls(), 0);
}

#[test]
fn test_facet_failure_surfaces() {
    let graph = Arc::new(FakeGraph::unavailable());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let err = services
        .search
        .list_distinct_facet_values("region")
        .unwrap_err();
    assert!(err.is_collaborator_failure());
}

#[test]
fn test_food_classes_and_groups() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let classes = services.search.list_food_classes().unwrap();
    let ids: Vec<&str> = classes.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["Appetizer", "Flatbread", "RiceDish", "Salad", "Stew"]);

    let groups = services.search.list_food_groups().unwrap();
    assert_eq!(groups, vec!["Grains", "Legumes", "Meat", "Vegetables"]);
}

#[test]
fn test_regional_stats() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let stats = services.search.regional_stats().unwrap();

    assert_eq!(stats.total_regions, 4);
    assert_eq!(stats.regions.len(), 4);
    assert_eq!(stats.foods_by_region["East_Africa"], 2);
    assert_eq!(stats.foods_by_region["Levant"], 2);
    assert_eq!(stats.foods_by_region["North_Africa"], 2);
    assert_eq!(stats.foods_by_region["West_Africa"], 1);
}

#[test]
fn test_autocomplete() {
    let graph = Arc::new(FakeGraph::sample());
    let text = Arc::new(
        ScriptedTextIndex::empty().with_names(&["Shakshuka", "Shawarma", "Injera"]),
    );
    let services = create_test_services(graph.clone(), text.clone());

    assert_eq!(
        services.search.get_autocomplete("sh"),
        vec!["Shakshuka", "Shawarma"]
    );
    assert!(services.search.get_autocomplete("   ").is_empty());
    assert_eq!(text.autocomplete_calls(), 1, "Blank prefix makes no call");
    assert_eq!(graph.calls(), 0);
}

#[test]
fn test_autocomplete_failure_is_empty() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::unavailable()));

    assert!(services.search.get_autocomplete("inj").is_empty());
}

#[test]
fn test_reindex_loads_full_catalogue() {
    let graph = Arc::new(FakeGraph::sample());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let stats = services.search.reindex().unwrap();

    assert_eq!(stats.documents, 7);
    assert!(stats.last_rebuilt_at.is_some());
}

#[test]
fn test_reindex_refuses_empty_catalogue() {
    let graph = Arc::new(FakeGraph::new(Vec::new()));
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let result = services.search.reindex();
    assert!(matches!(result, Err(NutriGraphError::IndexError(_))));
}

#[test]
fn test_reindex_graph_failure_surfaces() {
    let graph = Arc::new(FakeGraph::unavailable());
    let services = create_test_services(graph, Arc::new(ScriptedTextIndex::empty()));

    let err = services.search.reindex().unwrap_err();
    assert!(err.is_collaborator_failure());
}
