//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Relative time formatting (just now, minutes ago, hours ago, days ago)
//! - Nutrient amounts and entity summaries
//! - Print helpers (print_page, print_success, print_warning, print_error)

use chrono::{Duration, Utc};
use nutrigraph::cli::output::{
    entity_summary, format_amount, format_duration, format_relative_time, print_error,
    print_page, print_success, print_warning,
};
use nutrigraph::core::search::paginate;
use nutrigraph::core::types::{Entity, SearchResultPage};

// =============================================================================
// format_duration tests
// =============================================================================

#[test]
fn test_format_duration_ranges() {
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(2.0), "2.00s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

// =============================================================================
// format_relative_time tests
// =============================================================================

#[test]
fn test_format_relative_time() {
    let now = Utc::now();
    assert_eq!(format_relative_time(&now), "just now");
    assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
    assert_eq!(format_relative_time(&(now - Duration::hours(3))), "3h ago");
    assert_eq!(format_relative_time(&(now - Duration::days(2))), "2d ago");
}

// =============================================================================
// entity formatting tests
// =============================================================================

#[test]
fn test_format_amount_units() {
    assert_eq!(format_amount(Some(0.0), "g"), "0g");
    assert_eq!(format_amount(Some(7.5), " mg"), "7.5 mg");
    assert_eq!(format_amount(None, " kcal"), "-");
}

#[test]
fn test_entity_summary_without_class() {
    let mut entity = Entity::new("urn:food:2", "Injera");
    entity.nutrition.calories = Some(160.0);
    entity.nutrition.protein = Some(6.0);

    assert_eq!(entity_summary(&entity), "160 kcal, 6g protein");
}

// =============================================================================
// print helper smoke tests
// =============================================================================

#[test]
fn test_print_helpers_do_not_panic() {
    let entities = (0..3)
        .map(|i| {
            let mut e = Entity::new(format!("urn:food:{i}"), format!("Food {i}"));
            e.relevance_score = Some(1.0 / (i + 1) as f32);
            e
        })
        .collect();

    print_page(&paginate(entities, 0, 2));
    print_page(&SearchResultPage::empty(20));
    print_success("done");
    print_warning("careful");
    print_error("failed");
}
