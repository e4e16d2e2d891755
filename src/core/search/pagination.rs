//! In-memory pagination of a fully materialized result list.

use crate::core::types::{Entity, SearchResultPage};

/// Slice one page out of `entities`.
///
/// A page past the end yields an empty slice with the true totals.
pub fn paginate(entities: Vec<Entity>, page: usize, size: usize) -> SearchResultPage {
    let total = entities.len();
    let start = page.saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);

    let content: Vec<Entity> = entities.into_iter().skip(start).take(end - start).collect();

    SearchResultPage::new(content, total, page, size)
}
