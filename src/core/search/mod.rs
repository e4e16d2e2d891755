//! Hybrid search over the graph store and the text index.
//!
//! # Architecture
//!
//! - **classifier**: picks a graph-only or hybrid plan from the criteria
//! - **fusion**: protein post-filter, parallel detail enrichment, sorting
//! - **pagination**: slices the final list and derives page metadata
//! - **orchestrator**: runs the whole pipeline per request

mod classifier;
mod fusion;
mod orchestrator;
mod pagination;

pub use classifier::{classify, validate_criteria, ProteinRange, SearchPlan};
pub use fusion::{retain_protein, sort_entities, Enricher};
pub use orchestrator::SearchOrchestrator;
pub use pagination::paginate;
