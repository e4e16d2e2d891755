//! NutriGraph - Hybrid search over a food knowledge graph
//!
//! Answers catalogue searches by combining a SPARQL graph store, which is
//! authoritative for entity attributes, with a Tantivy full-text index,
//! which ranks free-text matches.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - graph (query templates, row mapping, SPARQL HTTP client)
//!   - text (text index contract, Tantivy implementation)
//!   - search (intent classification, enrichment, pagination)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Graph-only or hybrid retrieval chosen per request
//! - Injection-safe query templates over typed parameters
//! - Parallel detail enrichment that keeps text relevance scores
//! - Degraded empty pages instead of errors when a backend is down

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{NutriGraphError, Result};
pub use core::search::SearchOrchestrator;
pub use core::services::Services;
pub use core::types::*;
