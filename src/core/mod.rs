//! Core domain logic (adapter-agnostic)
//!
//! This module contains all search logic that is independent of the
//! command-line adapter.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **graph**: SPARQL query templates, row mapping, graph store client
//! - **text**: Text index contract and its Tantivy implementation
//! - **search**: Classification, enrichment, pagination, orchestration
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod graph;
pub mod search;
pub mod services;
pub mod text;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{NutriGraphError, Result};
pub use services::Services;
