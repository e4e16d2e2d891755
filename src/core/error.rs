//! Error types and error handling for the NutriGraph search service.
//!
//! This module defines the error types used throughout the
//! application. Failures are classified so the search pipeline can
//! isolate them at the smallest unit (field, row, collaborator call)
//! before escalating.

use thiserror::Error;

/// Result type alias for NutriGraph operations
pub type Result<T> = std::result::Result<T, NutriGraphError>;

/// Main error type for the NutriGraph service
#[derive(Error, Debug)]
pub enum NutriGraphError {
    /// The graph store or the text index could not be reached or
    /// answered with an error.
    #[error("{collaborator} unavailable: {message}")]
    CollaboratorUnavailable {
        collaborator: &'static str,
        message: String,
    },

    /// A parameter that would be rendered as a bare identifier (class id,
    /// facet predicate, entity IRI) failed the safety check.
    #[error("Invalid identifier parameter: {0}")]
    InvalidIdentifierParameter(String),

    /// A literal could not be parsed as the expected type.
    #[error("Cannot convert field '{field}': {message}")]
    ConversionError { field: String, message: String },

    /// Detail lookup returned nothing for an identifier we already hold.
    #[error("No detail found for entity: {0}")]
    EnrichmentMiss(String),

    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    #[error("Text index error: {0}")]
    IndexError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl NutriGraphError {
    /// Shorthand for a graph store failure
    pub fn graph_unavailable(message: impl Into<String>) -> Self {
        NutriGraphError::CollaboratorUnavailable {
            collaborator: "graph store",
            message: message.into(),
        }
    }

    /// Shorthand for a text index failure
    pub fn text_index_unavailable(message: impl Into<String>) -> Self {
        NutriGraphError::CollaboratorUnavailable {
            collaborator: "text index",
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, NutriGraphError::EnrichmentMiss(_))
    }

    /// Check if this is a bad request error (caller contract violation)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            NutriGraphError::InvalidIdentifierParameter(_)
                | NutriGraphError::InvalidCriteria(_)
                | NutriGraphError::ConfigError(_)
        )
    }

    /// Check if this failure came from an external collaborator and may be
    /// degraded locally instead of surfaced.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            NutriGraphError::CollaboratorUnavailable { .. } | NutriGraphError::IndexError(_)
        )
    }
}
