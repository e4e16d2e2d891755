//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod attribute;
pub mod completions;
pub mod config;
pub mod detail;
pub mod facets;
pub mod index;
pub mod search;

// Re-export argument types for use in mod.rs
pub use attribute::AttributeArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use detail::DetailArgs;
pub use facets::FacetsArgs;
pub use search::{AutocompleteArgs, SearchArgs};
