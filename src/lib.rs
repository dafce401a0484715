pub mod config;
pub mod error;

// Recipe index and lookup
pub mod indexer;

// Companion tools
pub mod stats;

// Command-line interface
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::catalog::{build_index, RecipeCatalog};
pub use config::Settings;
pub use error::{Error, Result};
pub use indexer::{MatchConfig, Recipe, RecipeIndex};
