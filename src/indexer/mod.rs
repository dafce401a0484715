// Recipe records, similarity scoring and the in-memory lookup index

pub mod recipe;
pub mod search;
pub mod similarity;

// Re-exports
pub use recipe::{format_recipe, format_summary, normalize, Recipe, NO_INSTRUCTIONS};
pub use search::{IngredientTerms, MatchConfig, RecipeIndex, DEFAULT_FUZZY_THRESHOLD};
pub use similarity::{closest_match, ratio};
