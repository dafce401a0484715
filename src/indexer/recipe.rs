use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown when a recipe carries no instructions
pub const NO_INSTRUCTIONS: &str = "Instructions not available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub cuisine: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
        cuisine: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            cuisine: cuisine.into(),
            aliases: Vec::new(),
            instructions: None,
        }
    }

    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    /// Instructions text, or the fixed placeholder when absent
    pub fn instructions_or_default(&self) -> &str {
        self.instructions.as_deref().unwrap_or(NO_INSTRUCTIONS)
    }

    /// Normalized lookup keys: the name followed by every non-blank alias
    pub fn lookup_keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|key| normalize(key))
            .filter(|key| !key.is_empty())
    }

    /// Whether the recipe lists `ingredient` (already normalized)
    pub fn has_ingredient(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| normalize(i) == ingredient)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipe: {}", self.name)?;
        writeln!(f, "Cuisine: {}", self.cuisine)?;
        writeln!(f, "Ingredients: {}", self.ingredients.join(", "))?;
        writeln!(f, "Instructions:")?;
        write!(f, "{}", self.instructions_or_default().trim_end())
    }
}

/// Case-fold and trim a string before it is used as a lookup key
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Render a recipe as a multi-line text block
pub fn format_recipe(recipe: &Recipe) -> String {
    recipe.to_string()
}

/// One-line listing used when showing every recipe
pub fn format_summary(recipe: &Recipe) -> String {
    format!("- {} ({})", recipe.name, recipe.cuisine)
}
