use crate::error::{Error, Result};
use crate::indexer::{normalize, MatchConfig, Recipe, RecipeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

const EMBEDDED_CATALOG: &str = include_str!("../../data/recipes.yaml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCatalog {
    pub version: u32,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Load a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read recipe catalog from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::parse(&content).map_err(|e| {
            Error::Config(format!(
                "Invalid recipe catalog {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Parse and validate catalog YAML
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: RecipeCatalog = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_CATALOG)
    }

    /// Load from `path` when given, otherwise the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::embedded()?,
        };

        info!("Loaded recipe catalog: {} recipes", catalog.recipes.len());
        Ok(catalog)
    }

    /// Validate the entire catalog
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported catalog version: {}. Expected version 1",
                self.version
            )));
        }

        let mut seen = HashSet::new();
        for (index, recipe) in self.recipes.iter().enumerate() {
            Self::validate_recipe(recipe).map_err(|e| {
                Error::Config(format!("Recipe #{} ({}): {}", index + 1, recipe.name, e))
            })?;

            if !seen.insert(normalize(&recipe.name)) {
                return Err(Error::Config(format!(
                    "Duplicate recipe name: {}",
                    recipe.name
                )));
            }
        }

        Ok(())
    }

    fn validate_recipe(recipe: &Recipe) -> Result<()> {
        if recipe.name.trim().is_empty() {
            return Err(Error::Config("Recipe name cannot be empty".to_string()));
        }

        if recipe.cuisine.trim().is_empty() {
            return Err(Error::Config("Recipe cuisine cannot be empty".to_string()));
        }

        if recipe.ingredients.iter().any(|i| i.trim().is_empty()) {
            return Err(Error::Config(
                "Recipe ingredients cannot be blank".to_string(),
            ));
        }

        Ok(())
    }
}

/// Build a populated index from a catalog, inserting records in catalog order
pub fn build_index(catalog: &RecipeCatalog, config: MatchConfig) -> RecipeIndex {
    let mut index = RecipeIndex::with_config(config);
    for recipe in &catalog.recipes {
        index.insert(recipe.clone());
    }
    index
}
