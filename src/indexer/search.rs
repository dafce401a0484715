use crate::indexer::recipe::{normalize, Recipe};
use crate::indexer::similarity::closest_match;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Similarity cutoff used when none is configured
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub fuzzy: bool,
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            fuzzy: true,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl MatchConfig {
    pub fn exact() -> Self {
        Self {
            fuzzy: false,
            ..Self::default()
        }
    }
}

/// Ingredient query terms: a single ingredient or a list of them
pub trait IngredientTerms {
    /// Normalized, non-blank terms
    fn into_terms(self) -> BTreeSet<String>;
}

fn collect_terms<S: AsRef<str>>(terms: impl IntoIterator<Item = S>) -> BTreeSet<String> {
    terms
        .into_iter()
        .map(|term| normalize(term.as_ref()))
        .filter(|term| !term.is_empty())
        .collect()
}

impl IngredientTerms for &str {
    fn into_terms(self) -> BTreeSet<String> {
        collect_terms([self])
    }
}

impl IngredientTerms for &String {
    fn into_terms(self) -> BTreeSet<String> {
        collect_terms([self])
    }
}

impl<S: AsRef<str>> IngredientTerms for &[S] {
    fn into_terms(self) -> BTreeSet<String> {
        collect_terms(self)
    }
}

impl<S: AsRef<str>> IngredientTerms for Vec<S> {
    fn into_terms(self) -> BTreeSet<String> {
        collect_terms(self)
    }
}

impl<S: AsRef<str>, const N: usize> IngredientTerms for [S; N] {
    fn into_terms(self) -> BTreeSet<String> {
        collect_terms(self)
    }
}

/// In-memory recipe collection with a case-insensitive name/alias lookup.
///
/// Records are owned by `recipes`; `keys` maps every normalized name or alias
/// to the positions of the records registered under it, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: Vec<Recipe>,
    keys: BTreeMap<String, Vec<usize>>,
    config: MatchConfig,
}

impl RecipeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Add a recipe and register its name and aliases as lookup keys.
    /// Records sharing a key accumulate under it.
    pub fn insert(&mut self, recipe: Recipe) {
        let position = self.recipes.len();
        debug!("Indexing recipe #{}: {}", position, recipe.name);

        for key in recipe.lookup_keys() {
            let entries = self.keys.entry(key).or_default();
            if !entries.contains(&position) {
                entries.push(position);
            }
        }

        self.recipes.push(recipe);
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Look up recipes by name or alias, falling back to the closest key
    /// when fuzzy matching is enabled
    pub fn find_by_name(&self, query: &str) -> Vec<&Recipe> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        if let Some(positions) = self.keys.get(&query) {
            return self.resolve(positions);
        }

        if !self.config.fuzzy {
            return Vec::new();
        }

        let candidates = self.keys.keys().map(String::as_str);
        match closest_match(&query, candidates, self.config.threshold) {
            Some(key) => {
                debug!("Fuzzy name match: '{}' -> '{}'", query, key);
                self.keys
                    .get(key)
                    .map(|positions| self.resolve(positions))
                    .unwrap_or_default()
            }
            None => Vec::new(),
        }
    }

    /// First recipe registered under a name or alias
    pub fn get_recipe_by_name(&self, query: &str) -> Option<&Recipe> {
        self.find_by_name(query).into_iter().next()
    }

    /// Recipes containing every queried ingredient
    pub fn search_by_ingredient(&self, query: impl IngredientTerms) -> Vec<&Recipe> {
        let terms = query.into_terms();
        if terms.is_empty() {
            return Vec::new();
        }

        self.recipes
            .iter()
            .filter(|recipe| terms.iter().all(|term| recipe.has_ingredient(term)))
            .collect()
    }

    /// Recipes of a cuisine, falling back to the closest cuisine label when
    /// fuzzy matching is enabled
    pub fn search_by_cuisine(&self, query: &str) -> Vec<&Recipe> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let exact = self.with_cuisine(&query);
        if !exact.is_empty() || !self.config.fuzzy {
            return exact;
        }

        let cuisines: BTreeSet<String> = self
            .recipes
            .iter()
            .map(|recipe| normalize(&recipe.cuisine))
            .collect();

        match closest_match(&query, cuisines.iter().map(String::as_str), self.config.threshold) {
            Some(cuisine) => {
                debug!("Fuzzy cuisine match: '{}' -> '{}'", query, cuisine);
                self.with_cuisine(cuisine)
            }
            None => Vec::new(),
        }
    }

    /// Union of exact name/alias, single ingredient and exact cuisine
    /// matches, each record listed once in insertion order
    pub fn general_search(&self, query: &str) -> Vec<&Recipe> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut positions: BTreeSet<usize> = self
            .keys
            .get(&query)
            .map(|found| found.iter().copied().collect())
            .unwrap_or_default();

        for (position, recipe) in self.recipes.iter().enumerate() {
            if recipe.has_ingredient(&query) || normalize(&recipe.cuisine) == query {
                positions.insert(position);
            }
        }

        positions
            .into_iter()
            .map(|position| &self.recipes[position])
            .collect()
    }

    fn with_cuisine(&self, cuisine: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| normalize(&recipe.cuisine) == cuisine)
            .collect()
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&Recipe> {
        positions
            .iter()
            .filter_map(|&position| self.recipes.get(position))
            .collect()
    }
}

impl fmt::Display for RecipeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recipes.is_empty() {
            return write!(f, "No recipes available.");
        }

        for (position, recipe) in self.recipes.iter().enumerate() {
            if position > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{recipe}")?;
        }

        Ok(())
    }
}
