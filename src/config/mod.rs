pub mod catalog;

use crate::error::{Error, Result};
use crate::indexer::{MatchConfig, DEFAULT_FUZZY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML seed catalog; the embedded catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub fuzzy: bool,
    pub fuzzy_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig { path: None },
            search: SearchConfig {
                fuzzy: true,
                fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            },
            repl: ReplConfig {
                prompt: "Search: ".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("FINDER_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let fuzzy = parse_bool(
            &std::env::var("FINDER_FUZZY").unwrap_or_else(|_| "true".to_string()),
        )
        .ok_or_else(|| Error::Config("Invalid FINDER_FUZZY value".to_string()))?;

        let fuzzy_threshold = std::env::var("FINDER_FUZZY_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_FUZZY_THRESHOLD.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FINDER_FUZZY_THRESHOLD value".to_string()))?;

        let prompt = std::env::var("FINDER_PROMPT").unwrap_or_else(|_| "Search: ".to_string());

        Ok(Settings {
            catalog: CatalogConfig { path },
            search: SearchConfig {
                fuzzy,
                fuzzy_threshold,
            },
            repl: ReplConfig { prompt },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.search.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "Fuzzy threshold must be between 0 and 1, got {threshold}"
            )));
        }

        Ok(())
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            fuzzy: self.search.fuzzy,
            threshold: self.search.fuzzy_threshold,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
