// Command-line interface and interactive loops

pub mod commands;
pub mod grades;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finder")]
#[command(about = "Recipe Finder - look up recipes by name, ingredient or cuisine", long_about = None)]
pub struct Cli {
    /// YAML recipe catalog (defaults to the built-in catalog)
    #[arg(long, global = true, env = "FINDER_CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    /// Disable fuzzy name and cuisine matching
    #[arg(long, global = true)]
    pub no_fuzzy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive recipe search
    Repl,

    /// Run a single search and print the results
    Search {
        /// Search query
        query: String,

        /// Which field to search
        #[arg(long, value_enum, default_value_t = SearchMode::Any)]
        by: SearchMode,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every recipe in the catalog
    List {
        /// Print recipes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the highest reading and geometric mean of water-quality data
    Water {
        /// YAML file of readings (defaults to the built-in dataset)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Start the interactive grade tracker
    Grades,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Names, aliases, ingredients and cuisines
    Any,
    Name,
    Ingredient,
    Cuisine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["finder", "--no-fuzzy", "search", "eggs", "--by", "ingredient"]);
        assert!(cli.no_fuzzy);
        match cli.command {
            Commands::Search { query, by, json } => {
                assert_eq!(query, "eggs");
                assert_eq!(by, SearchMode::Ingredient);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
