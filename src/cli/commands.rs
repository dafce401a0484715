use crate::cli::SearchMode;
use crate::indexer::{format_recipe, format_summary, normalize, Recipe, RecipeIndex};
use crate::stats::{geometric_mean, highest, ReadingSet};
use crate::utils::{split_list, split_terms};
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Exit,
    All,
    Add,
    Name(String),
    Ingredient(Vec<String>),
    Cuisine(String),
    General(String),
}

/// Parse one line of REPL input
pub fn parse_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }

    match line.to_lowercase().as_str() {
        "exit" => return Ok(ReplCommand::Exit),
        "all" => return Ok(ReplCommand::All),
        "add" => return Ok(ReplCommand::Add),
        _ => {}
    }

    let Some((kind, query)) = line.split_once(':') else {
        return Ok(ReplCommand::General(line.to_string()));
    };

    let query = query.trim();
    let kind = kind.trim().to_lowercase();
    if !matches!(kind.as_str(), "name" | "ingredient" | "cuisine") {
        return Err(Error::Validation(
            "Invalid search type. Use 'name', 'ingredient', or 'cuisine'.".to_string(),
        ));
    }
    if query.is_empty() {
        return Err(Error::Validation(format!(
            "Missing search text. Use '{kind}:<query>'."
        )));
    }

    Ok(match kind.as_str() {
        "name" => ReplCommand::Name(query.to_string()),
        "ingredient" => ReplCommand::Ingredient(split_terms(query)),
        _ => ReplCommand::Cuisine(query.to_string()),
    })
}

/// General search, then the fuzzy name and cuisine fallbacks
pub fn lookup_any<'a>(index: &'a RecipeIndex, query: &str) -> Vec<&'a Recipe> {
    let results = index.general_search(query);
    if !results.is_empty() {
        return results;
    }

    debug!("No exact match for '{}', trying fallbacks", query);
    let by_name = index.find_by_name(query);
    if !by_name.is_empty() {
        return by_name;
    }
    index.search_by_cuisine(query)
}

/// Run a query against one field of the index
pub fn run_query<'a>(index: &'a RecipeIndex, mode: SearchMode, query: &str) -> Vec<&'a Recipe> {
    match mode {
        SearchMode::Any => lookup_any(index, query),
        SearchMode::Name => index.find_by_name(query),
        SearchMode::Ingredient => index.search_by_ingredient(split_terms(query)),
        SearchMode::Cuisine => index.search_by_cuisine(query),
    }
}

/// Search once and print the results
pub fn search<W: Write>(
    index: &RecipeIndex,
    query: &str,
    mode: SearchMode,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let results = run_query(index, mode, query);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    } else {
        print_results(out, &results)?;
    }

    Ok(())
}

/// Print every recipe in the index
pub fn list<W: Write>(index: &RecipeIndex, json: bool, out: &mut W) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(index.recipes())?)?;
        return Ok(());
    }

    print_summaries(out, index)
}

/// Print the highest reading and the geometric mean of a reading set
pub fn water_report<W: Write>(set: &ReadingSet, out: &mut W) -> Result<()> {
    let (Some(top), Some(mean)) = (highest(&set.readings), geometric_mean(&set.readings)) else {
        writeln!(out, "No usable readings available.")?;
        return Ok(());
    };

    writeln!(
        out,
        "The highest value of {} was found at {}.",
        top.value, top.site
    )?;
    writeln!(out, "The geometric average is {mean:.2}.")?;
    Ok(())
}

fn print_results<W: Write>(out: &mut W, results: &[&Recipe]) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "\nNo recipes found.\n")?;
        return Ok(());
    }

    writeln!(out, "\nRecipes Found:\n")?;
    for recipe in results {
        writeln!(out, "{}\n", format_recipe(recipe))?;
    }
    Ok(())
}

/// Summary lines for REPL results, followed by the detail hint
fn print_matches<W: Write>(out: &mut W, results: &[&Recipe]) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "\nNo recipes found.\n")?;
        return Ok(());
    }

    writeln!(out, "\nRecipes Found:\n")?;
    for recipe in results {
        writeln!(out, "{}", format_summary(recipe))?;
    }
    writeln!(
        out,
        "\nType the name of a recipe to view its details or 'back' to perform another search.\n"
    )?;
    Ok(())
}

fn print_summaries<W: Write>(out: &mut W, index: &RecipeIndex) -> Result<()> {
    if index.is_empty() {
        writeln!(out, "No recipes available.")?;
        return Ok(());
    }

    writeln!(out, "\nAll Recipes:\n")?;
    for recipe in index.recipes() {
        writeln!(out, "{}", format_summary(recipe))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Interactive recipe search over any line source
pub struct Repl<'a, R, W> {
    index: &'a mut RecipeIndex,
    input: R,
    output: W,
    prompt: String,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(index: &'a mut RecipeIndex, input: R, output: W) -> Self {
        Self {
            index,
            input,
            output,
            prompt: "Search: ".to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Read commands until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        loop {
            let Some(line) = self.ask(&self.prompt.clone())? else {
                writeln!(self.output)?;
                break;
            };

            match parse_command(&line) {
                Ok(ReplCommand::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                Ok(command) => self.execute(command)?,
                Err(e) => {
                    let Some(message) = e.user_message().map(str::to_string) else {
                        return Err(e);
                    };
                    warn!("Rejected input '{}': {}", line, message);
                    writeln!(self.output, "{message}")?;
                }
            }
        }

        Ok(())
    }

    fn print_banner(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the Recipe Finder!")?;
        writeln!(self.output, "Enter queries like:")?;
        writeln!(self.output, "- 'name: pancakes'")?;
        writeln!(self.output, "- 'ingredient: eggs and bacon'")?;
        writeln!(self.output, "- 'cuisine: Mexican'")?;
        writeln!(self.output, "- any other text to search everything")?;
        writeln!(
            self.output,
            "Type 'all' to list recipes, 'add' to add one, or 'exit' to quit.\n"
        )?;
        Ok(())
    }

    fn execute(&mut self, command: ReplCommand) -> Result<()> {
        let found = {
            let results = match command {
                ReplCommand::Empty | ReplCommand::Exit => return Ok(()),
                ReplCommand::All => return print_summaries(&mut self.output, self.index),
                ReplCommand::Add => return self.add_recipe(),
                ReplCommand::Name(query) => self.index.find_by_name(&query),
                ReplCommand::Ingredient(terms) => self.index.search_by_ingredient(terms),
                ReplCommand::Cuisine(query) => self.index.search_by_cuisine(&query),
                ReplCommand::General(query) => lookup_any(self.index, &query),
            };
            print_matches(&mut self.output, &results)?;
            !results.is_empty()
        };

        if found {
            self.show_details()?;
        }
        Ok(())
    }

    /// Show full records picked by name until the user types `back`
    fn show_details(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.ask("Enter recipe name: ")? else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case("back") {
                return Ok(());
            }

            match self.index.get_recipe_by_name(&choice) {
                Some(recipe) => {
                    writeln!(self.output, "\nRecipe Details:\n\n{}\n", format_recipe(recipe))?;
                    writeln!(self.output, "Type 'back' to perform another search.\n")?;
                }
                None => {
                    debug!("No recipe selected for '{}'", choice);
                    writeln!(
                        self.output,
                        "Recipe not found. Please try again or type 'back' to search again."
                    )?;
                }
            }
        }
    }

    fn add_recipe(&mut self) -> Result<()> {
        writeln!(self.output, "\nAdding a new recipe...")?;

        let Some(name) = self.ask("Recipe Name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            writeln!(self.output, "Recipe name cannot be empty.\n")?;
            return Ok(());
        }
        let key = normalize(&name);
        if self.index.recipes().iter().any(|r| normalize(&r.name) == key) {
            writeln!(self.output, "A recipe named '{name}' already exists.\n")?;
            return Ok(());
        }

        let Some(ingredients) = self.ask("Ingredients (comma-separated): ")? else {
            return Ok(());
        };
        let Some(cuisine) = self.ask("Cuisine: ")? else {
            return Ok(());
        };
        if cuisine.is_empty() {
            writeln!(self.output, "Cuisine cannot be empty.\n")?;
            return Ok(());
        }
        let Some(aliases) = self.ask("Aliases (comma-separated, optional): ")? else {
            return Ok(());
        };
        let Some(instructions) = self.ask("Instructions (optional): ")? else {
            return Ok(());
        };

        let recipe = Recipe::new(name.as_str(), split_list(&ingredients), cuisine)
            .with_aliases(split_list(&aliases))
            .with_instructions(instructions);
        self.index.insert(recipe);

        writeln!(self.output, "\nRecipe '{name}' added successfully!\n")?;
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::MatchConfig;
    use crate::stats::Reading;

    fn tacos_index() -> RecipeIndex {
        let mut index = RecipeIndex::with_config(MatchConfig::default());
        index.insert(
            Recipe::new("Tacos", ["tortilla", "beef", "cheese"], "Mexican").with_aliases(["taco"]),
        );
        index.insert(Recipe::new("Pancakes", ["flour", "eggs", "milk"], "American"));
        index
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("  EXIT ").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_command("All").unwrap(), ReplCommand::All);
        assert_eq!(parse_command("add").unwrap(), ReplCommand::Add);
        assert_eq!(parse_command("").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_typed_queries() {
        assert_eq!(
            parse_command("name: Pancakes").unwrap(),
            ReplCommand::Name("Pancakes".to_string())
        );
        assert_eq!(
            parse_command("Ingredient:eggs and bacon").unwrap(),
            ReplCommand::Ingredient(vec!["eggs".to_string(), "bacon".to_string()])
        );
        assert_eq!(
            parse_command("cuisine: mexican").unwrap(),
            ReplCommand::Cuisine("mexican".to_string())
        );
        assert_eq!(
            parse_command("tacos").unwrap(),
            ReplCommand::General("tacos".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = parse_command("colour: red").unwrap_err();
        assert!(err.user_message().unwrap().starts_with("Invalid search type"));

        let err = parse_command("name:   ").unwrap_err();
        assert_eq!(
            err.user_message(),
            Some("Missing search text. Use 'name:<query>'.")
        );
    }

    #[test]
    fn test_salt_is_not_a_listing_keyword() {
        assert_eq!(
            parse_command("salt").unwrap(),
            ReplCommand::General("salt".to_string())
        );
    }

    #[test]
    fn test_lookup_any_falls_back_to_fuzzy() {
        let index = tacos_index();
        assert_eq!(lookup_any(&index, "beef")[0].name, "Tacos");
        assert_eq!(lookup_any(&index, "pancaks")[0].name, "Pancakes");
        assert_eq!(lookup_any(&index, "amercan")[0].name, "Pancakes");
        assert!(lookup_any(&index, "xyzzyplugh").is_empty());
    }

    #[test]
    fn test_search_json_output() {
        let index = tacos_index();
        let mut out = Vec::new();
        search(&index, "mexican", SearchMode::Cuisine, true, &mut out).unwrap();

        let parsed: Vec<Recipe> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Tacos");
    }

    #[test]
    fn test_search_text_output() {
        let index = tacos_index();
        let mut out = Vec::new();
        search(&index, "rice", SearchMode::Ingredient, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nNo recipes found.\n\n");
    }

    #[test]
    fn test_list_summaries() {
        let index = tacos_index();
        let mut out = Vec::new();
        list(&index, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("- Tacos (Mexican)\n- Pancakes (American)\n"));
    }

    #[test]
    fn test_water_report() {
        let set = ReadingSet {
            readings: vec![
                Reading {
                    site: "Bay View".to_string(),
                    value: 2.0,
                },
                Reading {
                    site: "Camp Perry".to_string(),
                    value: 8.0,
                },
            ],
        };
        let mut out = Vec::new();
        water_report(&set, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The highest value of 8 was found at Camp Perry.\nThe geometric average is 4.00.\n"
        );
    }
}
