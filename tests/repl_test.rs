// Scripted sessions against the interactive recipe search
use finder::cli::commands::Repl;
use finder::{build_index, MatchConfig, RecipeCatalog, RecipeIndex};
use std::io::Cursor;

const CATALOG: &str = r#"
version: 1
recipes:
  - name: Tacos
    cuisine: Mexican
    ingredients: [tortilla, beef, cheese]
    aliases: [taco]
  - name: Breakfast Tacos
    cuisine: Mexican
    ingredients: [tortilla, bacon, eggs, cheese]
    aliases: [taco, breakfast]
    instructions: "Scramble the eggs and fill the tortillas."
  - name: Pancakes
    cuisine: American
    ingredients: [flour, milk, eggs, butter]
    aliases: [pancake]
"#;

fn catalog_index() -> RecipeIndex {
    let catalog = RecipeCatalog::parse(CATALOG).expect("test catalog is valid");
    build_index(&catalog, MatchConfig::default())
}

fn run_session(index: &mut RecipeIndex, script: &str) -> String {
    let mut output = Vec::new();
    Repl::new(index, Cursor::new(script.to_string()), &mut output)
        .run()
        .expect("session runs");
    String::from_utf8(output).expect("output is utf-8")
}

#[test]
fn test_name_query_lists_shared_alias() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "name: TACO\ntacos\nbreakfast tacos\nback\nexit\n");

    assert!(output.contains("Recipes Found:\n\n- Tacos (Mexican)\n- Breakfast Tacos (Mexican)\n"));
    assert!(output.contains("Recipe Details:\n\nRecipe: Tacos\nCuisine: Mexican\nIngredients: tortilla, beef, cheese\nInstructions:\nInstructions not available"));
    assert!(output.contains("Recipe: Breakfast Tacos"));
    assert!(output.contains("Scramble the eggs and fill the tortillas."));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn test_ingredient_query_uses_all_terms() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "ingredient: eggs and tortilla\n");

    assert!(output.contains("- Breakfast Tacos (Mexican)"));
    assert!(!output.contains("- Pancakes (American)"));
    assert!(!output.contains("- Tacos (Mexican)"));
    // full records only appear once picked by name
    assert!(!output.contains("Recipe: Breakfast Tacos"));
}

#[test]
fn test_detail_step_picks_records_until_back() {
    let mut index = catalog_index();
    let script = "cuisine: american\nwaffles\npancake\nBACK\nall\nexit\n";
    let output = run_session(&mut index, script);

    assert!(output.contains("- Pancakes (American)\n\nType the name of a recipe to view its details or 'back' to perform another search."));
    assert!(output.contains("Recipe not found. Please try again or type 'back' to search again."));
    assert!(output.contains("Recipe Details:\n\nRecipe: Pancakes\nCuisine: American"));
    assert!(output.contains("All Recipes:"));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn test_trailing_and_in_ingredient_query() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "ingredient: bacon and\nback\nexit\n");

    assert!(output.contains("- Breakfast Tacos (Mexican)"));
    assert!(!output.contains("No recipes found."));
}

#[test]
fn test_no_results_and_invalid_type() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "cuisine: thai\ncolour: red\nname:\nexit\n");

    assert!(output.contains("No recipes found."));
    assert!(output.contains("Invalid search type. Use 'name', 'ingredient', or 'cuisine'."));
    assert!(output.contains("Missing search text. Use 'name:<query>'."));
}

#[test]
fn test_all_lists_summaries() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "all\n");

    assert!(output.contains(
        "All Recipes:\n\n- Tacos (Mexican)\n- Breakfast Tacos (Mexican)\n- Pancakes (American)\n"
    ));
}

#[test]
fn test_free_text_with_fuzzy_fallback() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "pancaks\nback\nexit\n");

    assert!(output.contains("- Pancakes (American)"));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn test_add_then_search() {
    let mut index = catalog_index();
    let script = "add\nGuacamole\navocado, onion, lime\nMexican\nguac\n\nname: guac\nguacamole\nback\nexit\n";
    let output = run_session(&mut index, script);

    assert!(output.contains("Recipe 'Guacamole' added successfully!"));
    assert!(output.contains("Recipe: Guacamole\nCuisine: Mexican\nIngredients: avocado, onion, lime"));
    assert_eq!(index.len(), 4);
    assert_eq!(index.search_by_cuisine("mexican").len(), 3);
}

#[test]
fn test_add_rejects_empty_and_duplicate_names() {
    let mut index = catalog_index();
    let output = run_session(&mut index, "add\n\nadd\npancakes\nexit\n");

    assert!(output.contains("Recipe name cannot be empty."));
    assert!(output.contains("A recipe named 'pancakes' already exists."));
    assert_eq!(index.len(), 3);
}

#[test]
fn test_end_of_input_stops_loop() {
    let mut index = RecipeIndex::new();
    let output = run_session(&mut index, "all\n");

    assert!(output.contains("No recipes available."));
    assert!(!output.contains("Goodbye!"));
}
