//! Plain-text rendering of search results

use crate::cocktaildb::types::{Drink, IngredientSlot};

const GLYPH: &str = "🍸";
const RULE: &str = "-----------------";
const MISSING: &str = "Unknown";

/// Render a single recipe
pub fn format_drink(drink: &Drink) -> String {
    let ingredients = drink
        .ingredient_slots()
        .map(|slot| format!("• {}", ingredient_line(slot)))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "{glyph} {name} {glyph}\n{rule}\nCategory: {category}\nGlass: {glass}\nAlcoholic: {alcoholic}\n\nIngredients:\n{ingredients}\n\nInstructions:\n{instructions}",
        glyph = GLYPH,
        name = or_missing(&drink.name),
        rule = RULE,
        category = or_missing(&drink.category),
        glass = or_missing(&drink.glass),
        alcoholic = or_missing(&drink.alcoholic),
        ingredients = ingredients,
        instructions = drink.instructions.as_deref().unwrap_or_default(),
    );

    text.trim().to_string()
}

/// Render every matching recipe under a summary line
pub fn format_search_results(query: &str, drinks: &[Drink]) -> String {
    let recipes = drinks
        .iter()
        .map(format_drink)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Found {} cocktail(s) matching \"{}\":\n\n{}",
        drinks.len(),
        query,
        recipes
    )
}

/// Message for a search that matched nothing
pub fn no_results_message(query: &str) -> String {
    format!(
        "No cocktails found matching \"{}\". Try a different search term.",
        query
    )
}

fn ingredient_line(slot: &IngredientSlot) -> String {
    let measure = slot.measure.as_deref().unwrap_or_default();
    format!("{} {}", measure, slot.ingredient).trim().to_string()
}

fn or_missing(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING)
}
