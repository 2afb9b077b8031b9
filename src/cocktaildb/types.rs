//! CocktailDB API type definitions
//!
//! The upstream API names ingredient slots by concatenated index
//! (`strIngredient1`..`strIngredient15`). They are decoded here into a
//! fixed-size array so the rest of the crate never touches those keys.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::cocktaildb::INGREDIENT_SLOTS;

/// Search response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching drinks; `null` or missing when nothing matched
    #[serde(default)]
    pub drinks: Option<Vec<Drink>>,
}

impl SearchResponse {
    /// Matching drinks, or `None` when the API reported no match
    pub fn into_drinks(self) -> Option<Vec<Drink>> {
        self.drinks
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSlot {
    /// Trimmed measurement, if the record carries one
    pub measure: Option<String>,

    /// Ingredient name as sent by the API
    pub ingredient: String,
}

/// A cocktail recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub name: Option<String>,
    pub category: Option<String>,
    pub glass: Option<String>,
    pub alcoholic: Option<String>,
    pub instructions: Option<String>,

    /// Slot `i` holds `strIngredient{i + 1}` / `strMeasure{i + 1}`
    pub ingredients: [Option<IngredientSlot>; INGREDIENT_SLOTS],
}

impl Drink {
    /// Populated ingredient slots in ascending slot order
    pub fn ingredient_slots(&self) -> impl Iterator<Item = &IngredientSlot> {
        self.ingredients.iter().flatten()
    }
}

#[derive(Deserialize)]
struct RawDrink {
    #[serde(rename = "strDrink")]
    name: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strGlass")]
    glass: Option<String>,
    #[serde(rename = "strAlcoholic")]
    alcoholic: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl From<RawDrink> for Drink {
    fn from(mut raw: RawDrink) -> Self {
        let ingredients = std::array::from_fn(|i| {
            let slot = i + 1;
            let ingredient = slot_text(raw.rest.remove(&format!("strIngredient{}", slot)))?;
            let measure = slot_text(raw.rest.remove(&format!("strMeasure{}", slot)))
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty());
            Some(IngredientSlot {
                measure,
                ingredient,
            })
        });

        Self {
            name: raw.name,
            category: raw.category,
            glass: raw.glass,
            alcoholic: raw.alcoholic,
            instructions: raw.instructions,
            ingredients,
        }
    }
}

impl<'de> Deserialize<'de> for Drink {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawDrink::deserialize(deserializer).map(Drink::from)
    }
}

/// Text of a slot value; null, `""`, `false` and `0` count as absent
fn slot_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
