//! Drink recipes and their two public projections.
//!
//! A recipe is persisted as a JSON array of ingredients. The short
//! projection only names the ingredients; the long projection adds color and
//! parts and is reserved for callers holding `get:drinks-detail`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Ingredient as shown in the short projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe(pub Vec<Ingredient>);

impl Recipe {
    /// Parse a recipe from a request body value.
    ///
    /// Accepts either an array of ingredients or a single ingredient object.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let ingredients = match value {
            Value::Array(_) => serde_json::from_value::<Vec<Ingredient>>(value),
            Value::Object(_) => serde_json::from_value::<Ingredient>(value).map(|i| vec![i]),
            other => {
                return Err(CoreError::Unprocessable(format!(
                    "recipe must be an ingredient or a list of ingredients, got {other}"
                )))
            }
        }
        .map_err(|e| CoreError::Unprocessable(format!("invalid recipe: {e}")))?;

        if ingredients.is_empty() {
            return Err(CoreError::Unprocessable(
                "recipe must contain at least one ingredient".into(),
            ));
        }
        Ok(Self(ingredients))
    }

    /// Decode the stored column value.
    pub fn from_stored(stored: &str) -> Result<Self, CoreError> {
        serde_json::from_str::<Vec<Ingredient>>(stored)
            .map(Self)
            .map_err(|e| CoreError::Unprocessable(format!("stored recipe is corrupt: {e}")))
    }

    /// Encode for storage.
    pub fn to_stored(&self) -> String {
        // A Vec of plain structs with string/integer fields always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn short(&self) -> Vec<ShortIngredient> {
        self.0
            .iter()
            .map(|i| ShortIngredient {
                name: i.name.clone(),
            })
            .collect()
    }
}

/// Public drink listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full drink detail.
#[derive(Debug, Clone, Serialize)]
pub struct DrinkLong {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn single_object_becomes_one_element_list() {
        let recipe =
            Recipe::from_value(json!({"name": "water", "color": "blue", "parts": 1})).unwrap();
        assert_eq!(recipe.0.len(), 1);
        assert_eq!(recipe.0[0].name, "water");
    }

    #[test]
    fn short_projection_hides_color_and_parts() {
        let recipe = Recipe::from_value(json!([
            {"name": "espresso", "color": "brown", "parts": 1},
            {"name": "milk", "color": "white", "parts": 3}
        ]))
        .unwrap();
        let short = serde_json::to_value(recipe.short()).unwrap();
        assert_eq!(short, json!([{"name": "espresso"}, {"name": "milk"}]));
    }

    #[test]
    fn stored_form_round_trips() {
        let recipe =
            Recipe::from_value(json!([{"name": "tea", "color": "green", "parts": 2}])).unwrap();
        let stored = recipe.to_stored();
        assert_eq!(Recipe::from_stored(&stored).unwrap(), recipe);
    }

    #[test]
    fn rejects_scalars_missing_fields_and_empty_lists() {
        assert_matches!(
            Recipe::from_value(json!("coffee")),
            Err(CoreError::Unprocessable(_))
        );
        assert_matches!(
            Recipe::from_value(json!([{"name": "milk"}])),
            Err(CoreError::Unprocessable(_))
        );
        assert_matches!(Recipe::from_value(json!([])), Err(CoreError::Unprocessable(_)));
    }
}
