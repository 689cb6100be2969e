//! Drink entity model.

use sqlx::FromRow;
use trifold_core::error::CoreError;
use trifold_core::recipe::{DrinkLong, DrinkShort, Recipe};
use trifold_core::types::DbId;

/// A row from the `drinks` table. `recipe` is the stored JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct Drink {
    pub id: DbId,
    pub title: String,
    pub recipe: String,
}

impl Drink {
    pub fn short(&self) -> Result<DrinkShort, CoreError> {
        let recipe = Recipe::from_stored(&self.recipe)?;
        Ok(DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: recipe.short(),
        })
    }

    pub fn long(&self) -> Result<DrinkLong, CoreError> {
        let recipe = Recipe::from_stored(&self.recipe)?;
        Ok(DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: recipe.0,
        })
    }
}
