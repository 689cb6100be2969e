//! Repository for the `drinks` table.

use trifold_core::recipe::Recipe;
use trifold_core::types::DbId;

use crate::models::drink::Drink;
use crate::{DbConn, DbPool};

const COLUMNS: &str = "id, title, recipe";

/// Provides CRUD operations for drinks.
pub struct DrinkRepo;

impl DrinkRepo {
    /// Insert a drink. Fails with a unique violation if the title is taken.
    pub async fn create(
        conn: &mut DbConn,
        title: &str,
        recipe: &Recipe,
    ) -> Result<Drink, sqlx::Error> {
        let query =
            format!("INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Drink>(&query)
            .bind(title)
            .bind(recipe.to_stored())
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Drink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drinks WHERE id = ?");
        sqlx::query_as::<_, Drink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every drink in id order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Drink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drinks ORDER BY id");
        sqlx::query_as::<_, Drink>(&query).fetch_all(pool).await
    }

    /// Update a drink. Only `Some` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut DbConn,
        id: DbId,
        title: Option<&str>,
        recipe: Option<&Recipe>,
    ) -> Result<Option<Drink>, sqlx::Error> {
        let query = format!(
            "UPDATE drinks SET
                title = COALESCE(?, title),
                recipe = COALESCE(?, recipe)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drink>(&query)
            .bind(title)
            .bind(recipe.map(Recipe::to_stored))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a drink by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut DbConn, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of drinks.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
            .fetch_one(pool)
            .await
    }
}
