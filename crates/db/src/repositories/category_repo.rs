//! Repository for the `categories` table.

use trifold_core::types::DbId;

use crate::models::category::Category;
use crate::DbPool;

/// Read access to trivia categories. Categories are seeded by migration.
pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories in id order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
