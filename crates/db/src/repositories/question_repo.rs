//! Repository for the `questions` table.

use sqlx::{QueryBuilder, Sqlite};
use trifold_core::quiz::QuizFilter;
use trifold_core::types::DbId;

use crate::models::question::{NewQuestion, Question};
use crate::repositories::retain_matching;
use crate::{DbConn, DbPool};

const COLUMNS: &str = "id, question, answer, category, difficulty";

/// Provides question CRUD, search and quiz selection.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question, returning the created row.
    pub async fn create(conn: &mut DbConn, input: &NewQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.category)
            .bind(input.difficulty)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = ?");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every question in id order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// Questions of one category in id order.
    pub async fn list_by_category(
        pool: &DbPool,
        category_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE category = ? ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on the question text.
    pub async fn search(pool: &DbPool, term: &str) -> Result<Vec<Question>, sqlx::Error> {
        let mut questions = Self::list(pool).await?;
        retain_matching(&mut questions, term, |q| q.question.as_str());
        Ok(questions)
    }

    /// First question in id order that matches the quiz filter, if any.
    pub async fn next_for_quiz(
        pool: &DbPool,
        filter: &QuizFilter,
    ) -> Result<Option<Question>, sqlx::Error> {
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM questions WHERE 1 = 1"));

        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category);
        }

        if !filter.exclude.is_empty() {
            builder.push(" AND id NOT IN (");
            let mut ids = builder.separated(", ");
            for id in &filter.exclude {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }

        builder.push(" ORDER BY id LIMIT 1");

        builder
            .build_query_as::<Question>()
            .fetch_optional(pool)
            .await
    }

    /// Delete a question by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut DbConn, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of questions.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await
    }
}
