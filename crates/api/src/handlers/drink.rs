//! Handlers for the drink catalog.
//!
//! The public listing shows ingredient names only; every other endpoint is
//! gated by a permission from the caller's bearer token and returns the full
//! recipe.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trifold_core::error::CoreError;
use trifold_core::recipe::{DrinkLong, DrinkShort, Recipe};
use trifold_core::types::DbId;
use trifold_db::repositories::DrinkRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::permission::{
    Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks,
};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Drink", id })
}

/// `{ "success": true, "drinks": [...] }`
#[derive(Debug, Serialize)]
pub struct DrinksResponse<T: Serialize> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T: Serialize> DrinksResponse<T> {
    fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkDeleted {
    pub success: bool,
    pub delete: DbId,
}

/// Create and patch body. `recipe` is an ingredient object or a list of them.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkBody {
    pub title: Option<String>,
    pub recipe: Option<Value>,
}

/// A non-null recipe value, parsed.
fn parse_recipe(value: Option<Value>) -> Result<Option<Recipe>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Recipe::from_value(v).map(Some),
    }
}

/// GET /drinks
pub async fn list_drinks(
    State(state): State<AppState>,
) -> AppResult<Json<DrinksResponse<DrinkShort>>> {
    let drinks = DrinkRepo::list(&state.pool)
        .await?
        .iter()
        .map(|d| d.short())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinksResponse::new(drinks)))
}

/// GET /drinks-detail
pub async fn list_drinks_detail(
    _auth: Authorized<GetDrinksDetail>,
    State(state): State<AppState>,
) -> AppResult<Json<DrinksResponse<DrinkLong>>> {
    let drinks = DrinkRepo::list(&state.pool)
        .await?
        .iter()
        .map(|d| d.long())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinksResponse::new(drinks)))
}

/// POST /drinks
///
/// Both `title` and `recipe` are required. A taken title fails on the unique
/// constraint and nothing is stored.
pub async fn create_drink(
    auth: Authorized<PostDrinks>,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DrinkBody>,
) -> AppResult<Json<DrinksResponse<DrinkLong>>> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("title is required".into()))?;
    let recipe = parse_recipe(body.recipe)?
        .ok_or_else(|| CoreError::Validation("recipe is required".into()))?;

    let mut tx = state.pool.begin().await?;
    let drink = DrinkRepo::create(&mut tx, &title, &recipe).await?;
    tx.commit().await?;

    tracing::info!(drink_id = drink.id, sub = %auth.claims().sub, "Drink created");
    Ok(Json(DrinksResponse::new(vec![drink.long()?])))
}

/// PATCH /drinks/{id}
///
/// Applies whichever of `title` and `recipe` are present.
pub async fn update_drink(
    auth: Authorized<PatchDrinks>,
    State(state): State<AppState>,
    ApiPath(drink_id): ApiPath<DbId>,
    ApiJson(body): ApiJson<DrinkBody>,
) -> AppResult<Json<DrinksResponse<DrinkLong>>> {
    if body.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation("title must not be blank".into()).into());
    }
    let recipe = parse_recipe(body.recipe)?;

    let mut tx = state.pool.begin().await?;
    let drink = DrinkRepo::update(&mut tx, drink_id, body.title.as_deref(), recipe.as_ref())
        .await?
        .ok_or_else(|| not_found(drink_id))?;
    tx.commit().await?;

    tracing::info!(drink_id, sub = %auth.claims().sub, "Drink updated");
    Ok(Json(DrinksResponse::new(vec![drink.long()?])))
}

/// DELETE /drinks/{id}
pub async fn delete_drink(
    auth: Authorized<DeleteDrinks>,
    State(state): State<AppState>,
    ApiPath(drink_id): ApiPath<DbId>,
) -> AppResult<Json<DrinkDeleted>> {
    let mut tx = state.pool.begin().await?;
    if !DrinkRepo::delete(&mut tx, drink_id).await? {
        return Err(not_found(drink_id));
    }
    tx.commit().await?;

    tracing::info!(drink_id, sub = %auth.claims().sub, "Drink deleted");
    Ok(Json(DrinkDeleted {
        success: true,
        delete: drink_id,
    }))
}
