use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{RecipeListResponse, RecipeResponse, SearchParams, SearchResponse};
use super::service;
use crate::{auth::AuthUser, error::DiscoveryError, state::AppState};

pub fn discovery_routes() -> Router<AppState> {
    Router::new()
        .route("/discovery/random", get(random_recipes))
        .route("/discovery/search", get(search_recipes))
        .route("/discovery/recipes/:id", get(get_recipe))
}

#[instrument(skip(state))]
pub async fn random_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RecipeListResponse>, DiscoveryError> {
    let recipes = service::discover_recipes(&state, &user_id).await?;
    Ok(Json(RecipeListResponse {
        message: "Random recipes retrieved successfully",
        count: recipes.len(),
        recipes,
    }))
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, DiscoveryError> {
    let found = service::search_recipes(&state, &user_id, &params.query).await?;
    Ok(Json(SearchResponse {
        message: "Recipes searched successfully",
        count: found.recipes.len(),
        query: found.query,
        recipes: found.recipes,
    }))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeResponse>, DiscoveryError> {
    let recipe = service::get_recipe(&state, id).await?;
    Ok(Json(RecipeResponse {
        message: "Recipe information retrieved successfully",
        recipe,
    }))
}
