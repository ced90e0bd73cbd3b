use tracing::{info, instrument};

use super::model::Recipe;
use super::normalize::normalize;
use super::orchestrator::fetch_with_fallback;
use crate::error::DiscoveryError;
use crate::preferences::load_preferences;
use crate::state::AppState;

#[derive(Debug)]
pub struct SearchResults {
    pub query: String,
    pub recipes: Vec<Recipe>,
}

/// Preference-filtered random recipes for `user_id`.
#[instrument(skip(st))]
pub async fn discover_recipes(st: &AppState, user_id: &str) -> Result<Vec<Recipe>, DiscoveryError> {
    let prefs = load_preferences(st.preferences.as_ref(), user_id).await?;
    let raw = fetch_with_fallback(
        st.recipes.as_ref(),
        &prefs,
        None,
        st.config.spoonacular.results,
    )
    .await?;

    let recipes: Vec<Recipe> = raw.into_iter().map(normalize).collect();
    info!(count = recipes.len(), "discovered recipes");
    Ok(recipes)
}

/// Preference-filtered keyword search for `user_id`.
///
/// A blank query is rejected before preferences are read or upstream is called.
#[instrument(skip(st))]
pub async fn search_recipes(
    st: &AppState,
    user_id: &str,
    query: &str,
) -> Result<SearchResults, DiscoveryError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(DiscoveryError::InvalidQuery);
    }

    let prefs = load_preferences(st.preferences.as_ref(), user_id).await?;
    let raw = fetch_with_fallback(
        st.recipes.as_ref(),
        &prefs,
        Some(query),
        st.config.spoonacular.results,
    )
    .await?;

    let recipes: Vec<Recipe> = raw.into_iter().map(normalize).collect();
    info!(count = recipes.len(), "search matched recipes");
    Ok(SearchResults {
        query: query.to_string(),
        recipes,
    })
}

/// Full details of one upstream recipe.
#[instrument(skip(st))]
pub async fn get_recipe(st: &AppState, recipe_id: i64) -> Result<Recipe, DiscoveryError> {
    match st.recipes.information(recipe_id).await {
        Ok(raw) => Ok(normalize(raw)),
        Err(e) if e.is_not_found() => Err(DiscoveryError::RecipeNotFound(recipe_id)),
        Err(e) => Err(DiscoveryError::UpstreamFetchFailed(e)),
    }
}
