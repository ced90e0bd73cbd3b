use serde::{Deserialize, Serialize};

use super::model::Recipe;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub message: &'static str,
    pub count: usize,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub message: &'static str,
    pub count: usize,
    pub query: String,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub message: &'static str,
    pub recipe: Recipe,
}
