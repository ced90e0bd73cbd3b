mod dto;
pub mod fetcher;
pub mod filters;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod service;
pub mod spoonacular;
#[cfg(test)]
pub(crate) mod testing;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::discovery_routes())
}
