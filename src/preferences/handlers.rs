use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{extract_preferences, model::UserPreferences};
use crate::{auth::AuthUser, error::DiscoveryError, state::AppState};

pub fn preference_routes() -> Router<AppState> {
    Router::new().route("/discovery/preferences", get(get_preferences))
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub message: &'static str,
    /// Onboarding record exactly as stored.
    pub preferences: Value,
    /// What recipe filtering actually uses.
    pub extracted: UserPreferences,
}

/// Debug view of the stored onboarding record next to its extracted form.
#[instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PreferencesResponse>, DiscoveryError> {
    let record = state
        .preferences
        .load_onboarding(&user_id)
        .await
        .map_err(DiscoveryError::Store)?;
    let extracted = extract_preferences(record.as_ref())?;
    Ok(Json(PreferencesResponse {
        message: "User preferences retrieved successfully",
        preferences: record.unwrap_or(Value::Null),
        extracted,
    }))
}
