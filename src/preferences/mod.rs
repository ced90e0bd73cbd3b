mod extract;
pub mod handlers;
pub mod model;
pub mod store;

use axum::Router;

use crate::{error::DiscoveryError, state::AppState};
pub use extract::extract_preferences;
use model::UserPreferences;
use store::PreferenceStore;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::preference_routes())
}

/// Reads and extracts a user's preferences from the document store.
pub async fn load_preferences(
    store: &dyn PreferenceStore,
    user_id: &str,
) -> Result<UserPreferences, DiscoveryError> {
    let record = store
        .load_onboarding(user_id)
        .await
        .map_err(DiscoveryError::Store)?;
    let prefs = extract_preferences(record.as_ref())?;
    tracing::debug!(
        user_id,
        dietary = ?prefs.dietary_preferences,
        allergies = ?prefs.allergies.active(),
        "user preferences loaded"
    );
    Ok(prefs)
}
