use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::recipes::fetcher::FetchError;

/// Failures surfaced by recipe discovery.
///
/// An empty recipe list is never an error; callers receive it as a normal
/// result.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The user has no onboarding record at all.
    #[error("User onboarding data not found")]
    PreferencesMissing,

    /// Keyword search was called with an empty or whitespace-only query.
    #[error("Search query must not be empty")]
    InvalidQuery,

    /// The upstream recipe service failed; the fallback chain was aborted.
    #[error("Failed to fetch recipes from upstream")]
    UpstreamFetchFailed(#[source] FetchError),

    #[error("Recipe {0} not found")]
    RecipeNotFound(i64),

    /// Document store failure.
    #[error("Failed to load user preferences")]
    Store(#[source] anyhow::Error),
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            DiscoveryError::PreferencesMissing => (StatusCode::NOT_FOUND, None),
            DiscoveryError::InvalidQuery => (StatusCode::BAD_REQUEST, None),
            DiscoveryError::RecipeNotFound(_) => (StatusCode::NOT_FOUND, None),
            DiscoveryError::UpstreamFetchFailed(e) => {
                error!(error = %e, "upstream fetch failed");
                (StatusCode::BAD_GATEWAY, Some(e.to_string()))
            }
            DiscoveryError::Store(e) => {
                error!(error = ?e, "preference store failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = match details {
            Some(details) => json!({ "error": self.to_string(), "details": details }),
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_distinguish_no_data_from_failures() {
        let cases = [
            (DiscoveryError::PreferencesMissing, StatusCode::NOT_FOUND),
            (DiscoveryError::InvalidQuery, StatusCode::BAD_REQUEST),
            (DiscoveryError::RecipeNotFound(7), StatusCode::NOT_FOUND),
            (
                DiscoveryError::UpstreamFetchFailed(FetchError::Network("reset".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DiscoveryError::Store(anyhow::anyhow!("pool closed")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
