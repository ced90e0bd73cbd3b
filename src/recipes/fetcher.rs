use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failures from the upstream recipe service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

/// Request/response boundary with the upstream recipe service.
///
/// Implementations do not retry. An empty result list is a successful
/// response, distinct from an error.
#[async_trait]
pub trait RecipeFetcher: Send + Sync {
    /// Discovery mode: random recipes matching `params`.
    async fn random(&self, params: &[(&'static str, String)]) -> Result<Vec<Value>, FetchError>;

    /// Search mode: recipes matching `query` and `params`.
    async fn search(
        &self,
        query: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Value>, FetchError>;

    /// Full information for one recipe.
    async fn information(&self, recipe_id: i64) -> Result<Value, FetchError>;
}
