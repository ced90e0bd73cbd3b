use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use super::fetcher::{FetchError, RecipeFetcher};
use crate::config::SpoonacularConfig;

const USER_AGENT: &str = concat!("pantrychef/", env!("CARGO_PKG_VERSION"));

/// Spoonacular REST client.
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(cfg: &SpoonacularConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?params, "spoonacular request");

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%url, status = status.as_u16(), %body, "spoonacular call failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Result array under `key`; a body without it counts as no results.
fn take_results(mut body: Value, key: &str) -> Vec<Value> {
    match body.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[async_trait]
impl RecipeFetcher for SpoonacularClient {
    async fn random(&self, params: &[(&'static str, String)]) -> Result<Vec<Value>, FetchError> {
        let body = self.get_json("/recipes/random", params).await?;
        let recipes = take_results(body, "recipes");
        debug!(count = recipes.len(), "random recipes received");
        Ok(recipes)
    }

    async fn search(
        &self,
        query: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Value>, FetchError> {
        let mut all: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        all.push(("query", query.to_string()));
        all.extend(params.iter().cloned());

        let body = self.get_json("/recipes/complexSearch", &all).await?;
        let results = take_results(body, "results");
        debug!(count = results.len(), "search results received");
        Ok(results)
    }

    async fn information(&self, recipe_id: i64) -> Result<Value, FetchError> {
        let params = [
            ("includeNutrition", "false".to_string()),
            ("addWinePairing", "false".to_string()),
            ("addTasteData", "false".to_string()),
        ];
        let body = self
            .get_json(&format!("/recipes/{}/information", recipe_id), &params)
            .await?;
        if !body.is_object() {
            return Err(FetchError::Decode("recipe information is not an object".into()));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header, HeaderMap, StatusCode, Uri},
        Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Seen {
        path: String,
        query: Option<String>,
        api_key: Option<String>,
    }

    /// Local upstream that answers every request with `status` and `body`.
    async fn stub_upstream(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = seen.clone();
        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let record = record.clone();
            async move {
                record.lock().unwrap().push(Seen {
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    api_key: headers
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                });
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), seen)
    }

    fn client_for(base_url: String) -> SpoonacularClient {
        SpoonacularClient::new(&SpoonacularConfig {
            api_key: "test-key".into(),
            base_url,
            results: 10,
            timeout_secs: 5,
        })
        .expect("client")
    }

    #[tokio::test]
    async fn random_sends_key_and_params() {
        let (url, seen) = stub_upstream(StatusCode::OK, r#"{"recipes":[{"id":1},{"id":2}]}"#).await;
        let client = client_for(url);

        let params = [("includeNutrition", "false".to_string()), ("number", "10".to_string())];
        let recipes = client.random(&params).await.unwrap();
        assert_eq!(recipes, vec![json!({ "id": 1 }), json!({ "id": 2 })]);

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/recipes/random");
        assert_eq!(seen[0].query.as_deref(), Some("includeNutrition=false&number=10"));
        assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn search_puts_query_ahead_of_tier_params() {
        let (url, seen) = stub_upstream(StatusCode::OK, r#"{"results":[{"id":7}]}"#).await;
        let client = client_for(url);

        let params = [
            ("diet", "vegan".to_string()),
            ("intolerances", "tree nut,peanut".to_string()),
        ];
        let results = client.search("pasta bake", &params).await.unwrap();
        assert_eq!(results.len(), 1);

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen[0].path, "/recipes/complexSearch");
        assert_eq!(
            seen[0].query.as_deref(),
            Some("query=pasta+bake&diet=vegan&intolerances=tree+nut%2Cpeanut")
        );
        assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn search_without_results_key_is_empty() {
        let (url, _) = stub_upstream(StatusCode::OK, r#"{"totalResults":0}"#).await;
        let results = client_for(url).search("nothing", &[]).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn information_requests_lean_payload() {
        let (url, seen) = stub_upstream(StatusCode::OK, r#"{"id":12,"title":"Pancakes"}"#).await;
        let body = client_for(url).information(12).await.unwrap();
        assert_eq!(body["title"], "Pancakes");

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen[0].path, "/recipes/12/information");
        assert_eq!(
            seen[0].query.as_deref(),
            Some("includeNutrition=false&addWinePairing=false&addTasteData=false")
        );
    }

    #[tokio::test]
    async fn non_success_status_becomes_status_error() {
        let (url, _) = stub_upstream(StatusCode::PAYMENT_REQUIRED, r#"{"message":"daily quota"}"#).await;
        let err = client_for(url).random(&[]).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 402);
                assert!(body.contains("daily quota"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_json_becomes_decode_error() {
        let (url, _) = stub_upstream(StatusCode::OK, "<html>oops</html>").await;
        let err = client_for(url).random(&[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn information_that_is_not_an_object_is_decode_error() {
        let (url, _) = stub_upstream(StatusCode::OK, "[1,2]").await;
        let err = client_for(url).information(3).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn upstream_404_reaches_recipe_not_found() {
        use crate::error::DiscoveryError;
        use crate::preferences::store::InMemoryPreferenceStore;
        use crate::recipes::service::get_recipe;
        use crate::state::AppState;

        let (url, _) = stub_upstream(StatusCode::NOT_FOUND, r#"{"status":"failure"}"#).await;
        let st = AppState::fake(
            Arc::new(InMemoryPreferenceStore::new()),
            Arc::new(client_for(url)),
        );

        let err = get_recipe(&st, 555).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::RecipeNotFound(555)));
    }

    #[test]
    fn take_results_reads_named_array() {
        let body = json!({ "recipes": [ { "id": 1 }, { "id": 2 } ] });
        assert_eq!(take_results(body, "recipes").len(), 2);
    }

    #[test]
    fn take_results_treats_missing_or_wrong_shape_as_empty() {
        assert!(take_results(json!({}), "results").is_empty());
        assert!(take_results(json!({ "results": null }), "results").is_empty());
        assert!(take_results(json!({ "results": { "id": 1 } }), "results").is_empty());
        assert!(take_results(json!([1, 2]), "results").is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cfg = SpoonacularConfig {
            api_key: "key".into(),
            base_url: "https://api.spoonacular.com/".into(),
            results: 10,
            timeout_secs: 5,
        };
        let client = SpoonacularClient::new(&cfg).expect("client");
        assert_eq!(client.base_url, "https://api.spoonacular.com");
    }

    #[test]
    fn not_found_is_detected() {
        let err = FetchError::Status { status: 404, body: "{}".into() };
        assert!(err.is_not_found());
        assert!(!FetchError::Network("timeout".into()).is_not_found());
    }
}
