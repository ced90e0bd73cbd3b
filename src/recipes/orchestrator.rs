use serde_json::Value;
use tracing::{debug, error, info};

use super::fetcher::RecipeFetcher;
use super::filters::{build_tiers, QueryMode};
use crate::error::DiscoveryError;
use crate::preferences::model::UserPreferences;

/// Runs the tiered search, returning the first non-empty tier's raw payloads.
///
/// With `query` set the search endpoint is used, otherwise discovery. Tiers
/// run strictly one after another. An empty response relaxes to the next
/// tier; a fetch failure aborts the whole chain. Exhausting every tier yields
/// an empty list.
pub async fn fetch_with_fallback(
    fetcher: &dyn RecipeFetcher,
    prefs: &UserPreferences,
    query: Option<&str>,
    results: u32,
) -> Result<Vec<Value>, DiscoveryError> {
    let query = match query.map(str::trim) {
        Some("") => return Err(DiscoveryError::InvalidQuery),
        other => other,
    };
    let mode = match query {
        Some(_) => QueryMode::Search,
        None => QueryMode::Discovery,
    };

    for tier in build_tiers(prefs, mode, results) {
        info!(
            tier = %tier.level,
            ?mode,
            constraints = tier.constraint_count(),
            params = ?tier.params,
            "fetching recipes"
        );

        let attempt = match query {
            Some(q) => fetcher.search(q, &tier.params).await,
            None => fetcher.random(&tier.params).await,
        };
        let found = attempt.map_err(|e| {
            error!(tier = %tier.level, error = %e, "upstream fetch failed; aborting fallback");
            DiscoveryError::UpstreamFetchFailed(e)
        })?;

        debug!(tier = %tier.level, count = found.len(), "tier answered");
        if !found.is_empty() {
            return Ok(found);
        }
        info!(tier = %tier.level, "no recipes for tier, relaxing filters");
    }

    info!(?mode, "all tiers exhausted without results");
    Ok(Vec::new())
}
