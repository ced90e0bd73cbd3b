use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::fetcher::{FetchError, RecipeFetcher};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Random(Vec<(&'static str, String)>),
    Search(String, Vec<(&'static str, String)>),
    Information(i64),
}

/// Replays queued responses in order and records every call.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Vec<Value>, FetchError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<Vec<Value>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Vec<Value>, FetchError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl RecipeFetcher for ScriptedFetcher {
    async fn random(&self, params: &[(&'static str, String)]) -> Result<Vec<Value>, FetchError> {
        self.next(Call::Random(params.to_vec()))
    }

    async fn search(
        &self,
        query: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Value>, FetchError> {
        self.next(Call::Search(query.to_string(), params.to_vec()))
    }

    async fn information(&self, recipe_id: i64) -> Result<Value, FetchError> {
        let mut found = self.next(Call::Information(recipe_id))?;
        if found.is_empty() {
            return Err(FetchError::Status {
                status: 404,
                body: "not found".into(),
            });
        }
        Ok(found.remove(0))
    }
}
