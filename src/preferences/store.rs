use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

/// Read access to user-scoped onboarding records.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Raw onboarding record for a user, `None` when the user or the record is absent.
    async fn load_onboarding(&self, user_id: &str) -> anyhow::Result<Option<Value>>;
}

#[derive(Clone)]
pub struct PgPreferenceStore {
    db: PgPool,
}

impl PgPreferenceStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn load_onboarding(&self, user_id: &str) -> anyhow::Result<Option<Value>> {
        let row = sqlx::query_scalar::<_, Option<Value>>(
            r#"
            SELECT onboarding
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("load onboarding for user {}", user_id))?;
        Ok(row.flatten())
    }
}

/// Map-backed store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    records: tokio::sync::RwLock<std::collections::HashMap<String, Value>>,
}

#[cfg(test)]
impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user_id: impl Into<String>, onboarding: Value) {
        self.records.write().await.insert(user_id.into(), onboarding);
    }
}

#[cfg(test)]
#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load_onboarding(&self, user_id: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}
