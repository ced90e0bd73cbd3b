use axum::extract::FromRef;
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::debug;

use super::claims::Claims;
use crate::{config::AuthConfig, state::AppState};

/// Verification material for identity-provider tokens.
#[derive(Clone)]
pub struct AuthKeys {
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl AuthKeys {
    pub fn from_config(cfg: &AuthConfig) -> Self {
        Self {
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if data.claims.sub.trim().is_empty() {
            anyhow::bail!("token has no subject");
        }
        debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for AuthKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.auth)
    }
}
