use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
    pub results: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub auth: AuthConfig,
    pub spoonacular: SpoonacularConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: match std::env::var("APP_PORT") {
                Ok(v) => v.parse::<u16>().with_context(|| format!("APP_PORT {:?}", v))?,
                Err(_) => 8080,
            },
        };
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let auth = AuthConfig {
            secret: std::env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET is not set")?,
            issuer: std::env::var("AUTH_JWT_ISSUER").unwrap_or_else(|_| "pantrychef".into()),
            audience: std::env::var("AUTH_JWT_AUDIENCE")
                .unwrap_or_else(|_| "pantrychef-app".into()),
        };
        let spoonacular = SpoonacularConfig {
            api_key: std::env::var("SPOONACULAR_API_KEY")
                .context("SPOONACULAR_API_KEY is not set")?,
            base_url: std::env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),
            results: std::env::var("SPOONACULAR_RESULTS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            timeout_secs: std::env::var("SPOONACULAR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        };
        Ok(Self {
            server,
            database_url,
            auth,
            spoonacular,
        })
    }
}
