pub use crate::utils::database;
use crate::modules::{
    auth::provider::{IdentityProvider, StaticTokens},
    like::repository::{LikeStore, MemoryLikeStore, PgLikeStore},
};
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

#[derive(Clone)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

/// Shared application context. The like store and identity provider are the
/// two collaborator seams; everything behind them is replaceable in tests.
#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub likes: Arc<dyn LikeStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub tokens: String,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").ok();
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let auth_tokens = env::var("AUTH_TOKENS").unwrap_or_default();

        Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            auth: AuthConfig {
                tokens: auth_tokens,
            },
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let likes: Arc<dyn LikeStore> = match self.database.url {
            Some(url) => {
                let db_conn = database::connect(url.as_str()).await.unwrap_or_else(|err| {
                    tracing::error!("{}", err);
                    panic!("Error connecting to database {}", url)
                });
                database::migrate(&db_conn).await.unwrap_or_else(|err| {
                    tracing::error!("{}", err);
                    panic!("Failed to run database migrations")
                });
                tracing::debug!("Connected to database");
                Arc::new(PgLikeStore::new(db_conn.pool))
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set, falling back to the in-memory like store; likes will not survive a restart"
                );
                Arc::new(MemoryLikeStore::new())
            }
        };

        let identity: Arc<dyn IdentityProvider> =
            Arc::new(StaticTokens::parse(self.auth.tokens.as_str()));

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            likes,
            identity,
        }
    }
}
