pub use crate::utils::database;
use crate::modules::listing::repository::{ListingStore, PgListingStore};
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Language codes that have translation rows. Requests for any other code are
/// served with the listings' default text.
#[derive(Clone, Debug)]
pub struct SupportedLanguages(Vec<String>);

impl SupportedLanguages {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|code| code.trim().to_lowercase())
                .filter(|code| !code.is_empty())
                .collect(),
        )
    }

    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|supported| supported.as_str() == code)
            .map(String::as_str)
    }
}

impl Default for SupportedLanguages {
    fn default() -> Self {
        Self::parse("en,bn")
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub store: Arc<dyn ListingStore>,
    pub languages: SupportedLanguages,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub languages: SupportedLanguages,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "4".to_string())
            .parse::<u32>()
            .expect("Invalid DATABASE_MAX_CONNECTIONS");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let languages = env::var("SUPPORTED_LANGUAGES")
            .map(|raw| SupportedLanguages::parse(&raw))
            .unwrap_or_default();

        Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections: database_max_connections,
            },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            languages,
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
        let db_conn =
            database::connect(self.database.url.as_str(), self.database.max_connections).await;
        database::migrate(db_conn.clone()).await;

        tracing::info!("Connected to database");

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            store: Arc::new(PgListingStore::new(db_conn.pool)),
            languages: self.languages,
        }
    }
}
