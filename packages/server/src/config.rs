use config::{Config, ConfigError, Environment, File};
use graph::RepositoryConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any. Default: none.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// The organization hosting this badge service.
#[derive(Debug, Deserialize, Clone)]
pub struct OrganizationConfig {
    pub url: String,
}

impl OrganizationConfig {
    /// Base URL without its trailing slash, ready for joining paths.
    pub fn base_url(&self) -> &str {
        self.url.strip_suffix('/').unwrap_or(&self.url)
    }
}

/// Issuer record served at `/Issuer`.
#[derive(Debug, Deserialize, Clone)]
pub struct IssuerConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub organization: OrganizationConfig,
    pub issuer: IssuerConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("BADGES_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.max_age", 3600)?
            .set_default("organization.url", "http://localhost:3000/")?
            .set_default("issuer.name", "Badge Issuer")?
            .set_default("issuer.url", "http://localhost:3000/")?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., BADGES__REPOSITORY__ENDPOINT_URL)
            .add_source(Environment::with_prefix("BADGES").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
