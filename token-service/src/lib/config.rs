use std::env;
use std::time::Duration;

use auth::CredentialSettings;
use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hashing: HashingCost,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_lifetime_minutes")]
    pub access_token_lifetime_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub operation_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            operation_timeout_ms: 5_000,
        }
    }
}

fn default_access_token_lifetime_minutes() -> i64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Settings handed to the credential manager; the auth crate never reads
    /// configuration sources itself.
    pub fn credential_settings(&self) -> CredentialSettings {
        CredentialSettings {
            signing_secret: self.jwt.secret.clone(),
            access_token_lifetime: chrono::Duration::minutes(self.jwt.access_token_lifetime_minutes),
            hashing_cost: self.hashing,
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.service.operation_timeout_ms)
    }
}
