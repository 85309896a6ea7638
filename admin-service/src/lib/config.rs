use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

/// Environment variable names used by the hosted backend's own tooling.
pub const HOSTED_URL_VAR: &str = "SUPABASE_URL";
pub const HOSTED_SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub roles: RolesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Hosted backend endpoint and the service credential granting admin access.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub service_role_key: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RolesConfig {
    pub store: RoleStoreKind,
    pub database_url: Option<String>,
}

/// Where role assignments are read from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleStoreKind {
    /// The backend's REST data API, authenticated with the service key.
    Rest,
    /// A direct Postgres connection to the backend database.
    Postgres,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY
    /// 2. Environment variables (BACKEND__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8000)?
            .set_default("roles.store", "rest")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: BACKEND__URL=https://... overrides backend.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("backend.url", env::var(HOSTED_URL_VAR).ok())?
            .set_override_option(
                "backend.service_role_key",
                env::var(HOSTED_SERVICE_KEY_VAR).ok(),
            )?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Message("backend.url must not be empty".into()));
        }
        if self.backend.service_role_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message(
                "backend.service_role_key must not be empty".into(),
            ));
        }
        if self.roles.store == RoleStoreKind::Postgres && self.roles.database_url.is_none() {
            return Err(ConfigError::Message(
                "roles.database_url is required when roles.store = \"postgres\"".into(),
            ));
        }
        Ok(())
    }
}
