use std::env;

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
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Without one the service keeps users in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub revoke_on_logout: bool,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("revoke_on_logout", &self.revoke_on_logout)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Argon2 iteration count
    pub cost: u32,
    pub memory_kib: u32,
}

/// Upper bound for `jwt.expiration_minutes` (one year).
pub const MAX_EXPIRATION_MINUTES: i64 = 60 * 24 * 365;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_minutes", auth::TokenIssuer::DEFAULT_TTL_MINUTES)?
            .set_default("jwt.revoke_on_logout", false)?
            .set_default("password.cost", 2)?
            .set_default("password.memory_kib", 19456)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".into(),
            ));
        }
        if self.jwt.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must not exceed {}",
                MAX_EXPIRATION_MINUTES
            )));
        }
        if self.password.cost == 0 {
            return Err(ConfigError::Message("password.cost must be at least 1".into()));
        }
        Ok(())
    }
}
