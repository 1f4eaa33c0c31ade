use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Deserializer;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// CORS allow-list; empty means any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(deserialize_with = "deserialize_lifetime")]
    pub access_ttl: Duration,
    #[serde(deserialize_with = "deserialize_lifetime")]
    pub refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (15m / 7d token lifetimes, cost 12, port 3000,
    ///    local frontend origin)
    ///
    /// Fails when `jwt.secret` is missing or empty.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::builder()?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Self::environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Unprefixed variables, `__` between path segments.
    fn environment() -> Environment {
        Environment::default()
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 3000)?
            .set_default("server.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("jwt.access_ttl", "15m")?
            .set_default("jwt.refresh_ttl", "7d")?
            .set_default("password.cost", i64::from(auth::PasswordHasher::DEFAULT_COST))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.access_ttl <= Duration::zero() || self.jwt.refresh_ttl <= Duration::zero() {
            return Err(ConfigError::Message(
                "token lifetimes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a token lifetime such as `15m`, `7d`, `90s`, `500ms`, `2w` or a bare
/// number of seconds.
pub fn parse_lifetime(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);

    let amount: i64 = amount
        .parse()
        .map_err(|_| format!("invalid lifetime '{}': expected <number>[unit]", value))?;

    match unit.trim() {
        "" | "s" => Ok(Duration::seconds(amount)),
        "ms" => Ok(Duration::milliseconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        "w" => Ok(Duration::weeks(amount)),
        other => Err(format!("invalid lifetime unit '{}' in '{}'", other, value)),
    }
}

fn deserialize_lifetime<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(seconds) => Ok(Duration::seconds(seconds)),
        Raw::Text(text) => parse_lifetime(&text).map_err(serde::de::Error::custom),
    }
}
