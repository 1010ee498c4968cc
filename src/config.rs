//! Application configuration
//!
//! Read from an optional TOML file, then overridden by environment variables.
//! Signing settings stay optional here; the token codec decides whether they
//! are usable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::{JwtConfig, MAX_HASH_COST, MIN_HASH_COST};
use crate::infrastructure::DatabaseConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "AUTH_CONTROL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSection {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
        }
    }
}

impl DatabaseSection {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub jwt_secret_key: Option<String>,
    #[serde(default)]
    pub jwt_algorithm: Option<String>,
    /// Kept as text so a non-numeric value surfaces as a codec error
    #[serde(default)]
    pub access_token_expire_minutes: Option<String>,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret_key: None,
            jwt_algorithm: None,
            access_token_expire_minutes: None,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret_key", &self.jwt_secret_key.as_ref().map(|_| "<redacted>"))
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub on_startup: bool,
    #[serde(default = "default_true")]
    pub include_examples: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            on_startup: true,
            include_examples: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    DatabaseConfig::default().url
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

/// `$AUTH_CONTROL_CONFIG`, otherwise `<config dir>/auth-control/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auth-control")
        .join("config.toml")
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl AppConfig {
    /// Load `path` if it exists (defaults otherwise), then apply the
    /// process environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `lookup` (the process environment in production).
    /// Unparseable numeric values and out-of-range bcrypt costs are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET_KEY") {
            self.security.jwt_secret_key = Some(secret);
        }
        if let Some(algorithm) = lookup("JWT_ALGORITHM") {
            self.security.jwt_algorithm = Some(algorithm);
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            self.security.access_token_expire_minutes = Some(minutes);
        }
        if let Some(cost) = lookup("BCRYPT_COST")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|cost| (MIN_HASH_COST..=MAX_HASH_COST).contains(cost))
        {
            self.security.bcrypt_cost = cost;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(flag) = lookup("SEED_INCLUDE_EXAMPLES") {
            self.seed.include_examples = parse_flag(&flag);
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret_key.clone(),
            algorithm: self.security.jwt_algorithm.clone(),
            expire_minutes: self.security.access_token_expire_minutes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_leave_signing_unset() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert!(config.cors.allows_any());
        assert!(config.seed.on_startup);
        assert!(config.jwt_config().codec().is_err());
    }

    #[test]
    fn toml_sections_are_optional() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9100

            [security]
            jwt_secret_key = "s3cret"
            jwt_algorithm = "HS512"
            access_token_expire_minutes = "15"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.security.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.jwt_config().codec().is_ok());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("JWT_SECRET_KEY", "from-env"),
            ("JWT_ALGORITHM", "HS256"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("API_PORT", "8080"),
            ("BCRYPT_COST", "5"),
            ("SEED_INCLUDE_EXAMPLES", "no"),
            ("LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.bcrypt_cost, 5);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(!config.cors.allows_any());
        assert!(!config.seed.include_examples);
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config.security.access_token_expire_minutes.as_deref(),
            Some("30")
        );
        assert!(config.jwt_config().codec().is_ok());
    }

    #[test]
    fn bad_numbers_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("API_PORT", "eighty"), ("BCRYPT_COST", "")]));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.security.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn bcrypt_cost_outside_accepted_range_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("BCRYPT_COST", "3")]));
        assert_eq!(config.security.bcrypt_cost, bcrypt::DEFAULT_COST);

        config.apply_env_overrides(env(&[("BCRYPT_COST", "32")]));
        assert_eq!(config.security.bcrypt_cost, bcrypt::DEFAULT_COST);

        config.apply_env_overrides(env(&[("BCRYPT_COST", "4")]));
        assert_eq!(config.security.bcrypt_cost, MIN_HASH_COST);
    }

    #[test]
    fn secret_is_not_printed() {
        let mut config = AppConfig::default();
        config.security.jwt_secret_key = Some("hunter2".into());
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
