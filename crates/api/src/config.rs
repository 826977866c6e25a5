use std::collections::HashMap;
use std::net::SocketAddr;

use domain::services::{DiscountError, DiscountTable};
use serde::Deserialize;
use shared::validation::validate_discount_fraction;

/// Built-in defaults, the lowest-priority configuration source.
const DEFAULTS: &str = r#"
    [server]
    host = "0.0.0.0"
    port = 9090
    request_timeout_secs = 30

    [database]
    host = "localhost"
    port = 5432
    user = ""
    password = ""
    name = ""
    sslmode = "prefer"
    max_connections = 10
    min_connections = 1
    connect_timeout_secs = 10
    idle_timeout_secs = 600

    [logging]
    level = "info"
    format = "json"

    [seed]
    enabled = true
    path = "seed-product-and-category.json"
"#;

/// Flat environment variables still honoured for deployments that predate
/// the `CATALOG__` scheme, mapped to their configuration keys.
const LEGACY_VARS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_HOST", "database.host"),
    ("DB_POST", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_SSLMODE", "database.sslmode"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
    /// Discount rules. A source that sets `discounts` replaces the whole list.
    #[serde(default = "default_discounts")]
    pub discounts: Vec<DiscountRule>,
}

/// One `[[discounts]]` entry.
///
/// Rules are a list of entries rather than a table because the loader
/// lowercases table keys, and SKUs and category names are matched exactly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscountRule {
    /// Category name or product SKU.
    pub key: String,
    pub fraction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection string. Takes precedence over the individual parts.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_sslmode")]
    pub sslmode: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Whether to load the fixture file at startup.
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,

    #[serde(default = "default_seed_path")]
    pub path: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    9090
}
fn default_request_timeout() -> u64 {
    30
}
fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    5432
}
fn default_sslmode() -> String {
    "prefer".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_seed_enabled() -> bool {
    true
}
fn default_seed_path() -> String {
    "seed-product-and-category.json".to_string()
}
fn default_discounts() -> Vec<DiscountRule> {
    DiscountTable::default()
        .iter()
        .map(|(key, fraction)| DiscountRule {
            key: key.to_string(),
            fraction,
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. built-in defaults
    /// 2. config/default.toml (optional)
    /// 3. config/local.toml (optional, not in git)
    /// 4. Environment variables with CATALOG__ prefix
    /// 5. Legacy flat variables (PORT, DATABASE_URL, DB_*)
    pub fn load() -> Result<Self, config::ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::build(&vars, true, None)
    }

    /// Load configuration from the defaults and the given variables only.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::build(vars, false, None)
    }

    /// Load configuration from the defaults, a TOML document layered where
    /// the config files would be, and the given variables.
    pub fn from_toml(
        toml: &str,
        vars: &HashMap<String, String>,
    ) -> Result<Self, config::ConfigError> {
        Self::build(vars, false, Some(toml))
    }

    fn build(
        vars: &HashMap<String, String>,
        with_files: bool,
        overlay: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        if with_files {
            builder = builder
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name("config/local").required(false));
        }

        if let Some(toml) = overlay {
            builder = builder.add_source(config::File::from_str(toml, config::FileFormat::Toml));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CATALOG")
                .separator("__")
                .source(Some(vars.clone())),
        );

        for (var, key) in LEGACY_VARS {
            let value = vars.get(*var).filter(|value| !value.is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        let has_url = self
            .database
            .url
            .as_deref()
            .is_some_and(|url| !url.is_empty());
        if !has_url && self.database.host.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "DATABASE_URL or a database host must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "request_timeout_secs cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        for DiscountRule { key, fraction } in &self.discounts {
            if key.is_empty() {
                return Err(ConfigValidationError::MissingRequired(
                    "every discount rule needs a key".to_string(),
                ));
            }
            if validate_discount_fraction(*fraction).is_err() {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "discount for {key:?} must be at least 0 and less than 1, got {fraction}"
                )));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Builds the discount table the listing engine is constructed with.
    pub fn discount_table(&self) -> Result<DiscountTable, DiscountError> {
        DiscountTable::new(
            self.discounts
                .iter()
                .map(|rule| (rule.key.clone(), rule.fraction)),
        )
    }
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            password: config.password.clone(),
            name: config.name.clone(),
            sslmode: config.sslmode.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: config.idle_timeout_secs,
        }
    }
}
