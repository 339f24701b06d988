use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    pub messaging: MessagingConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Postgres backing the document store. Without a URL documents stay in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisConfig {
    pub url: Option<String>,
}

/// Messaging deep link target, e.g. `https://wa.me` + `5491150109307`
#[derive(Debug, Deserialize, Clone)]
pub struct MessagingConfig {
    pub base_url: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Stamped as `source` on every stored document
    pub source: String,
}

/// Per-IP request budgets, counted in Redis
#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub contact_limit: i64,
    #[serde(default = "default_session_limit")]
    pub session_limit: i64,
    pub window_seconds: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            contact_limit: 5,
            session_limit: default_session_limit(),
            window_seconds: 60,
        }
    }
}

fn default_session_limit() -> i64 { 20 }

/// Booking sessions untouched for `idle_timeout_seconds` are dropped
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_seconds: i64,
    pub sweep_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: 2 * 60 * 60,
            sweep_interval_seconds: 5 * 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // LOME__MESSAGING__PHONE=... overrides messaging.phone
            .add_source(config::Environment::with_prefix("LOME").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document on its own, without files or environment
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.messaging.base_url, "https://wa.me");
        assert_eq!(config.messaging.phone, "5491150109307");
        assert_eq!(config.site.source, "lomevr-web");
        assert!(config.database.url.is_none());
        assert_eq!(config.rate_limit.session_limit, 20);
        assert_eq!(config.sessions.idle_timeout_seconds, 7200);
        assert_eq!(config.sessions.sweep_interval_seconds, 300);
    }

    #[test]
    fn test_optional_sections_default() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000
            [messaging]
            base_url = "https://wa.me"
            phone = "123"
            [site]
            source = "test"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert!(config.redis.url.is_none());
        assert_eq!(config.rate_limit.contact_limit, 5);
        assert_eq!(config.sessions.idle_timeout_seconds, 7200);
    }
}
