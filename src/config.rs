use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Mail submission settings. Only present when both account variables are set.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    /// Falls back to the database named in the URI when unset.
    pub database_name: Option<String>,
    pub smtp: Option<SmtpConfig>,
    pub db_timeout: Duration,
    pub notify_timeout: Duration,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mongo_uri = var("MONGOURI").ok_or(ConfigError::Missing("MONGOURI"))?;

        let smtp = match (var("SMTP_EMAIL"), var("SMTP_PASSWORD")) {
            (Some(username), Some(password)) => Some(SmtpConfig {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: parse_or("SMTP_PORT", var("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
                admin_email: var("ADMIN_EMAIL").unwrap_or_else(|| username.clone()),
                username,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            mongo_uri,
            database_name: var("MONGODB_DATABASE"),
            smtp,
            db_timeout: Duration::from_secs(parse_or(
                "DB_TIMEOUT_SECS",
                var("DB_TIMEOUT_SECS"),
                DEFAULT_DB_TIMEOUT_SECS,
            )?),
            notify_timeout: Duration::from_secs(parse_or(
                "NOTIFY_TIMEOUT_SECS",
                var("NOTIFY_TIMEOUT_SECS"),
                DEFAULT_NOTIFY_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_only_mongo_uri() {
        let config = load(&[("MONGOURI", "mongodb://localhost:27017")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_name, None);
        assert_eq!(config.smtp, None);
        assert_eq!(config.db_timeout, Duration::from_secs(10));
        assert_eq!(config.notify_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_mongo_uri() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("MONGOURI")));
        assert_eq!(
            load(&[("MONGOURI", "  ")]),
            Err(ConfigError::Missing("MONGOURI"))
        );
    }

    #[test]
    fn test_smtp_requires_both_credentials() {
        let config = load(&[
            ("MONGOURI", "mongodb://localhost"),
            ("SMTP_EMAIL", "bot@example.com"),
        ])
        .unwrap();
        assert!(config.smtp.is_none());
    }

    #[test]
    fn test_smtp_defaults_admin_to_sender() {
        let config = load(&[
            ("MONGOURI", "mongodb://localhost"),
            ("SMTP_EMAIL", "bot@example.com"),
            ("SMTP_PASSWORD", "secret"),
        ])
        .unwrap();

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.gmail.com");
        assert_eq!(smtp.port, 465);
        assert_eq!(smtp.admin_email, "bot@example.com");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MONGOURI", "mongodb://db:27017/crud"),
            ("MONGODB_DATABASE", "people"),
            ("PORT", "9000"),
            ("DB_TIMEOUT_SECS", "3"),
            ("SMTP_EMAIL", "bot@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("SMTP_PORT", "587"),
            ("ADMIN_EMAIL", "admin@example.com"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_name.as_deref(), Some("people"));
        assert_eq!(config.db_timeout, Duration::from_secs(3));
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.admin_email, "admin@example.com");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = load(&[("MONGOURI", "mongodb://localhost"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }
}
