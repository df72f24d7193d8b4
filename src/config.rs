//! Runtime settings read from the environment (and `.env`, loaded by `main`).

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const DEV_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// SMTP relay credentials. Absent when `SMTP_HOST` is unset.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Signs activation tokens.
    pub secret_key: String,
    /// Activates accounts immediately when the activation email cannot be sent.
    pub debug: bool,
    /// Base of the links put in emails.
    pub public_url: String,
    pub activation_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub smtp: Option<SmtpConfig>,
    pub mail_from: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            secret_key: DEV_SECRET.to_string(),
            debug: false,
            public_url: "http://localhost:8000".to_string(),
            activation_ttl_hours: 72,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            smtp: None,
            mail_from: "no-reply@food.delivery".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `load` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = try_load(&lookup, "PORT", "8000")?;

        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("SECRET_KEY not set, using the development secret");
                DEV_SECRET.to_string()
            });

        let public_url = lookup("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let smtp = lookup("SMTP_HOST")
            .filter(|h| !h.trim().is_empty())
            .map(|host| SmtpConfig {
                host,
                username: lookup("SMTP_USERNAME").unwrap_or_default(),
                password: lookup("SMTP_PASSWORD").unwrap_or_default(),
            });
        if smtp.is_none() {
            info!("SMTP_HOST not set, emails will only be logged");
        }

        Ok(Self {
            port,
            secret_key,
            debug: try_load(&lookup, "DEBUG", "false")?,
            public_url,
            activation_ttl_hours: try_load(&lookup, "ACTIVATION_TTL_HOURS", "72")?,
            bcrypt_cost: try_load(&lookup, "BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())?,
            smtp,
            mail_from: lookup("MAIL_FROM").unwrap_or_else(|| "no-reply@food.delivery".to_string()),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.public_url, "http://localhost:8000");
        assert_eq!(config.activation_ttl_hours, 72);
        assert!(!config.debug);
        assert!(config.smtp.is_none());
        assert_eq!(config.mail_from, "no-reply@food.delivery");
    }

    #[test]
    fn test_public_url_follows_port() {
        let config = Config::from_lookup(lookup(&[("PORT", "9100")])).unwrap();
        assert_eq!(config.public_url, "http://localhost:9100");
    }

    #[test]
    fn test_smtp_enabled_by_host() {
        let config = Config::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USERNAME", "mailer"),
            ("DEBUG", "true"),
        ]))
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.username, "mailer");
        assert_eq!(smtp.password, "");
        assert!(config.debug);
    }

    #[test]
    fn test_malformed_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
