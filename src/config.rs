//! Configuration types, read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Parse API server configuration.
#[derive(Debug)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Accepted bearer tokens. Never logged.
    pub api_tokens: Vec<SecretString>,
    /// Allowed CORS origins. Empty disables CORS; `"*"` allows any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Read the server configuration from the process environment.
    ///
    /// `FIT_INTENT_API_TOKENS` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("FIT_INTENT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("FIT_INTENT_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "FIT_INTENT_PORT".into(),
                    message: format!("{raw:?} is not a port number ({e})"),
                })?,
            None => DEFAULT_PORT,
        };

        let api_tokens: Vec<SecretString> = split_list(lookup("FIT_INTENT_API_TOKENS"))
            .into_iter()
            .map(SecretString::from)
            .collect();
        if api_tokens.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "FIT_INTENT_API_TOKENS".into(),
                hint: "Set a comma-separated list of bearer tokens accepted by /api/ai/parse."
                    .into(),
            });
        }

        let cors_origins = split_list(lookup("FIT_INTENT_CORS_ORIGINS"));

        Ok(Self {
            host,
            port,
            api_tokens,
            cors_origins,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "FIT_INTENT_HOST".into(),
                message: format!("{:?} is not a bindable address ({e})", self.host),
            })
    }

    /// Whether `token` is one of the configured bearer tokens.
    pub fn accepts_token(&self, token: &str) -> bool {
        self.api_tokens
            .iter()
            .any(|t| t.expose_secret() == token)
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
    /// Directory for a daily-rolling log file, in addition to stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            dir: lookup("FIT_INTENT_LOG_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_tokens() {
        let config =
            ServerConfig::from_lookup(lookup(&[("FIT_INTENT_API_TOKENS", "alpha, beta ,")]))
                .unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_tokens.len(), 2);
        assert!(config.accepts_token("alpha"));
        assert!(config.accepts_token("beta"));
        assert!(!config.accepts_token("gamma"));
        assert!(!config.accepts_token(""));
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn missing_tokens_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { ref key, .. } if key == "FIT_INTENT_API_TOKENS"));

        let err = ServerConfig::from_lookup(lookup(&[("FIT_INTENT_API_TOKENS", " , ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
    }

    #[test]
    fn bad_port_is_invalid() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("FIT_INTENT_API_TOKENS", "t"),
            ("FIT_INTENT_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "FIT_INTENT_PORT"));
    }

    #[test]
    fn explicit_host_port_and_origins() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FIT_INTENT_API_TOKENS", "t"),
            ("FIT_INTENT_HOST", "127.0.0.1"),
            ("FIT_INTENT_PORT", "3000"),
            ("FIT_INTENT_CORS_ORIGINS", "https://app.example.com,http://localhost:3000"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.cors_origins,
            vec!["https://app.example.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn unbindable_host() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FIT_INTENT_API_TOKENS", "t"),
            ("FIT_INTENT_HOST", "not a host"),
        ]))
        .unwrap();
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn log_config() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config.filter, "info");
        assert!(config.dir.is_none());

        let config = LogConfig::from_lookup(lookup(&[
            ("RUST_LOG", "fit_intent=debug"),
            ("FIT_INTENT_LOG_DIR", "/var/log/fit-intent"),
        ]));
        assert_eq!(config.filter, "fit_intent=debug");
        assert_eq!(config.dir, Some(PathBuf::from("/var/log/fit-intent")));
    }
}
