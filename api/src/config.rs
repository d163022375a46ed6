//! Server Configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "RISK_REGISTER_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for [`ServerConfig`]
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Override that could not be parsed
    #[error("invalid {key}: {value}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database file
    pub database_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            database_path: "risks.db".into(),
        }
    }
}

impl ServerConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// File named by `RISK_REGISTER_CONFIG` (defaults if unset or missing),
    /// then `HOST`, `PORT` and `DATABASE_PATH` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Config {} not loaded ({}), using defaults", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database_path = path;
        }
        Ok(self)
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.database_path, "risks.db");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("PORT", "8123"), ("DATABASE_PATH", "/var/lib/risks/risks.db")]);
        let config = ServerConfig::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.port, 8123);
        assert_eq!(config.database_path, "/var/lib/risks/risks.db");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = ServerConfig::default()
            .with_overrides(|k| (k == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ServerConfig::load("/nonexistent/risk-register.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
