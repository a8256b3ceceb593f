//! HTTP listener settings

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where the turn API listens and how the HTTP layer treats requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Whole-request timeout, LLM round trips included
    pub request_timeout_secs: u64,
    /// Comma-separated origins allowed to call cross-origin
    pub cors_origins: Option<String>,
}

/// Deployment flavour; production switches logs to JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ValidationError::InvalidAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn allowed_origins(&self) -> Vec<&str> {
        self.cors_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.listen_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,sales_agent=debug,tower_http=info".to_string(),
            request_timeout_secs: MAX_REQUEST_TIMEOUT_SECS,
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: ServerConfig = serde_yaml::from_str("port: 3000\nenvironment: production").unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.request_timeout_secs, 300);
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidAddress(_))));
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let config = ServerConfig {
            cors_origins: Some("https://painel.acme.com.br, http://localhost:3000,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["https://painel.acme.com.br", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }

    #[test]
    fn port_and_timeout_bounds() {
        let zero_port = ServerConfig { port: 0, ..Default::default() };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
        assert_eq!(ServerConfig::default().validate(), Ok(()));
    }
}
