//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use url::Url;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path prefix every route is served under
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Externally visible origin, used to build the links in assistance steps
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// CORS allowed origins (comma-separated)
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(format!("{}:{}", self.host, self.port)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get CORS origins as a vector
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Base path without a trailing slash; empty when serving at the root.
    pub fn normalized_base_path(&self) -> &str {
        self.base_path.trim_end_matches('/')
    }

    /// Public URL of the service root, e.g. `https://host/services/psd`.
    pub fn service_url(&self) -> String {
        format!(
            "{}{}",
            self.public_url.trim_end_matches('/'),
            self.normalized_base_path()
        )
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ValidationError::InvalidBasePath);
        }
        let public_url =
            Url::parse(&self.public_url).map_err(|_| ValidationError::InvalidUrl("public_url"))?;
        if self.is_production() && public_url.scheme() != "https" {
            return Err(ValidationError::PublicUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            base_path: default_base_path(),
            public_url: default_public_url(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,performance_support=debug".to_string()
}

fn default_base_path() -> String {
    "/services/psd".to_string()
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}
