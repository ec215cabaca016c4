//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PERFORMANCE_SUPPORT`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use performance_support::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving under {}", config.server.service_url());
//! ```

mod error;
mod features;
mod presentation;
mod server;
mod services;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use presentation::PresentationConfig;
pub use server::{Environment, ServerConfig};
pub use services::ServicesConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, base path, public URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote collaborator base URLs
    pub services: ServicesConfig,

    /// Presentation service addressing
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERFORMANCE_SUPPORT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PERFORMANCE_SUPPORT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PERFORMANCE_SUPPORT__SERVICES__PROCESS_ENGINE_URL=...` -> `services.process_engine_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERFORMANCE_SUPPORT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.services.validate()?;
        self.presentation.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Whether logs should be emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.is_production() && !self.features.debug_mode
    }
}
