//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Human-readable logs at debug level, even in production
    #[serde(default)]
    pub debug_mode: bool,
}
