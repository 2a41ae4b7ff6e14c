//! Configuration types for the webhook provider
//!
//! Configuration is read once at startup and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Zone suffixes this provider may manage
    pub domain_filter: Vec<String>,

    /// DNS provider configuration
    pub provider: ProviderConfig,
}

impl WebhookConfig {
    /// Create a new configuration
    pub fn new(domain_filter: Vec<String>, provider: ProviderConfig) -> Self {
        Self {
            domain_filter,
            provider,
        }
    }

    /// Validate the configuration
    ///
    /// The domain filter is checked before the provider credentials.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain_filter.iter().all(|zone| zone.trim().is_empty()) {
            return Err(crate::Error::config(format!(
                "{} provider requires at least one configured domain in the domain filter",
                self.provider.type_name()
            )));
        }

        self.provider.validate()
    }
}

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Porkbun provider
    Porkbun {
        /// Porkbun API key
        api_key: String,
        /// Porkbun secret API key
        secret_key: String,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Porkbun {
                api_key,
                secret_key,
            } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("porkbun provider requires an API key"));
                }
                if secret_key.is_empty() {
                    return Err(crate::Error::config(
                        "porkbun provider requires a secret key",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Porkbun { .. } => "porkbun",
        }
    }
}

// Credentials are never printed
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Porkbun { .. } => f
                .debug_struct("Porkbun")
                .field("api_key", &"<REDACTED>")
                .field("secret_key", &"<REDACTED>")
                .finish(),
        }
    }
}
