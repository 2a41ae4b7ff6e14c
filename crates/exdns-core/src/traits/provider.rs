// # Provider Trait
//
// The contract external-dns expects from a webhook provider.

use crate::model::{Changes, Endpoint};
use crate::zone::DomainFilter;
use async_trait::async_trait;

/// Orchestrator-facing provider interface
///
/// The orchestrator reads the current state with [`Provider::records`],
/// computes a plan, and hands the difference to [`Provider::apply_changes`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Current records across all permitted zones
    async fn records(&self) -> Result<Vec<Endpoint>, crate::Error>;

    /// Apply a computed change set
    ///
    /// Either every change was applied, or an error is returned. There is
    /// no signal for which changes succeeded before the failing one.
    async fn apply_changes(&self, changes: &Changes) -> Result<(), crate::Error>;

    /// Let the provider rewrite desired endpoints before planning
    ///
    /// The default makes no adjustments.
    async fn adjust_endpoints(
        &self,
        endpoints: Vec<Endpoint>,
    ) -> Result<Vec<Endpoint>, crate::Error> {
        Ok(endpoints)
    }

    /// Zones this provider is allowed to manage
    fn domain_filter(&self) -> &DomainFilter;
}

/// Helper trait for constructing providers from configuration
pub trait ProviderFactory: Send + Sync {
    /// Create a Provider instance from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required setting is missing.
    fn create(
        &self,
        config: &crate::config::WebhookConfig,
    ) -> Result<Box<dyn Provider>, crate::Error>;
}
