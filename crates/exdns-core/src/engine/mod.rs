//! Reconciliation engine
//!
//! The Reconciler is responsible for:
//! - Listing current records across permitted zones as endpoints
//! - Splitting a change set by zone
//! - Translating endpoints into provider records against a fresh snapshot
//! - Issuing mutating calls in a fixed, safe order
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ Orchestrator │─── Changes ───┐
//! └──────────────┘               │
//!                                ▼
//!                       ┌────────────────┐
//!                       │   Reconciler   │
//!                       └────────────────┘
//!                                │
//!         ┌──────────────────────┼──────────────────────┐
//!         │                      │                      │
//!         ▼                      ▼                      ▼
//! ┌──────────────┐      ┌────────────────┐     ┌────────────────┐
//! │  partition   │      │   translate    │     │  RecordClient  │
//! │  (per zone)  │      │ (ids, names)   │     │  (mutations)   │
//! └──────────────┘      └────────────────┘     └────────────────┘
//! ```
//!
//! ## Apply Flow (per zone with changes)
//!
//! 1. Fetch the zone's current records (one read call)
//! 2. Translate all four change lists against that snapshot
//! 3. update-old → delete → create → update-new
//! 4. The first failing call aborts the whole operation

use crate::error::{Error, Result};
use crate::model::{APEX_MARKER, ChangeKind, Changes, Endpoint, ProviderRecord};
use crate::partition::partition;
use crate::traits::{Provider, RecordClient};
use crate::translate::to_provider_records;
use crate::zone::DomainFilter;
use async_trait::async_trait;
use tracing::{debug, error, info};

/// Reconciles orchestrator change sets against a provider's record API
///
/// ## Threading
///
/// All remote calls of one operation are awaited sequentially. The
/// reconciler holds no mutable state and can be shared across requests.
/// Concurrent operations on the same zone are not serialized.
pub struct Reconciler {
    /// Remote record API
    client: Box<dyn RecordClient>,

    /// Permitted zones
    domain_filter: DomainFilter,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Parameters
    ///
    /// - `client`: Record API client
    /// - `domain_filter`: Permitted zones
    pub fn new(client: Box<dyn RecordClient>, domain_filter: DomainFilter) -> Self {
        Self {
            client,
            domain_filter,
        }
    }

    /// List current records of every permitted zone as endpoints
    ///
    /// A record named `@` (or `@.`-prefixed) is exposed under the bare zone
    /// name; every other name is exposed as the provider returned it.
    ///
    /// # Errors
    ///
    /// Fails on the first zone that cannot be read and on the first record
    /// whose TTL is not an integer.
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        let mut endpoints = Vec::new();

        for zone in self.domain_filter.zones() {
            debug!("Retrieving records for zone {}", zone);
            let records = self
                .client
                .list_records(zone)
                .await
                .map_err(|e| Error::zone_query(zone.as_str(), e))?;
            info!("Got {} DNS record(s) for zone {}", records.len(), zone);

            for record in &records {
                debug!("Processing record {}", record);
                endpoints.push(to_endpoint(record, zone)?);
            }
        }

        for endpoint in &endpoints {
            debug!("Endpoint collected: {}", endpoint);
        }

        Ok(endpoints)
    }

    /// Apply a change set
    ///
    /// Zones are processed in configured order. Nothing is rolled back when
    /// a call fails: mutations already issued stay applied.
    pub async fn apply(&self, changes: &Changes) -> Result<()> {
        if !changes.has_changes() {
            debug!("No changes detected - nothing to do");
            return Ok(());
        }

        for zone_changes in partition(changes, &self.domain_filter) {
            if !zone_changes.changes.has_changes() {
                continue;
            }
            self.apply_zone(&zone_changes.zone, &zone_changes.changes)
                .await?;
        }

        debug!("Update completed");
        Ok(())
    }

    async fn apply_zone(&self, zone: &str, changes: &Changes) -> Result<()> {
        // Ids for update/delete calls come from this snapshot
        let current = self.client.list_records(zone).await.map_err(|e| {
            error!("Unable to get DNS records for zone {}: {}", zone, e);
            Error::zone_query(zone, e)
        })?;

        let mut planned: Vec<(ChangeKind, Vec<ProviderRecord>)> = Vec::new();
        for kind in ChangeKind::APPLY_ORDER {
            planned.push((kind, to_provider_records(changes.get(kind), zone, &current)?));
        }

        info!(
            "Applying {} change(s) to zone {} ({} existing record(s))",
            changes.len(),
            zone,
            current.len()
        );

        for (kind, records) in &planned {
            match kind {
                ChangeKind::UpdateOld | ChangeKind::UpdateNew => {
                    self.update_records(zone, records).await?
                }
                ChangeKind::Delete => self.delete_records(zone, records).await?,
                ChangeKind::Create => self.create_records(zone, records).await?,
            }
        }

        Ok(())
    }

    /// Create each record in turn, stopping at the first failure
    async fn create_records(&self, zone: &str, records: &[ProviderRecord]) -> Result<()> {
        for record in records {
            debug!("Creating new record in zone {}: {}", zone, record);
            match self.client.create_record(zone, record).await {
                Ok(id) => debug!("Record created successfully with ID {}: {}", id, record),
                Err(e) => {
                    error!("Failed to create record in zone {}: {}: {}", zone, record, e);
                    return Err(Error::apply("create", record.to_string(), e));
                }
            }
        }
        Ok(())
    }

    /// Update each record in turn, stopping at the first failure
    async fn update_records(&self, zone: &str, records: &[ProviderRecord]) -> Result<()> {
        for record in records {
            debug!("Updating record in zone {}: {}", zone, record);
            let id = record.numeric_id()?;
            if let Err(e) = self.client.update_record(zone, id, record).await {
                error!("Failed to update record {} in zone {}: {}: {}", id, zone, record, e);
                return Err(Error::apply("update", record.to_string(), e));
            }
            debug!("Record updated successfully: {}", record);
        }
        Ok(())
    }

    /// Delete each record in turn, stopping at the first failure
    async fn delete_records(&self, zone: &str, records: &[ProviderRecord]) -> Result<()> {
        for record in records {
            debug!("Deleting record in zone {}: {}", zone, record);
            let id = record.numeric_id()?;
            if let Err(e) = self.client.delete_record(zone, id).await {
                error!("Failed to delete record {} in zone {}: {}: {}", id, zone, record, e);
                return Err(Error::apply("delete", record.to_string(), e));
            }
            debug!("Record deleted successfully: {}", record);
        }
        Ok(())
    }
}

/// Normalize a provider record into an endpoint for the orchestrator
fn to_endpoint(record: &ProviderRecord, zone: &str) -> Result<Endpoint> {
    let name = match record.name.split('.').next() {
        Some(APEX_MARKER) => zone.to_string(),
        _ => record.name.clone(),
    };

    let ttl: i64 = record.ttl.parse().map_err(|e| {
        Error::malformed(format!(
            "unable to parse TTL value '{}' of {}: {}",
            record.ttl, record, e
        ))
    })?;

    Ok(Endpoint::new(name, record.record_type.as_str(), [record.content.as_str()]).with_ttl(ttl))
}

#[async_trait]
impl Provider for Reconciler {
    async fn records(&self) -> Result<Vec<Endpoint>> {
        self.list_endpoints().await
    }

    async fn apply_changes(&self, changes: &Changes) -> Result<()> {
        self.apply(changes).await
    }

    fn domain_filter(&self) -> &DomainFilter {
        &self.domain_filter
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("client", &self.client.client_name())
            .field("domain_filter", &self.domain_filter)
            .finish()
    }
}
