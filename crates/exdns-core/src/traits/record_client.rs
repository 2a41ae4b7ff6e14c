// # Record Client Trait
//
// Defines the interface to a DNS provider's record API.
//
// ## Implementations
//
// - Porkbun: `exdns-provider-porkbun` crate
//
// ## Usage
//
// ```rust,ignore
// use exdns_core::RecordClient;
//
// #[tokio::main]
// async fn main() -> exdns_core::Result<()> {
//     let client = /* RecordClient implementation */;
//
//     for record in client.list_records("example.com").await? {
//         println!("{} {} {}", record.name, record.record_type, record.content);
//     }
//
//     Ok(())
// }
// ```

use crate::model::ProviderRecord;
use async_trait::async_trait;

/// Trait for provider record API clients
///
/// One method per remote call. Implementations translate between
/// [`ProviderRecord`] and the provider's wire format and nothing else.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Constraints
///
/// - One remote request per method call
/// - No retry or backoff: return the error, the caller decides
/// - No caching of records between calls
/// - Credentials never appear in logs or error messages
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Fetch every record currently held for `zone`
    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>, crate::Error>;

    /// Create `record` in `zone`
    ///
    /// # Returns
    ///
    /// The provider-assigned id of the new record
    async fn create_record(
        &self,
        zone: &str,
        record: &ProviderRecord,
    ) -> Result<String, crate::Error>;

    /// Overwrite the record with `id` in `zone` with the contents of `record`
    async fn update_record(
        &self,
        zone: &str,
        id: i64,
        record: &ProviderRecord,
    ) -> Result<(), crate::Error>;

    /// Delete the record with `id` from `zone`
    async fn delete_record(&self, zone: &str, id: i64) -> Result<(), crate::Error>;

    /// Get the client name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "porkbun")
    fn client_name(&self) -> &'static str;
}
