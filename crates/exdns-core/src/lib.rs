// # exdns-core
//
// Core library of the external-dns webhook provider.
//
// ## Architecture Overview
//
// This library maps external-dns change sets onto a DNS provider's record API:
// - **DomainFilter / match_zone**: Which permitted zone owns a DNS name
// - **translate**: Endpoint → provider record (apex naming, TXT unquoting, ids)
// - **partition**: Split a change set by owning zone
// - **Reconciler**: Apply per-zone changes in a safe order and list records
// - **RecordClient**: Trait for the provider's remote record API
// - **Provider**: Trait for the contract exposed to external-dns
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Mapping logic is separate from API clients
// 2. **Fail Fast**: The first failing remote call aborts the operation
// 3. **Stateless**: Records are fetched fresh for every operation
// 4. **Library-First**: The daemon is a thin layer over this crate

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod partition;
pub mod traits;
pub mod translate;
pub mod zone;

// Re-export core types for convenience
pub use config::{ProviderConfig, WebhookConfig};
pub use engine::Reconciler;
pub use error::{Error, Result};
pub use model::{ChangeKind, Changes, Endpoint, ProviderRecord};
pub use partition::{ZoneChanges, partition};
pub use traits::{Provider, ProviderFactory, RecordClient};
pub use zone::{DomainFilter, match_zone};
