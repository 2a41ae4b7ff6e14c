//! Data model shared by the orchestrator-facing and provider-facing sides
//!
//! - [`Endpoint`]: provider-agnostic record as exchanged with external-dns
//! - [`Changes`]: the four-way change set computed by the orchestrator
//! - [`ProviderRecord`]: the provider's native record shape

pub mod changes;
pub mod endpoint;
pub mod record;

pub use changes::{ChangeKind, Changes};
pub use endpoint::{Endpoint, ProviderSpecificProperty, RECORD_TYPE_TXT};
pub use record::{APEX_MARKER, ProviderRecord};
