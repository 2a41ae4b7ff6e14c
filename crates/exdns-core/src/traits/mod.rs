//! Core traits
//!
//! This module defines the abstract interfaces on both sides of the core.
//!
//! - [`RecordClient`]: Remote record API of a DNS provider
//! - [`Provider`]: Contract exposed to the external-dns orchestrator

pub mod provider;
pub mod record_client;

pub use provider::{Provider, ProviderFactory};
pub use record_client::RecordClient;
