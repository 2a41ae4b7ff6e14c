//! Test doubles and common utilities for reconciliation contract tests
//!
//! The recording client keeps an in-memory record set per zone and logs
//! every remote call in the order it was made.

#![allow(dead_code)]

use exdns_core::error::{Error, Result};
use exdns_core::{DomainFilter, ProviderRecord, Reconciler, RecordClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A remote call as observed by the recording client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { zone: String },
    Create {
        zone: String,
        name: String,
        record_type: String,
        content: String,
    },
    Update {
        zone: String,
        id: i64,
        name: String,
        content: String,
    },
    Delete { zone: String, id: i64 },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::List { .. })
    }
}

/// Which call should fail, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Nothing,
    List,
    Create,
    Update,
    Delete,
}

/// A RecordClient that records calls and serves seeded records
pub struct RecordingClient {
    calls: Arc<Mutex<Vec<Call>>>,
    records: Arc<Mutex<HashMap<String, Vec<ProviderRecord>>>>,
    fail_on: FailOn,
    next_id: Arc<Mutex<i64>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            records: Arc::new(Mutex::new(HashMap::new())),
            fail_on: FailOn::Nothing,
            next_id: Arc::new(Mutex::new(1000)),
        }
    }

    /// Make every call of the given kind fail
    pub fn failing_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = fail_on;
        self
    }

    /// Seed a record in `zone`
    pub fn with_record(
        self,
        zone: &str,
        id: &str,
        record_type: &str,
        name: &str,
        content: &str,
        ttl: &str,
    ) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(zone.to_string())
            .or_default()
            .push(ProviderRecord {
                id: id.to_string(),
                record_type: record_type.to_string(),
                name: name.to_string(),
                content: content.to_string(),
                ttl: ttl.to_string(),
            });
        self
    }

    /// Create a client that shares the call log and records with `other`
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            calls: Arc::clone(&other.calls),
            records: Arc::clone(&other.records),
            fail_on: other.fail_on,
            next_id: Arc::clone(&other.next_id),
        }
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the mutating calls made so far, in order
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail(&self, what: FailOn) -> Result<()> {
        if self.fail_on == what {
            Err(Error::provider("recording", format!("{:?} unavailable", what)))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl RecordClient for RecordingClient {
    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>> {
        self.record(Call::List { zone: zone.to_string() });
        self.fail(FailOn::List)?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(zone)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_record(&self, zone: &str, record: &ProviderRecord) -> Result<String> {
        self.record(Call::Create {
            zone: zone.to_string(),
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
        });
        self.fail(FailOn::Create)?;

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(next_id.to_string())
    }

    async fn update_record(&self, zone: &str, id: i64, record: &ProviderRecord) -> Result<()> {
        self.record(Call::Update {
            zone: zone.to_string(),
            id,
            name: record.name.clone(),
            content: record.content.clone(),
        });
        self.fail(FailOn::Update)
    }

    async fn delete_record(&self, zone: &str, id: i64) -> Result<()> {
        self.record(Call::Delete {
            zone: zone.to_string(),
            id,
        });
        self.fail(FailOn::Delete)
    }

    fn client_name(&self) -> &'static str {
        "recording"
    }
}

/// Build a reconciler over a client sharing state with `client`
pub fn reconciler(client: &RecordingClient, zones: &[&str]) -> Reconciler {
    Reconciler::new(
        Box::new(RecordingClient::sharing_state_with(client)),
        DomainFilter::new(zones.iter().copied()).expect("valid domain filter"),
    )
}
