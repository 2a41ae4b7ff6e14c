//! Endpoint → provider record translation
//!
//! Translation happens against a snapshot of the zone's current records so
//! that records which already exist carry their provider id.

use crate::error::{Error, Result};
use crate::model::{APEX_MARKER, Endpoint, ProviderRecord, RECORD_TYPE_TXT};
use tracing::debug;

/// Prefix of ownership TXT values written pre-quoted by external-dns
const QUOTED_HERITAGE_PREFIX: &str = "\"heritage=";

/// Translate an endpoint into the provider's record shape for `zone`
///
/// The id is resolved by matching (type, content, original DNS name) against
/// `current`; it stays empty when no record matches. TTL is not written.
///
/// # Errors
///
/// Returns a malformed data error if the endpoint has no targets.
pub fn to_provider_record(
    endpoint: &Endpoint,
    zone: &str,
    current: &[ProviderRecord],
) -> Result<ProviderRecord> {
    debug!("Converting endpoint to provider record: {}", endpoint);

    let target = endpoint.first_target().ok_or_else(|| {
        Error::malformed(format!("endpoint {} has no targets", endpoint.dns_name))
    })?;
    let content = record_content(&endpoint.record_type, target);

    Ok(ProviderRecord {
        id: resolve_id(&endpoint.dns_name, content, &endpoint.record_type, current),
        record_type: endpoint.record_type.clone(),
        name: relative_name(&endpoint.dns_name, zone),
        content: content.to_string(),
        ttl: String::new(),
    })
}

/// Translate every endpoint of one change list
pub fn to_provider_records(
    endpoints: &[Endpoint],
    zone: &str,
    current: &[ProviderRecord],
) -> Result<Vec<ProviderRecord>> {
    endpoints
        .iter()
        .map(|endpoint| to_provider_record(endpoint, zone, current))
        .collect()
}

/// Name relative to `zone`, with the apex written as `@`
pub fn relative_name(dns_name: &str, zone: &str) -> String {
    let suffix = format!(".{}", zone);
    let name = dns_name.strip_suffix(suffix.as_str()).unwrap_or(dns_name);

    if name == zone {
        APEX_MARKER.to_string()
    } else {
        name.to_string()
    }
}

/// Record content for a target, unquoting heritage TXT values
pub fn record_content<'a>(record_type: &str, target: &'a str) -> &'a str {
    if record_type != RECORD_TYPE_TXT || !target.starts_with(QUOTED_HERITAGE_PREFIX) {
        return target;
    }

    let unquoted = &target[1..];
    unquoted.strip_suffix('"').unwrap_or(unquoted)
}

/// Find the id of the record matching (type, content, name) exactly
///
/// Returns an empty string when no record matches.
pub fn resolve_id(
    name: &str,
    content: &str,
    record_type: &str,
    current: &[ProviderRecord],
) -> String {
    debug!(
        "Getting ID for record: {} {} {} ({} candidate(s))",
        name,
        record_type,
        content,
        current.len()
    );

    current
        .iter()
        .find(|rec| rec.record_type == record_type && rec.content == content && rec.name == name)
        .map(|rec| rec.id.clone())
        .unwrap_or_default()
}
