use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Record type string for TXT records
pub const RECORD_TYPE_TXT: &str = "TXT";

/// A provider-specific key/value attached to an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    pub name: String,
    pub value: String,
}

/// Provider-agnostic DNS record
///
/// This is the shape external-dns sends and expects on the webhook wire.
/// Only `dns_name`, `record_type`, the first target and the TTL carry
/// meaning for the reconciler; the remaining fields are passed through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified name, without trailing dot
    pub dns_name: String,

    /// Record values; only the first one is used
    #[serde(default)]
    pub targets: Vec<String>,

    /// Record type (A, AAAA, CNAME, TXT, ...)
    pub record_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,

    /// Time-to-live in seconds, `None` when unset
    #[serde(
        rename = "recordTTL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub record_ttl: Option<i64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

impl Endpoint {
    /// Create an endpoint without TTL
    pub fn new(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            record_type: record_type.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.record_ttl = Some(ttl);
        self
    }

    /// The target the provider record is built from
    pub fn first_target(&self) -> Option<&str> {
        self.targets.first().map(String::as_str)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.dns_name)?;
        if let Some(ttl) = self.record_ttl {
            write!(f, "{} ", ttl)?;
        }
        write!(f, "IN {} [{}]", self.record_type, self.targets.join(";"))?;
        if !self.set_identifier.is_empty() {
            write!(f, " {}", self.set_identifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_wire_names() {
        let ep = Endpoint::new("www.example.com", "A", ["1.2.3.4"]).with_ttl(300);
        let json = serde_json::to_value(&ep).unwrap();

        assert_eq!(json["dnsName"], "www.example.com");
        assert_eq!(json["recordType"], "A");
        assert_eq!(json["recordTTL"], 300);
        assert_eq!(json["targets"][0], "1.2.3.4");
        assert!(json.get("labels").is_none());
        assert!(json.get("setIdentifier").is_none());
    }

    #[test]
    fn test_endpoint_from_orchestrator_payload() {
        let payload = r#"{
            "dnsName": "txt.example.com",
            "targets": ["\"heritage=external-dns,external-dns/owner=default\""],
            "recordType": "TXT",
            "labels": {"owner": "default"}
        }"#;

        let ep: Endpoint = serde_json::from_str(payload).unwrap();
        assert_eq!(ep.dns_name, "txt.example.com");
        assert_eq!(ep.record_ttl, None);
        assert_eq!(ep.labels.get("owner").map(String::as_str), Some("default"));
        assert!(ep.first_target().unwrap().starts_with("\"heritage="));
    }

    #[test]
    fn test_display() {
        let ep = Endpoint::new("example.com", "A", ["1.2.3.4", "5.6.7.8"]).with_ttl(600);
        assert_eq!(ep.to_string(), "example.com 600 IN A [1.2.3.4;5.6.7.8]");
    }
}
