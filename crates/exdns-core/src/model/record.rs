use std::fmt;

/// Name the provider uses for the zone apex
pub const APEX_MARKER: &str = "@";

/// A record in the provider's native shape
///
/// `id` is the string form of a provider-assigned integer and is empty when
/// the record does not exist yet. `ttl` is string-encoded as on the wire and
/// is left empty on records built for create/update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRecord {
    pub id: String,
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: String,
}

impl ProviderRecord {
    /// Parse the id for calls that address an existing record
    pub fn numeric_id(&self) -> crate::Result<i64> {
        self.id.parse().map_err(|e| {
            crate::Error::malformed(format!(
                "unable to parse record ID '{}' for {}: {}",
                self.id, self, e
            ))
        })
    }
}

impl fmt::Display for ProviderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) -> {}", self.name, self.record_type, self.content)
    }
}
