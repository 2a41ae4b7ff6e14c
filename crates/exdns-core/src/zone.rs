//! Permitted zones and zone matching
//!
//! A [`DomainFilter`] is the fixed list of zone suffixes this provider is
//! allowed to manage. [`match_zone`] picks the zone that owns a DNS name.

use crate::error::{Error, Result};
use serde::Serialize;

/// Immutable, non-empty list of permitted zones in configured order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainFilter {
    #[serde(rename = "include")]
    zones: Vec<String>,
}

impl DomainFilter {
    /// Build a filter from configured zone suffixes
    ///
    /// Entries are trimmed, lose a trailing dot and are lower-cased.
    /// Duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the list is empty or any entry is
    /// empty after normalization.
    pub fn new<I, S>(zones: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for zone in zones {
            let zone = normalize_zone(zone.as_ref());
            if zone.is_empty() {
                return Err(Error::config("domain filter contains an empty zone"));
            }
            if !normalized.contains(&zone) {
                normalized.push(zone);
            }
        }

        if normalized.is_empty() {
            return Err(Error::config(
                "at least one zone must be configured in the domain filter",
            ));
        }

        Ok(Self { zones: normalized })
    }

    /// The permitted zones, in configured order
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    /// Owning zone for `name`, see [`match_zone`]
    pub fn match_zone(&self, name: &str) -> Option<&str> {
        match_zone(name, &self.zones)
    }
}

fn normalize_zone(zone: &str) -> String {
    let zone = zone.trim();
    zone.strip_suffix('.').unwrap_or(zone).to_lowercase()
}

/// Pick the zone owning `name`: the longest zone that is a suffix of it
///
/// When two zones of equal length both match, the one configured first
/// wins. Returns `None` when no zone matches; callers skip such names.
pub fn match_zone<'a>(name: &str, zones: &'a [String]) -> Option<&'a str> {
    let mut matched: Option<&'a str> = None;

    for zone in zones {
        if !name.ends_with(zone.as_str()) {
            continue;
        }
        if matched.is_none_or(|current| zone.len() > current.len()) {
            matched = Some(zone.as_str());
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(list: &[&str]) -> Vec<String> {
        list.iter().map(|z| z.to_string()).collect()
    }

    #[test]
    fn test_longest_suffix_wins() {
        let zones = zones(&["example.com", "sub.example.com"]);

        assert_eq!(match_zone("a.sub.example.com", &zones), Some("sub.example.com"));
        assert_eq!(match_zone("a.example.com", &zones), Some("example.com"));
        assert_eq!(match_zone("a.other.org", &zones), None);
    }

    #[test]
    fn test_longest_suffix_independent_of_order() {
        let zones = zones(&["sub.example.com", "example.com"]);
        assert_eq!(match_zone("a.sub.example.com", &zones), Some("sub.example.com"));
    }

    #[test]
    fn test_apex_matches_its_own_zone() {
        let zones = zones(&["example.com"]);
        assert_eq!(match_zone("example.com", &zones), Some("example.com"));
    }

    #[test]
    fn test_equal_length_tie_goes_to_first_configured() {
        // Equal-length suffixes of one name are identical, so a tie only
        // happens with duplicate entries in an unnormalized list
        let zones = zones(&["b.example.com", "b.example.com"]);
        let name = "a.b.example.com";
        let matched = match_zone(name, &zones).unwrap();
        assert!(std::ptr::eq(matched, zones[0].as_str()));
    }

    #[test]
    fn test_filter_normalizes_entries() {
        let filter =
            DomainFilter::new([" Example.COM. ", "sub.example.com", "example.com"]).unwrap();
        assert_eq!(
            filter.zones(),
            &["example.com".to_string(), "sub.example.com".to_string()]
        );
    }

    #[test]
    fn test_filter_rejects_empty_list() {
        let err = DomainFilter::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_filter_rejects_empty_zone() {
        let err = DomainFilter::new(["example.com", "  "]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_filter_serializes_as_include_list() {
        let filter = DomainFilter::new(["example.com"]).unwrap();
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!({ "include": ["example.com"] }));
    }
}
