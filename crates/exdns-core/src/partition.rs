//! Per-zone partitioning of a change set

use crate::model::{ChangeKind, Changes};
use crate::zone::DomainFilter;
use tracing::debug;

/// Changes that belong to a single zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneChanges {
    pub zone: String,
    pub changes: Changes,
}

/// Split `changes` by owning zone
///
/// Returns one entry per permitted zone, in configured order, even when a
/// zone receives no changes. Endpoints outside every permitted zone are
/// dropped: they are outside this provider's authority, not an error.
pub fn partition(changes: &Changes, filter: &DomainFilter) -> Vec<ZoneChanges> {
    let mut per_zone: Vec<ZoneChanges> = filter
        .zones()
        .iter()
        .map(|zone| {
            debug!("Zone detected: {}", zone);
            ZoneChanges {
                zone: zone.clone(),
                changes: Changes::new(),
            }
        })
        .collect();

    for kind in ChangeKind::ALL {
        for endpoint in changes.get(kind) {
            let Some(zone) = filter.match_zone(&endpoint.dns_name) else {
                debug!(
                    "Ignoring {} change since it did not match any zone: {}",
                    kind, endpoint
                );
                continue;
            };

            debug!("Planning {} in zone {}: {}", kind, zone, endpoint);

            if let Some(entry) = per_zone.iter_mut().find(|entry| entry.zone == zone) {
                entry.changes.push(kind, endpoint.clone());
            }
        }
    }

    per_zone
}
