use super::Endpoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of change external-dns hands to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    UpdateOld,
    UpdateNew,
    Delete,
}

impl ChangeKind {
    /// All kinds, in the order they appear in a change set
    pub const ALL: [ChangeKind; 4] = [
        ChangeKind::Create,
        ChangeKind::UpdateOld,
        ChangeKind::UpdateNew,
        ChangeKind::Delete,
    ];

    /// Order in which mutating calls are issued within a zone.
    ///
    /// Records that already exist (update-old, delete) are touched with ids
    /// from the pre-change snapshot before anything new is created, and
    /// update-new runs once creation has settled.
    pub const APPLY_ORDER: [ChangeKind; 4] = [
        ChangeKind::UpdateOld,
        ChangeKind::Delete,
        ChangeKind::Create,
        ChangeKind::UpdateNew,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::UpdateOld => "updateOld",
            ChangeKind::UpdateNew => "updateNew",
            ChangeKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change set as computed by the orchestrator's plan
///
/// `update_old[i]` and `update_new[i]` describe the same record before and
/// after the transition. That pairing is trusted, not verified.
///
/// Keys are written in PascalCase. camelCase, lowercase and snake_case keys
/// are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Changes {
    #[serde(default, alias = "create", skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<Endpoint>,

    #[serde(
        default,
        alias = "updateOld",
        alias = "updateold",
        alias = "update_old",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub update_old: Vec<Endpoint>,

    #[serde(
        default,
        alias = "updateNew",
        alias = "updatenew",
        alias = "update_new",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub update_new: Vec<Endpoint>,

    #[serde(default, alias = "delete", skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any of the four lists has an entry
    pub fn has_changes(&self) -> bool {
        ChangeKind::ALL.iter().any(|kind| !self.get(*kind).is_empty())
    }

    /// The list holding changes of the given kind
    pub fn get(&self, kind: ChangeKind) -> &[Endpoint] {
        match kind {
            ChangeKind::Create => &self.create,
            ChangeKind::UpdateOld => &self.update_old,
            ChangeKind::UpdateNew => &self.update_new,
            ChangeKind::Delete => &self.delete,
        }
    }

    /// Append an endpoint to the list of the given kind
    pub fn push(&mut self, kind: ChangeKind, endpoint: Endpoint) {
        match kind {
            ChangeKind::Create => self.create.push(endpoint),
            ChangeKind::UpdateOld => self.update_old.push(endpoint),
            ChangeKind::UpdateNew => self.update_new.push(endpoint),
            ChangeKind::Delete => self.delete.push(endpoint),
        }
    }

    /// Total number of endpoints across all lists
    pub fn len(&self) -> usize {
        ChangeKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_changes()
    }
}
