use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adminkit_core::{OrgUnitId, UserId};

/// Whether a unit is visible to pickers and scope resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Enabled,
    Disabled,
}

/// One node of the organizational tree.
///
/// `ancestors` is the root-first path to this unit (empty for roots). It is
/// derived from `parent_id` by the directory on insert/reparent and is what
/// makes "unit and all descendants" queries a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub id: OrgUnitId,
    pub parent_id: Option<OrgUnitId>,
    pub ancestors: Vec<OrgUnitId>,
    pub name: String,
    /// Display weight; siblings are ordered by `sort` descending.
    pub sort: u32,
    pub status: UnitStatus,
}

impl OrgUnit {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether `candidate` sits on this unit's path to the root.
    pub fn has_ancestor(&self, candidate: OrgUnitId) -> bool {
        self.ancestors.contains(&candidate)
    }
}

/// A user assigned as leader of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLeader {
    pub user_id: UserId,
    pub assigned_at: DateTime<Utc>,
}
