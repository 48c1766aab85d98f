use serde::{Deserialize, Serialize};

use adminkit_core::{OrgUnitId, UserId};

/// The acting identity a data-scope decision is made for.
///
/// Construction is decoupled from transport and storage: the API layer derives
/// this from its session, workers from job metadata. Scoping only needs to
/// know who is acting and which organizational unit they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    /// Home unit of the principal; `None` for accounts outside the org tree
    /// (e.g. service accounts), which resolve to no accessible units.
    pub unit_id: Option<OrgUnitId>,
}

impl Principal {
    pub fn new(user_id: UserId, unit_id: Option<OrgUnitId>) -> Self {
        Self { user_id, unit_id }
    }
}
