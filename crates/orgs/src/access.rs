use adminkit_core::OrgUnitId;
use adminkit_scope::{Principal, UnitAccessResolver};

use crate::directory::OrgUnitDirectory;

/// Resolves a principal's accessible units from the org tree.
///
/// The rule is hierarchical: a principal reaches its home unit and everything
/// below it. Principals without a home unit (or with a unit no longer in the
/// directory) reach nothing.
#[derive(Debug, Clone, Copy)]
pub struct TreeUnitAccess<'a> {
    directory: &'a OrgUnitDirectory,
}

impl<'a> TreeUnitAccess<'a> {
    pub fn new(directory: &'a OrgUnitDirectory) -> Self {
        Self { directory }
    }
}

impl UnitAccessResolver for TreeUnitAccess<'_> {
    fn accessible_units(&self, principal: &Principal) -> Vec<OrgUnitId> {
        principal
            .unit_id
            .map(|unit| self.directory.descendants(unit))
            .unwrap_or_default()
    }
}
