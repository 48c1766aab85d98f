//! `adminkit-orgs` — organizational-unit tree domain.
//!
//! The unit hierarchy that data-scope policies reference: departments and
//! teams with parent/ancestor bookkeeping, unit leaders, and the resolver
//! that turns a principal into the set of units it may reach.

pub mod access;
pub mod directory;
pub mod unit;

pub use access::TreeUnitAccess;
pub use directory::{OrgUnitDirectory, UnitDraft, UnitNode};
pub use unit::{OrgUnit, UnitLeader, UnitStatus};
