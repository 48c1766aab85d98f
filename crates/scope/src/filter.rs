use adminkit_core::OrgUnitId;

use crate::declaration::PolicyId;
use crate::principal::Principal;

/// Row-filter extension point for scoped selects.
///
/// When a select runs with scoping active, the interceptor hands the active
/// policy and the caller-owned builder to this trait before proceeding. What
/// predicate a policy translates to is owned by the implementation; the
/// interceptor only routes.
pub trait RowFilter<B> {
    fn apply(&self, policy: &PolicyId, builder: &mut B);
}

impl<B, F> RowFilter<B> for &F
where
    F: RowFilter<B> + ?Sized,
{
    fn apply(&self, policy: &PolicyId, builder: &mut B) {
        (**self).apply(policy, builder)
    }
}

/// Default filter: leaves the query untouched.
///
/// Predicate injection is a policy-specific extension point that is not wired
/// up here. A scoped select that reaches this filter runs unscoped; the miss
/// is logged so the gap stays visible in traces rather than silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl<B> RowFilter<B> for Passthrough {
    fn apply(&self, policy: &PolicyId, _builder: &mut B) {
        tracing::debug!(
            policy = %policy,
            "scope active but no row filter configured; select runs unscoped"
        );
    }
}

/// Ambient-identity collaborator: which organizational units a principal may
/// reach. Implementations live next to the org-tree domain, not here.
pub trait UnitAccessResolver {
    fn accessible_units(&self, principal: &Principal) -> Vec<OrgUnitId>;
}
