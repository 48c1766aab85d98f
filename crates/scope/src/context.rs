use std::cell::RefCell;

use crate::declaration::PolicyId;

/// Per-request marker signalling that data scoping is in effect.
///
/// One context belongs to one logical call chain (the host hands each inbound
/// request its own instance), so interior mutability is enough and no locking
/// is involved. The marker carries the active policy so the select path can
/// hand it to the row-filter layer; `is_active` stays a plain flag check.
#[derive(Debug, Default)]
pub struct ScopeContext {
    active: RefCell<Option<PolicyId>>,
}

impl ScopeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker and return a guard that clears it on drop.
    ///
    /// The guard releases on every exit path, including error returns and
    /// unwinding, so a failed continuation can never leak an active marker
    /// into later calls on the same chain. Activating while already active
    /// replaces the marker; the guard still clears it when dropped.
    pub fn activate(&self, policy: PolicyId) -> ActiveScope<'_> {
        *self.active.borrow_mut() = Some(policy);
        ActiveScope { context: self }
    }

    pub fn is_active(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Policy the marker was set with, if scoping is active.
    pub fn active_policy(&self) -> Option<PolicyId> {
        self.active.borrow().clone()
    }

    /// Remove the marker. Clearing an unset context is a no-op.
    pub fn clear(&self) {
        self.active.borrow_mut().take();
    }
}

/// Guard for an activated [`ScopeContext`].
#[derive(Debug)]
#[must_use = "dropping the guard clears the scope marker"]
pub struct ActiveScope<'a> {
    context: &'a ScopeContext,
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        self.context.clear();
    }
}
