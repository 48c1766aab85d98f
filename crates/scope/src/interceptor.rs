//! Query authorization interceptor.
//!
//! Two interception paths meet here: declared service calls, which establish
//! the ambient permission to scope (the `IDLE → SCOPING → IDLE` span), and
//! raw query-builder operations, which consult that permission when they
//! execute. The interceptor never owns the builder and never swallows errors
//! from the wrapped continuation.

use crate::context::ScopeContext;
use crate::declaration::{CallSite, DeclarationRegistry};
use crate::filter::{Passthrough, RowFilter};

/// Query-builder operations subject to interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    Select,
    Update,
    Delete,
}

/// Wraps service calls and builder operations with data-scope handling.
#[derive(Debug, Clone)]
pub struct QueryInterceptor<F = Passthrough> {
    declarations: DeclarationRegistry,
    filter: F,
}

impl QueryInterceptor<Passthrough> {
    pub fn new(declarations: DeclarationRegistry) -> Self {
        Self {
            declarations,
            filter: Passthrough,
        }
    }
}

impl<F> QueryInterceptor<F> {
    pub fn with_filter(declarations: DeclarationRegistry, filter: F) -> Self {
        Self {
            declarations,
            filter,
        }
    }

    pub fn declarations(&self) -> &DeclarationRegistry {
        &self.declarations
    }

    /// Wrap a service call that may carry a scope declaration.
    ///
    /// If the registry resolves a policy for `site`, the context is activated
    /// for the duration of `proceed` and cleared once it settles — on success,
    /// error return, and unwind alike. The continuation's result is returned
    /// unchanged. Sites without a declaration pass through untouched.
    pub fn around_call<R, E>(
        &self,
        ctx: &ScopeContext,
        site: CallSite<'_>,
        proceed: impl FnOnce() -> Result<R, E>,
    ) -> Result<R, E> {
        let Some(policy) = self.declarations.resolve(&site) else {
            return proceed();
        };

        let _scope = ctx.activate(policy.clone());
        proceed()
    }

    /// Wrap one query-builder operation.
    ///
    /// Selects route through the row filter when scoping is active. Updates
    /// and deletes currently execute unscoped even under an active policy;
    /// the miss is logged so the mutation gap stays observable.
    pub fn around_query<B, R, E>(
        &self,
        ctx: &ScopeContext,
        op: QueryOp,
        builder: &mut B,
        proceed: impl FnOnce(&mut B) -> Result<R, E>,
    ) -> Result<R, E>
    where
        F: RowFilter<B>,
    {
        match op {
            QueryOp::Select => {
                if let Some(policy) = ctx.active_policy() {
                    self.filter.apply(&policy, builder);
                }
                proceed(builder)
            }
            QueryOp::Update | QueryOp::Delete => {
                if ctx.is_active() {
                    tracing::debug!(?op, "scope active; scoping is not applied to mutations");
                }
                proceed(builder)
            }
        }
    }
}
