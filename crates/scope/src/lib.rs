//! `adminkit-scope` — row-level data-permission core.
//!
//! Decides, per call, whether row-level scoping applies to an outgoing query,
//! based on declarations registered for the calling site and on the ambient
//! request context. Intentionally decoupled from HTTP and storage.

pub mod context;
pub mod declaration;
pub mod filter;
pub mod interceptor;
pub mod principal;

pub use context::{ActiveScope, ScopeContext};
pub use declaration::{CallSite, DeclarationRegistry, PolicyId};
pub use filter::{Passthrough, RowFilter, UnitAccessResolver};
pub use interceptor::{QueryInterceptor, QueryOp};
pub use principal::Principal;
