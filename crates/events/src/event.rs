use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adminkit_core::UserId;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - designed to be **append-only**
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "admin.users.deleted").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Backend users were deleted by an administrator.
///
/// Carries the whole batch of one delete operation so listeners can process
/// it atomically (session invalidation revokes per user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersDeleted {
    pub user_ids: Vec<UserId>,
    pub occurred_at: DateTime<Utc>,
}

impl Event for UsersDeleted {
    fn event_type(&self) -> &'static str {
        "admin.users.deleted"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
