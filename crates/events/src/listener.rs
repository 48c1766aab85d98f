use adminkit_core::UserId;

use crate::bus::Subscription;
use crate::event::UsersDeleted;

/// Session-storage collaborator.
///
/// The actual store (Redis, database, in-process map) lives with the host;
/// this listener only needs to revoke by user.
pub trait SessionStore {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    /// Revoke every session of `user`. Returns whether any session existed.
    /// Revoking a user with no sessions is a no-op, not an error.
    fn revoke(&self, user: &UserId) -> Result<bool, Self::Error>;
}

/// Invalidates sessions of deleted users.
///
/// Deleting a user must not leave a live session behind, so this listener
/// consumes [`UsersDeleted`] events and revokes per deleted user. Store
/// errors abort the batch and surface to the caller; re-running the batch is
/// safe because revocation is idempotent.
#[derive(Debug)]
pub struct SessionInvalidator<S> {
    store: S,
}

impl<S> SessionInvalidator<S>
where
    S: SessionStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Handle one deletion event. Returns how many users had live sessions.
    pub fn on_users_deleted(&self, event: &UsersDeleted) -> Result<usize, S::Error> {
        let mut revoked = 0;
        for user in &event.user_ids {
            if self.store.revoke(user)? {
                revoked += 1;
                tracing::info!(user = %user, "revoked sessions of deleted user");
            }
        }
        Ok(revoked)
    }

    /// Process everything currently queued on a subscription.
    ///
    /// Intended for worker loops between blocking waits; returns the total
    /// number of users whose sessions were revoked.
    pub fn drain(&self, subscription: &Subscription<UsersDeleted>) -> Result<usize, S::Error> {
        let mut revoked = 0;
        while let Ok(event) = subscription.try_recv() {
            revoked += self.on_users_deleted(&event)?;
        }
        Ok(revoked)
    }
}
