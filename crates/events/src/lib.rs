//! `adminkit-events` — admin domain events and their distribution.
//!
//! Events emitted by admin operations (user deletion, etc.) and the pub/sub
//! plumbing that carries them to listeners such as session invalidation.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod listener;

pub use bus::{EventBus, Subscription};
pub use event::{Event, UsersDeleted};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use listener::{SessionInvalidator, SessionStore};
