//! Executor events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `NodeMainExecutor`, the per-node `RegistrationListener`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the executor's subscriber listener (fans out to
//!   `SubscriberSet`) and any receiver from `NodeMainExecutor::subscribe()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
