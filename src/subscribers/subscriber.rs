//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging custom event handlers
//! (metrics, audit, alerting) into the executor.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and reported as `EventKind::SubscriberPanicked`)
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use nodevisor::{Event, EventKind, Subscribe};
//!
//! struct Collisions;
//!
//! #[async_trait]
//! impl Subscribe for Collisions {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::NameCollision {
//!             // page somebody
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "collisions" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for executor observability.
///
/// Handle errors internally; slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event. Events arrive in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Subscriber name used in overflow/panic events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity (clamped to a minimum of 1). Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
