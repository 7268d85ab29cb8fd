//! # Non-blocking event fan-out to multiple subscribers.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Overflow**: event dropped for that subscriber only, `SubscriberOverflow` published
//! - **Per-subscriber FIFO**, no cross-subscriber ordering
//! - **Isolation**: a panicking subscriber keeps its worker and does not affect others

use std::sync::Arc;

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event subscribers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber on `handle`.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus, handle: &Handle) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            let worker_bus = bus.clone();

            let worker = handle.spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        tracing::error!(subscriber = name, %info, "subscriber panicked");
                        worker_bus.publish(Event::subscriber_panicked(name, info));
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(worker);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all subscribers without waiting for them.
    ///
    /// Overflow events are never re-reported, so overflow cannot loop.
    pub fn emit(&self, event: &Event) {
        let event = Arc::new(event.clone());
        let is_overflow_evt = matches!(event.kind, EventKind::SubscriberOverflow);

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                tracing::warn!(subscriber = channel.name, reason, "subscriber dropped event");
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Closes all queues and waits for the workers to drain them.
    pub async fn shutdown(self) {
        drop(self.channels);
        for w in self.workers {
            let _ = w.await;
        }
    }
}
