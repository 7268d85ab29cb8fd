//! # Events emitted by the executor.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Submission events**: a program was accepted, or its node failed to build
//! - **Lifecycle events**: node transitions observed by the registration listener
//! - **Registry events**: claims installed, evicted, removed; shutdown outcomes
//!
//! Every event that carries a diagnostic is also logged through `tracing` at the
//! place it is published; the bus exists so subscribers (and tests) can observe
//! the same facts without scraping logs.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use nodevisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::NameCollision)
//!     .with_node("/a")
//!     .with_uri("tcp://10.0.0.2:4000")
//!     .with_reason("evicted by newer node");
//!
//! assert_eq!(ev.kind, EventKind::NameCollision);
//! assert_eq!(ev.node.as_deref(), Some("/a"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of executor events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Submission ===
    /// A program was accepted and its construction scheduled.
    ///
    /// Sets: `node` (resolved name)
    ExecuteRequested,

    /// The factory failed to build the node. Nothing was registered.
    ///
    /// Sets: `node` (resolved name), `reason`
    ConstructionFailed,

    // === Node lifecycle ===
    /// Node reported `started`.
    ///
    /// Sets: `node`, `uri`
    NodeStarted,

    /// Node reported `shutting down`.
    ///
    /// Sets: `node`
    NodeShuttingDown,

    /// Node reported `shutdown complete`.
    ///
    /// Sets: `node`
    NodeShutdownComplete,

    /// Node reported an error; it is unregistered right after.
    ///
    /// Sets: `node`, `reason`
    NodeFailed,

    // === Registry ===
    /// The node's name claim and program entry were installed.
    ///
    /// Sets: `node`, `uri`
    NodeRegistered,

    /// An incumbent holding the same name was evicted and sent a shutdown.
    ///
    /// Sets: `node` (contested name), `uri` (incumbent endpoint), `reason`
    NameCollision,

    /// The node's name claim and program entry were removed.
    ///
    /// Sets: `node`
    NodeUnregistered,

    /// `Node::shutdown` returned an error; the node was unregistered directly.
    ///
    /// Sets: `node`, `reason`
    ShutdownFailed,

    /// Global shutdown was requested (explicitly or by the exit hook).
    ///
    /// Sets: `reason` (`"explicit"` or `"exit_hook"`)
    ShutdownRequested,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `node` (subscriber name), `reason` (panic message)
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `node` (subscriber name), `reason`
    SubscriberOverflow,
}

/// Executor event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Node name (or subscriber name for subscriber events).
    pub node: Option<Arc<str>>,
    /// Node transport endpoint, if known.
    pub uri: Option<Arc<str>>,
    /// Human-readable reason.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            node: None,
            uri: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_node(mut self, node: impl Into<Arc<str>>) -> Self {
        self.node = Some(node.into());
        self
    }

    #[inline]
    pub fn with_uri(mut self, uri: impl Into<Arc<str>>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Attaches an optional endpoint; `None` leaves the field unset.
    #[inline]
    pub fn with_uri_opt(self, uri: Option<String>) -> Self {
        match uri {
            Some(u) => self.with_uri(u),
            None => self,
        }
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_node(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_node(subscriber)
            .with_reason(info)
    }
}
