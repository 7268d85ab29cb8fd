//! # Node lifecycle listeners.
//!
//! Provides [`NodeListener`], the callback surface a node drives on each of its
//! lifecycle transitions, and [`NodeListeners`], an ordered listener list node
//! implementations can embed.
//!
//! ## Rules
//! - Listeners are invoked in registration order, one after another.
//! - The executor's own bookkeeping listener is always first, the program second,
//!   caller-supplied listeners after that.
//! - The list lock is never held while a listener runs, so a listener may call
//!   back into the node (e.g. [`Node::remove_listeners`](crate::Node::remove_listeners)).

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::NodeError;
use crate::node::NodeRef;

/// Shared handle to a listener.
pub type NodeListenerRef = Arc<dyn NodeListener>;

/// Observer of one node's lifecycle. Every callback defaults to a no-op.
#[async_trait]
pub trait NodeListener: Send + Sync + 'static {
    /// The node is connected and running.
    async fn on_start(&self, _node: &NodeRef) {}

    /// The node has begun shutting down.
    async fn on_shutdown(&self, _node: &NodeRef) {}

    /// The node has released all of its resources.
    async fn on_shutdown_complete(&self, _node: &NodeRef) {}

    /// The node hit an error. It may or may not shut down afterwards.
    async fn on_error(&self, _node: &NodeRef, _error: &NodeError) {}
}

/// Ordered listener list for node implementations.
#[derive(Default)]
pub struct NodeListeners {
    inner: Mutex<Vec<NodeListenerRef>>,
}

impl NodeListeners {
    pub fn new(listeners: Vec<NodeListenerRef>) -> Self {
        Self {
            inner: Mutex::new(listeners),
        }
    }

    pub fn add(&self, listener: NodeListenerRef) {
        self.lock().push(listener);
    }

    /// Drops every listener.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub async fn signal_start(&self, node: &NodeRef) {
        for l in self.snapshot() {
            l.on_start(node).await;
        }
    }

    pub async fn signal_shutdown(&self, node: &NodeRef) {
        for l in self.snapshot() {
            l.on_shutdown(node).await;
        }
    }

    pub async fn signal_shutdown_complete(&self, node: &NodeRef) {
        for l in self.snapshot() {
            l.on_shutdown_complete(node).await;
        }
    }

    pub async fn signal_error(&self, node: &NodeRef, error: &NodeError) {
        for l in self.snapshot() {
            l.on_error(node, error).await;
        }
    }

    fn snapshot(&self) -> Vec<NodeListenerRef> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<NodeListenerRef>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
