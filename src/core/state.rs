//! # Shared bookkeeping: registry + index + bus.
//!
//! [`ExecutorState`] is the one piece of shared mutable state. It is reachable
//! from scheduled construction tasks, facade calls on any caller task, and
//! registration listeners driven by nodes on their own tasks.
//!
//! ## Locking
//! - `registry` and `index` each sit behind their own `RwLock`.
//! - Registration and unregistration take both write locks, always registry
//!   first, so no reader sees a node in one structure but not the other.
//! - No lock is held while a node's `shutdown` runs; nodes may fire their
//!   callbacks (and re-enter here) from inside `shutdown`.
//!
//! ## Safe shutdown
//! ```text
//! safely_shutdown(node)
//!   ├─ index.claim_shutdown(node) == false ─► already requested, skip
//!   └─ node.shutdown()
//!        ├─ Ok  ─► log; unregistration happens on the listener path
//!        └─ Err ─► log + ShutdownFailed; unregister(node) directly
//! ```
//! Both paths may end up unregistering the same node; `unregister` is idempotent.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::core::index::NodeMainIndex;
use crate::core::registry::NameRegistry;
use crate::events::{Bus, Event, EventKind};
use crate::node::{GraphName, NodeMainRef, NodeRef};

pub(crate) struct ExecutorState {
    registry: RwLock<NameRegistry>,
    index: RwLock<NodeMainIndex>,
    pub(crate) bus: Bus,
}

impl ExecutorState {
    pub(crate) fn new(bus: Bus) -> Self {
        Self {
            registry: RwLock::new(NameRegistry::new()),
            index: RwLock::new(NodeMainIndex::new()),
            bus,
        }
    }

    /// Installs `node` under its name and pairs it with `program`, then shuts
    /// down every incumbent that claimed the same name.
    ///
    /// Incumbents lose their claim and their pairing under the locks; each is
    /// shut down afterwards unless a shutdown was already requested for it. If
    /// `program` is still paired with another live node (same program submitted
    /// under a second name), `node` is registered but left unpaired.
    ///
    /// Does nothing if `retired` is already set: the node finished (or failed)
    /// before its start callback got here.
    pub(crate) async fn register(
        &self,
        program: &NodeMainRef,
        node: &NodeRef,
        retired: &AtomicBool,
    ) {
        let (evicted, paired) = {
            let mut registry = self.registry.write().await;
            let mut index = self.index.write().await;
            if retired.load(Ordering::SeqCst) {
                debug!(node = %node.name(), "node retired before registration");
                return;
            }
            let evicted: Vec<(NodeRef, bool)> = registry
                .register(node)
                .into_iter()
                .map(|incumbent| {
                    let pending = index.evict(&incumbent);
                    (incumbent, pending)
                })
                .collect();
            let paired = index.insert(program.clone(), node.clone());
            (evicted, paired)
        };

        debug!(node = %node.name(), "node registered");
        if !paired {
            warn!(
                node = %node.name(),
                "program already runs another live node; new node is not paired with it"
            );
        }
        self.bus.publish(
            Event::new(EventKind::NodeRegistered)
                .with_node(node.name().as_str())
                .with_uri_opt(node.uri()),
        );

        for (incumbent, pending) in evicted {
            let uri = incumbent.uri();
            warn!(
                node = %incumbent.name(),
                uri = uri.as_deref().unwrap_or("unknown"),
                "node name collision; existing node will be shut down"
            );
            self.bus.publish(
                Event::new(EventKind::NameCollision)
                    .with_node(incumbent.name().as_str())
                    .with_uri_opt(uri)
                    .with_reason("evicted by newer node"),
            );
            if pending {
                self.shutdown_claimed(&incumbent).await;
            } else {
                debug!(node = %incumbent.name(), "shutdown already requested");
            }
        }
    }

    /// Detaches listeners and drops the node's claim and index entry. Idempotent.
    pub(crate) async fn unregister(&self, node: &NodeRef) {
        node.remove_listeners();
        let (had_claim, had_entry) = {
            let mut registry = self.registry.write().await;
            let mut index = self.index.write().await;
            (registry.unregister(node), index.remove_node(node).is_some())
        };

        if had_claim || had_entry {
            debug!(node = %node.name(), "node unregistered");
            self.bus
                .publish(Event::new(EventKind::NodeUnregistered).with_node(node.name().as_str()));
        }
    }

    /// Shuts `node` down unless a shutdown was already requested for it.
    pub(crate) async fn safely_shutdown(&self, node: &NodeRef) {
        let claimed = self.index.write().await.claim_shutdown(node);
        if !claimed {
            debug!(node = %node.name(), "shutdown already requested");
            return;
        }
        self.shutdown_claimed(node).await;
    }

    /// Shuts down the node paired with `program`, at most once.
    pub(crate) async fn shutdown_program(&self, program: &NodeMainRef) {
        let node = self.index.write().await.claim_shutdown_of(program);
        if let Some(node) = node {
            self.shutdown_claimed(&node).await;
        }
    }

    /// Shuts `node` down; the caller has already claimed the shutdown.
    async fn shutdown_claimed(&self, node: &NodeRef) {
        match node.shutdown().await {
            Ok(()) => info!(node = %node.name(), "shutdown successful"),
            Err(e) => {
                error!(node = %node.name(), error = %e, "error while shutting down node");
                self.bus.publish(
                    Event::new(EventKind::ShutdownFailed)
                        .with_node(node.name().as_str())
                        .with_reason(e.as_message()),
                );
                self.unregister(node).await;
            }
        }
    }

    pub(crate) async fn snapshot(&self) -> Vec<NodeRef> {
        self.registry.read().await.snapshot()
    }

    pub(crate) async fn names(&self) -> Vec<GraphName> {
        self.registry.read().await.names()
    }

    pub(crate) async fn lookup(&self, name: &GraphName) -> Option<NodeRef> {
        self.registry.read().await.lookup(name)
    }

    pub(crate) async fn node_count(&self) -> usize {
        self.registry.read().await.len()
    }

    /// `true` when no node holds a name and no program is paired.
    pub(crate) async fn is_empty(&self) -> bool {
        let registry = self.registry.read().await;
        let index = self.index.read().await;
        registry.is_empty() && index.is_empty()
    }

    pub(crate) async fn node_for(&self, program: &NodeMainRef) -> Option<NodeRef> {
        self.index.read().await.node_for(program)
    }

    pub(crate) async fn program_for(&self, node: &NodeRef) -> Option<NodeMainRef> {
        self.index.read().await.program_for(node)
    }

    pub(crate) async fn program_count(&self) -> usize {
        self.index.read().await.len()
    }
}
