//! # Registration listener (one per node).
//!
//! Drives registry/index bookkeeping from the node's own lifecycle callbacks:
//! ```text
//! on_start             ─► state.register(program, node)   (evicts incumbents)
//! on_shutdown          ─► event only
//! on_shutdown_complete ─► retire, state.unregister(node)
//! on_error             ─► log, retire, state.unregister(node)
//! ```
//!
//! Once retired, a late `on_start` (racing on another task) registers nothing.
//!
//! [`ProgramListener`] adapts the program itself into a listener so it can sit in
//! the same ordered list.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::error;

use crate::core::state::ExecutorState;
use crate::error::NodeError;
use crate::events::{Event, EventKind};
use crate::node::{NodeListener, NodeMainRef, NodeRef};

pub(crate) struct RegistrationListener {
    program: NodeMainRef,
    state: Arc<ExecutorState>,
    retired: AtomicBool,
}

impl RegistrationListener {
    pub(crate) fn new(program: NodeMainRef, state: Arc<ExecutorState>) -> Self {
        Self {
            program,
            state,
            retired: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl NodeListener for RegistrationListener {
    async fn on_start(&self, node: &NodeRef) {
        self.state.bus.publish(
            Event::new(EventKind::NodeStarted)
                .with_node(node.name().as_str())
                .with_uri_opt(node.uri()),
        );
        self.state.register(&self.program, node, &self.retired).await;
    }

    async fn on_shutdown(&self, node: &NodeRef) {
        self.state
            .bus
            .publish(Event::new(EventKind::NodeShuttingDown).with_node(node.name().as_str()));
    }

    async fn on_shutdown_complete(&self, node: &NodeRef) {
        self.state
            .bus
            .publish(Event::new(EventKind::NodeShutdownComplete).with_node(node.name().as_str()));
        self.retired.store(true, Ordering::SeqCst);
        self.state.unregister(node).await;
    }

    async fn on_error(&self, node: &NodeRef, err: &NodeError) {
        error!(node = %node.name(), error = %err, "node error");
        self.state.bus.publish(
            Event::new(EventKind::NodeFailed)
                .with_node(node.name().as_str())
                .with_reason(err.as_message()),
        );
        self.retired.store(true, Ordering::SeqCst);
        self.state.unregister(node).await;
    }
}

/// Forwards every callback to the wrapped program.
pub(crate) struct ProgramListener(pub(crate) NodeMainRef);

#[async_trait]
impl NodeListener for ProgramListener {
    async fn on_start(&self, node: &NodeRef) {
        self.0.on_start(node).await;
    }

    async fn on_shutdown(&self, node: &NodeRef) {
        self.0.on_shutdown(node).await;
    }

    async fn on_shutdown_complete(&self, node: &NodeRef) {
        self.0.on_shutdown_complete(node).await;
    }

    async fn on_error(&self, node: &NodeRef, err: &NodeError) {
        self.0.on_error(node, err).await;
    }
}
