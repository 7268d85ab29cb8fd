//! # Node factory collaborator.
//!
//! The executor never builds nodes itself. A [`NodeFactory`] turns a
//! configuration plus an ordered listener list into a live [`Node`](crate::Node),
//! wiring it into the naming graph and its transport. The factory must hand the
//! listeners to the node unchanged and in order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NodeError;
use crate::node::{NodeConfiguration, NodeListenerRef, NodeRef};

/// Shared handle to a factory.
pub type NodeFactoryRef = Arc<dyn NodeFactory>;

/// Builds live nodes.
#[async_trait]
pub trait NodeFactory: Send + Sync + 'static {
    /// Builds a node from `config`, attaching `listeners`.
    ///
    /// Returning `Err` means no node exists and no listener will ever be called.
    async fn new_node(
        &self,
        config: NodeConfiguration,
        listeners: Vec<NodeListenerRef>,
    ) -> Result<NodeRef, NodeError>;
}
