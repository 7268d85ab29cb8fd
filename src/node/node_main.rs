//! # Node programs.
//!
//! A [`NodeMain`] is the caller-supplied behavior the executor turns into a live
//! node. It is also a [`NodeListener`] on that node, so its own `on_start` is
//! where it sets up publishers, subscribers and timers.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use nodevisor::{GraphName, NodeListener, NodeMain, NodeRef};
//!
//! struct Talker;
//!
//! #[async_trait]
//! impl NodeListener for Talker {
//!     async fn on_start(&self, node: &NodeRef) {
//!         println!("{} is up", node.name());
//!     }
//! }
//!
//! impl NodeMain for Talker {
//!     fn default_node_name(&self) -> Option<GraphName> {
//!         GraphName::new("/talker").ok()
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::node::{GraphName, NodeListener};
use crate::node::node::addr_of;

/// Shared handle to a node program.
pub type NodeMainRef = Arc<dyn NodeMain>;

/// Caller-supplied unit of node behavior.
///
/// Identity is the `Arc` allocation, not the name: the same program submitted
/// twice is tracked as one entry, two programs with the same name are two.
pub trait NodeMain: NodeListener {
    /// Name used when the configuration does not set one explicitly.
    fn default_node_name(&self) -> Option<GraphName>;
}

/// Identity key of a node program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeMainKey(usize);

impl NodeMainKey {
    pub fn of(program: &NodeMainRef) -> Self {
        Self(addr_of(program))
    }
}
