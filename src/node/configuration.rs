//! # Per-node configuration snapshot.
//!
//! [`NodeConfiguration`] is what the caller hands to
//! [`NodeMainExecutor::execute`](crate::NodeMainExecutor::execute) and what the
//! executor forwards (as its own copy) to the [`NodeFactory`](crate::NodeFactory).
//!
//! ## Name resolution
//! ```text
//! effective name = node_name ?? default_node_name
//! ```
//! The executor fills `default_node_name` from
//! [`NodeMain::default_node_name`](crate::NodeMain::default_node_name) on its copy.

use crate::node::GraphName;

/// Configuration snapshot for one node.
///
/// `master_uri` is opaque to the executor and only forwarded to the factory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeConfiguration {
    node_name: Option<GraphName>,
    default_node_name: Option<GraphName>,
    master_uri: Option<String>,
}

impl NodeConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an independent copy; later changes to `self` do not affect it.
    pub fn copy_of(other: &NodeConfiguration) -> Self {
        other.clone()
    }

    /// Sets an explicit node name (overrides the program default).
    pub fn with_node_name(mut self, name: GraphName) -> Self {
        self.node_name = Some(name);
        self
    }

    pub fn with_master_uri(mut self, uri: impl Into<String>) -> Self {
        self.master_uri = Some(uri.into());
        self
    }

    pub fn set_node_name(&mut self, name: Option<GraphName>) {
        self.node_name = name;
    }

    pub fn set_default_node_name(&mut self, name: Option<GraphName>) {
        self.default_node_name = name;
    }

    /// The effective node name: the explicit name, else the default.
    pub fn node_name(&self) -> Option<&GraphName> {
        self.node_name.as_ref().or(self.default_node_name.as_ref())
    }

    pub fn default_node_name(&self) -> Option<&GraphName> {
        self.default_node_name.as_ref()
    }

    pub fn master_uri(&self) -> Option<&str> {
        self.master_uri.as_deref()
    }
}
