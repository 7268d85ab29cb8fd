//! # Live node abstraction.
//!
//! A [`Node`] is the live, named participant a [`NodeFactory`](crate::NodeFactory)
//! builds from a [`NodeMain`](crate::NodeMain). The executor only needs its name,
//! an opaque endpoint for diagnostics, a way to shut it down, and a way to detach
//! its listeners once it is gone.
//!
//! Identity is `Arc` pointer identity: two handles are the same node iff
//! [`NodeKey::of`] is equal for both.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NodeError;
use crate::node::GraphName;

/// Shared handle to a live node.
pub type NodeRef = Arc<dyn Node>;

/// # Live, named participant.
///
/// Implementations own their transport and invoke their listeners (in the order
/// they were handed over) on every lifecycle transition:
/// ```text
/// created → started → (error)* → shutting down → shutdown complete
/// ```
#[async_trait]
pub trait Node: Send + Sync + 'static {
    /// The fully resolved graph name this node claims.
    fn name(&self) -> &GraphName;

    /// Transport endpoint, if any. Opaque to the executor.
    fn uri(&self) -> Option<String> {
        None
    }

    /// Starts tearing the node down.
    ///
    /// May complete before or after the node has fired `on_shutdown_complete`.
    /// An `Err` means the executor cannot rely on that callback ever arriving.
    async fn shutdown(&self) -> Result<(), NodeError>;

    /// Detaches every listener. Called once the node is unregistered.
    fn remove_listeners(&self);
}

/// Identity of an `Arc`-shared value, by address.
#[inline]
pub(crate) fn addr_of<T: ?Sized>(arc: &Arc<T>) -> usize {
    Arc::as_ptr(arc).cast::<()>() as usize
}

/// Identity key of a live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    pub fn of(node: &NodeRef) -> Self {
        Self(addr_of(node))
    }
}
