//! # Name registry - graph name → live node claims.
//!
//! ## Architecture
//! ```text
//! RegistrationListener::on_start(node)
//!         └─► register(node)
//!               ├─ take every other claim on node.name()
//!               ├─ install node as the only claim
//!               └─► returns evicted incumbents (caller shuts them down)
//!
//! on_shutdown_complete / on_error / failed shutdown
//!         └─► unregister(node)   (idempotent)
//! ```
//!
//! ## Rules
//! - At most one claim per name survives a `register` call; multiplicity never escapes it.
//! - The last node to `register` a name holds it.
//! - Plain data: the owner (`ExecutorState`) guards it with a lock and never
//!   calls into a node while holding it.

use std::collections::HashMap;

use crate::node::{GraphName, NodeKey, NodeRef};

/// Registry of live nodes keyed by graph name.
#[derive(Default)]
pub struct NameRegistry {
    claims: HashMap<GraphName, Vec<NodeRef>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `node` as the holder of its name.
    ///
    /// Returns the incumbents that were claiming the same name. Registering a
    /// node that already holds its name is a no-op and evicts nothing.
    pub fn register(&mut self, node: &NodeRef) -> Vec<NodeRef> {
        let key = NodeKey::of(node);
        let slot = self.claims.entry(node.name().clone()).or_default();
        let evicted: Vec<NodeRef> = slot.drain(..).filter(|n| NodeKey::of(n) != key).collect();
        slot.push(node.clone());
        evicted
    }

    /// Removes `node`'s claim. Returns `false` if it held none.
    pub fn unregister(&mut self, node: &NodeRef) -> bool {
        let key = NodeKey::of(node);
        let Some(slot) = self.claims.get_mut(node.name()) else {
            return false;
        };
        let before = slot.len();
        slot.retain(|n| NodeKey::of(n) != key);
        let removed = slot.len() != before;
        if slot.is_empty() {
            self.claims.remove(node.name());
        }
        removed
    }

    /// Current holder of `name`.
    pub fn lookup(&self, name: &GraphName) -> Option<NodeRef> {
        self.claims.get(name).and_then(|slot| slot.last().cloned())
    }

    /// Point-in-time copy of every registered node.
    pub fn snapshot(&self) -> Vec<NodeRef> {
        self.claims.values().flatten().cloned().collect()
    }

    /// Returns sorted list of claimed names.
    pub fn names(&self) -> Vec<GraphName> {
        let mut names: Vec<GraphName> = self.claims.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.claims.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
