//! # Program ↔ node index.
//!
//! One-to-one association between a submitted [`NodeMain`](crate::NodeMain) and
//! the live node it produced, used for targeted shutdown by program.
//!
//! ## Rules
//! - Two plain maps (`by_program`, `by_node`) kept in sync; one lock (held by
//!   `ExecutorState`) guards both.
//! - Every key has exactly one value and vice versa.
//! - A program already paired with a live node is not re-paired: `insert`
//!   refuses, and the newer node stays reachable only through the registry.
//!   Evicted incumbents give up their pairing first (see [`NodeMainIndex::evict`]),
//!   so re-running a program under the same name pairs it with the newcomer.
//! - Each entry carries a "shutdown requested" flag so at most one shutdown is
//!   issued per node.

use std::collections::HashMap;

use crate::node::{NodeKey, NodeMainKey, NodeMainRef, NodeRef};

struct Entry {
    program: NodeMainRef,
    node: NodeRef,
    shutdown_requested: bool,
}

/// Bijective program ↔ node index.
#[derive(Default)]
pub struct NodeMainIndex {
    by_program: HashMap<NodeMainKey, Entry>,
    by_node: HashMap<NodeKey, NodeMainKey>,
}

impl NodeMainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `program` with `node`.
    ///
    /// Returns `false` and changes nothing if `program` is already paired with a
    /// different node. Re-inserting an existing pair is a no-op.
    pub fn insert(&mut self, program: NodeMainRef, node: NodeRef) -> bool {
        let pkey = NodeMainKey::of(&program);
        let nkey = NodeKey::of(&node);
        if let Some(entry) = self.by_program.get(&pkey) {
            return NodeKey::of(&entry.node) == nkey;
        }
        self.remove_node(&node);

        self.by_node.insert(nkey, pkey);
        self.by_program.insert(
            pkey,
            Entry {
                program,
                node,
                shutdown_requested: false,
            },
        );
        true
    }

    /// Drops the pairing of a node evicted from its name.
    ///
    /// Returns `true` if the caller should shut it down, i.e. no shutdown was
    /// requested for it yet.
    pub fn evict(&mut self, node: &NodeRef) -> bool {
        let Some(pkey) = self.by_node.remove(&NodeKey::of(node)) else {
            return true;
        };
        self.by_program
            .remove(&pkey)
            .is_none_or(|entry| !entry.shutdown_requested)
    }

    pub fn node_for(&self, program: &NodeMainRef) -> Option<NodeRef> {
        self.by_program
            .get(&NodeMainKey::of(program))
            .map(|e| e.node.clone())
    }

    pub fn program_for(&self, node: &NodeRef) -> Option<NodeMainRef> {
        let pkey = self.by_node.get(&NodeKey::of(node))?;
        self.by_program.get(pkey).map(|e| e.program.clone())
    }

    /// Returns `program`'s node the first time it is asked for shutdown; `None`
    /// if the program is unknown or a shutdown was already requested.
    pub fn claim_shutdown_of(&mut self, program: &NodeMainRef) -> Option<NodeRef> {
        let entry = self.by_program.get_mut(&NodeMainKey::of(program))?;
        if entry.shutdown_requested {
            return None;
        }
        entry.shutdown_requested = true;
        Some(entry.node.clone())
    }

    /// Marks `node` as being shut down. Returns `false` only if the node is
    /// indexed and a shutdown was already requested for it.
    pub fn claim_shutdown(&mut self, node: &NodeRef) -> bool {
        let Some(pkey) = self.by_node.get(&NodeKey::of(node)) else {
            return true;
        };
        match self.by_program.get_mut(pkey) {
            Some(entry) if entry.shutdown_requested => false,
            Some(entry) => {
                entry.shutdown_requested = true;
                true
            }
            None => true,
        }
    }

    /// Drops `node`'s pairing, returning its program. Idempotent.
    pub fn remove_node(&mut self, node: &NodeRef) -> Option<NodeMainRef> {
        let pkey = self.by_node.remove(&NodeKey::of(node))?;
        self.by_program.remove(&pkey).map(|e| e.program)
    }

    pub fn len(&self) -> usize {
        self.by_program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_program.is_empty()
    }
}
