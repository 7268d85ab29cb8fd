//! # Node-side abstractions.
//!
//! The collaborator contracts the executor is written against:
//! - [`NodeMain`] - caller-supplied program, also a listener on its own node
//! - [`Node`] - live named participant produced by a factory
//! - [`NodeListener`] / [`NodeListeners`] - lifecycle callbacks and an ordered list of them
//! - [`NodeFactory`] - builds nodes from a [`NodeConfiguration`]
//! - [`GraphName`] - validated path-like node name

mod configuration;
mod factory;
mod graph_name;
mod listener;
#[allow(clippy::module_inception)]
mod node;
mod node_main;

pub use configuration::NodeConfiguration;
pub use factory::{NodeFactory, NodeFactoryRef};
pub use graph_name::GraphName;
pub use listener::{NodeListener, NodeListenerRef, NodeListeners};
pub use node::{Node, NodeKey, NodeRef};
pub use node_main::{NodeMain, NodeMainKey, NodeMainRef};
