//! # nodevisor
//!
//! **nodevisor** is a process-local node lifecycle executor.
//!
//! It accepts node programs ([`NodeMain`]), has an injected [`NodeFactory`] turn
//! each into a live, named participant ([`Node`]) in a shared naming graph,
//! tracks the live nodes, and shuts them down in order. It guarantees:
//! - at most one live node per graph name (the newest to start wins);
//! - every submitted program goes through a well-defined lifecycle, even when its
//!   name collides or its construction fails;
//! - global shutdown is safe to call while submissions are still in flight.
//!
//! Transport, serialization and name resolution belong to the factory.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   NodeMain   │   │   NodeMain   │   │   NodeMain   │
//!     │ (program #1) │   │ (program #2) │   │ (program #3) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  NodeMainExecutor (facade)                                        │
//! │  - execute / shutdown_node_main / shutdown                        │
//! │  - Scheduler (tokio handle; constructions + caller periodic work) │
//! │  - NameRegistry (graph name → node, newest wins)                  │
//! │  - NodeMainIndex (program ↔ node)                                 │
//! │  - Bus → SubscriberSet (events for observers)                     │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼  Scheduler::execute
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  NodeFactory::new_node(cfg, [RegistrationListener, program, ...]) │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//!     ┌──────────────┐  on_start             ─► register (evict incumbents)
//!     │     Node     │  on_shutdown          ─► event only
//!     │ (live, named)│  on_shutdown_complete ─► unregister
//!     └──────────────┘  on_error             ─► unregister
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                          |
//! |-------------------|----------------------------------------------------------|---------------------------------------------|
//! | **Execution**     | Submit, shut down one, shut down all, run until signal.  | [`NodeMainExecutor`], [`ExecutorBuilder`]   |
//! | **Node contracts**| What programs, nodes and factories must provide.         | [`NodeMain`], [`Node`], [`NodeFactory`]     |
//! | **Listeners**     | Ordered lifecycle callbacks.                             | [`NodeListener`], [`NodeListeners`]         |
//! | **Naming**        | Validated graph names and per-node configuration.        | [`GraphName`], [`NodeConfiguration`]        |
//! | **Scheduling**    | Fire-and-forget and fixed-rate work on the same runtime. | [`Scheduler`], [`TerminationSignal`]        |
//! | **Events**        | Observe collisions, failures, registrations.             | [`Event`], [`EventKind`], [`Subscribe`]     |
//! | **Errors**        | Typed errors.                                            | [`ExecutorError`], [`NodeError`]            |
//! | **Configuration** | Executor-wide settings.                                  | [`ExecutorConfig`]                          |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use nodevisor::{
//!     ExecutorConfig, GraphName, NodeConfiguration, NodeError, NodeFactory, NodeListener,
//!     NodeListenerRef, NodeMain, NodeMainExecutor, NodeMainRef, NodeRef,
//! };
//!
//! struct MyFactory;
//!
//! #[async_trait]
//! impl NodeFactory for MyFactory {
//!     async fn new_node(
//!         &self,
//!         _config: NodeConfiguration,
//!         _listeners: Vec<NodeListenerRef>,
//!     ) -> Result<NodeRef, NodeError> {
//!         Err(NodeError::construction("wire up your transport here"))
//!     }
//! }
//!
//! struct Talker;
//!
//! impl NodeListener for Talker {}
//!
//! impl NodeMain for Talker {
//!     fn default_node_name(&self) -> Option<GraphName> {
//!         GraphName::new("/talker").ok()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec = NodeMainExecutor::builder(Arc::new(MyFactory))
//!         .with_config(ExecutorConfig::default())
//!         .build()?;
//!
//!     let talker: NodeMainRef = Arc::new(Talker);
//!     exec.execute(talker, &NodeConfiguration::new())?;
//!
//!     // Ctrl-C / SIGTERM: shut every node down, then leave main.
//!     let signal = exec.run_until_signal().await?;
//!     eprintln!("stopped by {}", signal.as_str());
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod node;
mod subscribers;

// ---- Public re-exports ----

pub use config::ExecutorConfig;
pub use self::core::{ExecutorBuilder, NodeMainExecutor, Scheduler, TerminationSignal};
pub use error::{ExecutorError, NodeError};
pub use events::{Event, EventKind};
pub use node::{
    GraphName, Node, NodeConfiguration, NodeFactory, NodeFactoryRef, NodeKey, NodeListener,
    NodeListenerRef, NodeListeners, NodeMain, NodeMainKey, NodeMainRef, NodeRef,
};
pub use subscribers::Subscribe;
