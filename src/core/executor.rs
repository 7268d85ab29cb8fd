//! # NodeMainExecutor: the public facade.
//!
//! ## High-level architecture
//! ```text
//! execute(program, cfg, listeners)
//!   ├─ copy cfg, default name ← program.default_node_name()
//!   ├─ no name? ─► Err(InvalidConfig)               (synchronous, nothing scheduled)
//!   └─ Scheduler::execute(construction)              (returns immediately)
//!         └─► factory.new_node(cfg, [RegistrationListener, program, listeners...])
//!               ├─ Err ─► log + ConstructionFailed   (nothing registered)
//!               └─ Ok  ─► node drives its listeners:
//!                           on_start             ─► registry + index (newest wins)
//!                           on_shutdown_complete ─► unregister
//!                           on_error             ─► unregister
//!
//! shutdown_node_main(program) ─► index lookup ─► safe shutdown (at most once)
//! shutdown()                  ─► registry snapshot ─► safe shutdown each
//! run_until_signal()          ─► first signal ─► run_exit_hook() ─► returns the signal
//! background hook (opt-in)    ─► first signal ─► run_exit_hook() ─► exit(128 + signo)
//! run_exit_hook()             ─► shutdown()   (at most once)
//! ```
//!
//! `shutdown()` is best-effort: a node that registers after the snapshot is
//! taken is not covered by that call. No timeout is applied to node shutdowns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::core::builder::ExecutorBuilder;
use crate::core::listener::{ProgramListener, RegistrationListener};
use crate::core::scheduler::Scheduler;
use crate::core::shutdown::{TerminationSignal, TerminationSignals};
use crate::core::state::ExecutorState;
use crate::error::ExecutorError;
use crate::events::{Event, EventKind};
use crate::node::{
    GraphName, NodeConfiguration, NodeFactoryRef, NodeListenerRef, NodeMainRef, NodeRef,
};

/// Spins up node programs as live nodes, tracks them, and shuts them down.
pub struct NodeMainExecutor {
    factory: NodeFactoryRef,
    scheduler: Scheduler,
    state: Arc<ExecutorState>,
    exit_hook_fired: AtomicBool,
}

impl NodeMainExecutor {
    /// Returns a builder for an executor backed by `factory`.
    pub fn builder(factory: NodeFactoryRef) -> ExecutorBuilder {
        ExecutorBuilder::new(factory)
    }

    pub(crate) fn new_internal(
        factory: NodeFactoryRef,
        scheduler: Scheduler,
        state: Arc<ExecutorState>,
    ) -> Self {
        Self {
            factory,
            scheduler,
            state,
            exit_hook_fired: AtomicBool::new(false),
        }
    }

    /// The scheduler constructions run on; callers may put their own periodic work on it.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Receiver for all subsequent executor events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.state.bus.subscribe()
    }

    /// Submits `node_main` with no extra listeners.
    ///
    /// See [`execute_with_listeners`](Self::execute_with_listeners).
    pub fn execute(
        &self,
        node_main: NodeMainRef,
        config: &NodeConfiguration,
    ) -> Result<(), ExecutorError> {
        self.execute_with_listeners(node_main, config, Vec::new())
    }

    /// Submits `node_main` for asynchronous construction.
    ///
    /// `config` is copied; changing it afterwards has no effect on this submission.
    /// Fails with [`ExecutorError::InvalidConfig`] when neither the configuration
    /// nor the program provides a node name. Construction failures are logged and
    /// published as [`EventKind::ConstructionFailed`], never returned.
    pub fn execute_with_listeners(
        &self,
        node_main: NodeMainRef,
        config: &NodeConfiguration,
        listeners: Vec<NodeListenerRef>,
    ) -> Result<(), ExecutorError> {
        let mut config = NodeConfiguration::copy_of(config);
        config.set_default_node_name(node_main.default_node_name());
        let Some(name) = config.node_name().cloned() else {
            return Err(ExecutorError::InvalidConfig {
                reason: "node name not specified".to_string(),
            });
        };

        self.state
            .bus
            .publish(Event::new(EventKind::ExecuteRequested).with_node(name.as_str()));

        let state = Arc::clone(&self.state);
        let factory = Arc::clone(&self.factory);
        self.scheduler.execute(async move {
            let mut all: Vec<NodeListenerRef> = Vec::with_capacity(listeners.len() + 2);
            all.push(Arc::new(RegistrationListener::new(
                Arc::clone(&node_main),
                Arc::clone(&state),
            )));
            all.push(Arc::new(ProgramListener(node_main)));
            all.extend(listeners);

            match factory.new_node(config, all).await {
                Ok(_) => debug!(node = %name, "node constructed"),
                Err(e) => {
                    error!(node = %name, error = %e, "failed to construct node");
                    state.bus.publish(
                        Event::new(EventKind::ConstructionFailed)
                            .with_node(name.as_str())
                            .with_reason(e.as_message()),
                    );
                }
            }
        });
        Ok(())
    }

    /// Shuts down the node `node_main` produced. No-op if it has none, or if a
    /// shutdown was already requested for it.
    pub async fn shutdown_node_main(&self, node_main: &NodeMainRef) {
        self.state.shutdown_program(node_main).await;
    }

    /// Shuts down every node registered when the call starts.
    ///
    /// Safe to call concurrently with `execute`; not a barrier.
    pub async fn shutdown(&self) {
        self.state
            .bus
            .publish(Event::new(EventKind::ShutdownRequested).with_reason("explicit"));
        self.shutdown_snapshot().await;
    }

    /// Process-exit teardown: runs `shutdown()` the first time it is called and
    /// returns `true`; later calls do nothing and return `false`.
    pub async fn run_exit_hook(&self) -> bool {
        if self.exit_hook_fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        info!("exit hook fired; shutting down all nodes");
        self.state
            .bus
            .publish(Event::new(EventKind::ShutdownRequested).with_reason("exit_hook"));
        self.shutdown_snapshot().await;
        true
    }

    /// Waits for the first termination signal, runs the exit hook, and returns
    /// the signal.
    ///
    /// The handlers installed here stay installed, so the signal no longer ends
    /// the process on its own: return from `main` afterwards (or exit with
    /// [`TerminationSignal::exit_code`]).
    ///
    /// # Example
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # async fn run(exec: Arc<nodevisor::NodeMainExecutor>) -> Result<(), nodevisor::ExecutorError> {
    /// let signal = exec.run_until_signal().await?;
    /// println!("stopped by {}", signal.as_str());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_until_signal(&self) -> Result<TerminationSignal, ExecutorError> {
        let mut signals =
            TerminationSignals::listen().map_err(|e| ExecutorError::SignalUnavailable {
                reason: e.to_string(),
            })?;
        let signal = signals.recv().await;
        info!(signal = signal.as_str(), "termination signal received");
        self.run_exit_hook().await;
        Ok(signal)
    }

    /// Background variant of [`run_until_signal`](Self::run_until_signal): on the
    /// first termination signal runs the exit hook, then exits the process with
    /// the signal's conventional status.
    ///
    /// The watcher holds only a weak reference and stops with the scheduler.
    pub(crate) fn install_exit_hook(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let token = self.scheduler.token().clone();
        self.scheduler.execute(async move {
            let mut signals = match TerminationSignals::listen() {
                Ok(signals) => signals,
                Err(e) => {
                    warn!(error = %e, "cannot listen for termination signals; exit hook disabled");
                    return;
                }
            };
            tokio::select! {
                _ = token.cancelled() => {}
                signal = signals.recv() => {
                    info!(signal = signal.as_str(), "termination signal received");
                    if let Some(exec) = weak.upgrade() {
                        exec.run_exit_hook().await;
                    }
                    info!(code = signal.exit_code(), "exiting after exit hook");
                    std::process::exit(signal.exit_code());
                }
            }
        });
    }

    async fn shutdown_snapshot(&self) {
        for node in self.state.snapshot().await {
            self.state.safely_shutdown(&node).await;
        }
    }

    /// Sorted names currently claimed.
    pub async fn node_names(&self) -> Vec<GraphName> {
        self.state.names().await
    }

    /// The node currently holding `name`.
    pub async fn lookup(&self, name: &GraphName) -> Option<NodeRef> {
        self.state.lookup(name).await
    }

    /// The live node `node_main` produced, once it has started.
    pub async fn node_for(&self, node_main: &NodeMainRef) -> Option<NodeRef> {
        self.state.node_for(node_main).await
    }

    /// Number of registered nodes.
    pub async fn len(&self) -> usize {
        self.state.node_count().await
    }

    /// No node holds a name and no program is paired.
    pub async fn is_empty(&self) -> bool {
        self.state.is_empty().await
    }

    /// The program that produced `node`, while the node is registered.
    pub async fn program_for(&self, node: &NodeRef) -> Option<NodeMainRef> {
        self.state.program_for(node).await
    }

    /// Number of program ↔ node pairs.
    pub async fn program_count(&self) -> usize {
        self.state.program_count().await
    }
}
