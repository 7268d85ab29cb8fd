use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::{
    config::ExecutorConfig,
    error::ExecutorError,
    events::Bus,
    node::NodeFactoryRef,
    subscribers::{Subscribe, SubscriberSet},
};
use super::{executor::NodeMainExecutor, scheduler::Scheduler, state::ExecutorState};

/// Builder for constructing a [`NodeMainExecutor`] with optional features.
pub struct ExecutorBuilder {
    factory: NodeFactoryRef,
    cfg: ExecutorConfig,
    scheduler: Option<Scheduler>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ExecutorBuilder {
    pub fn new(factory: NodeFactoryRef) -> Self {
        Self {
            factory,
            cfg: ExecutorConfig::default(),
            scheduler: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_config(mut self, cfg: ExecutorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Runs constructions on `scheduler` instead of the current runtime.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive executor events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the executor:
    /// - Event bus and subscriber workers
    /// - Registry/index bookkeeping
    /// - Background exit hook (if `shutdown_on_signal`; exits the process after the hook)
    ///
    /// Without an explicit scheduler this must be called inside a tokio runtime.
    pub fn build(self) -> Result<Arc<NodeMainExecutor>, ExecutorError> {
        let scheduler = match self.scheduler {
            Some(s) => s,
            None => Scheduler::current()?,
        };
        let bus = Bus::new(self.cfg.bus_capacity_clamped());

        if !self.subscribers.is_empty() {
            let subs = SubscriberSet::new(self.subscribers, bus.clone(), scheduler.handle());
            subscriber_listener(&scheduler, &bus, subs);
        }

        let state = Arc::new(ExecutorState::new(bus));
        let exec = Arc::new(NodeMainExecutor::new_internal(
            self.factory,
            scheduler,
            state,
        ));
        if self.cfg.shutdown_on_signal {
            exec.install_exit_hook();
        }
        Ok(exec)
    }
}

/// Forwards bus events to the subscriber set until the scheduler shuts down.
fn subscriber_listener(scheduler: &Scheduler, bus: &Bus, subs: SubscriberSet) {
    let mut rx = bus.subscribe();
    let token = scheduler.token().clone();

    scheduler.execute(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "subscriber listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        subs.shutdown().await;
    });
}
