//! # Scheduler: where node construction and caller periodic work run.
//!
//! A thin handle over a tokio runtime. The executor owns no threads; everything
//! it schedules lands on whatever runtime this handle points at.
//!
//! ## Rules
//! - `execute` is fire-and-forget; a scheduled future is never cancelled by the executor.
//! - `schedule_at_fixed_rate` loops until [`Scheduler::shutdown`] is called.
//! - Clones share one cancellation token.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::ExecutorError;

/// Cloneable handle for scheduling work on the executor's runtime.
#[derive(Clone, Debug)]
pub struct Scheduler {
    handle: Handle,
    token: CancellationToken,
}

impl Scheduler {
    /// Uses the runtime the caller is currently running on.
    pub fn current() -> Result<Self, ExecutorError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| ExecutorError::NoRuntime)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            token: CancellationToken::new(),
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Runs `fut` asynchronously.
    pub fn execute<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(fut)
    }

    /// Calls `f` every `period` (first call after one period) until shutdown.
    ///
    /// Ticks missed because `f` ran long are skipped, not bunched.
    pub fn schedule_at_fixed_rate<F, Fut>(&self, period: Duration, mut f: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        let period = period.max(Duration::from_millis(1));
        self.handle.spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => f().await,
                }
            }
        })
    }

    /// Stops all periodic work and the exit-hook watcher. Idempotent.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}
