//! # Executor configuration.
//!
//! Provides [`ExecutorConfig`] centralized settings for a
//! [`NodeMainExecutor`](crate::NodeMainExecutor). Per-node settings live in
//! [`NodeConfiguration`](crate::NodeConfiguration) instead.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1

/// Global configuration for the executor.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `shutdown_on_signal`: install a background hook that, on the first
///   SIGINT/SIGTERM/SIGQUIT (Ctrl-C on non-unix), shuts every node down and then
///   exits the process with status 128 + signal number. Off by default; callers
///   that own `main` usually await
///   [`NodeMainExecutor::run_until_signal`](crate::NodeMainExecutor::run_until_signal) instead.
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// Whether `build()` installs the background exit hook (which ends the process).
    pub shutdown_on_signal: bool,
}

impl ExecutorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for ExecutorConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `shutdown_on_signal = false`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            shutdown_on_signal: false,
        }
    }
}
