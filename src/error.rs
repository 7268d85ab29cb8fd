//! Error types used by the executor and by node implementations.
//!
//! This module defines two main error enums:
//!
//! - [`ExecutorError`]: errors raised synchronously by the executor facade itself.
//! - [`NodeError`]: errors raised by nodes and node factories.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/events.

use thiserror::Error;

/// # Errors produced by the executor facade.
///
/// These are surfaced to the caller synchronously; everything that fails
/// inside scheduled work is logged and published instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The configuration does not resolve to a node name.
    #[error("invalid node configuration: {reason}")]
    InvalidConfig {
        /// What is missing or malformed.
        reason: String,
    },

    /// A graph name failed validation.
    #[error("invalid graph name {name:?}: {reason}")]
    InvalidGraphName {
        /// The rejected input.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The executor was built outside of a tokio runtime.
    #[error("no tokio runtime available to schedule node construction")]
    NoRuntime,

    /// Termination signal handlers could not be installed.
    #[error("cannot listen for termination signals: {reason}")]
    SignalUnavailable {
        /// The underlying I/O error.
        reason: String,
    },
}

impl ExecutorError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use nodevisor::ExecutorError;
    ///
    /// let err = ExecutorError::InvalidConfig { reason: "node name not specified".into() };
    /// assert_eq!(err.as_label(), "executor_invalid_config");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecutorError::InvalidConfig { .. } => "executor_invalid_config",
            ExecutorError::InvalidGraphName { .. } => "executor_invalid_graph_name",
            ExecutorError::NoRuntime => "executor_no_runtime",
            ExecutorError::SignalUnavailable { .. } => "executor_signal_unavailable",
        }
    }
}

/// # Errors produced by nodes and node factories.
///
/// None of these are retried by the executor.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The factory could not build the node.
    #[error("node construction failed: {error}")]
    Construction {
        /// The underlying error message.
        error: String,
    },

    /// The node's shutdown call failed.
    #[error("node shutdown failed: {error}")]
    Shutdown {
        /// The underlying error message.
        error: String,
    },

    /// The node reported a failure while running.
    #[error("node failed: {error}")]
    Runtime {
        /// The underlying error message.
        error: String,
    },
}

impl NodeError {
    /// Shorthand for [`NodeError::Construction`].
    pub fn construction(error: impl Into<String>) -> Self {
        NodeError::Construction { error: error.into() }
    }

    /// Shorthand for [`NodeError::Shutdown`].
    pub fn shutdown(error: impl Into<String>) -> Self {
        NodeError::Shutdown { error: error.into() }
    }

    /// Shorthand for [`NodeError::Runtime`].
    pub fn runtime(error: impl Into<String>) -> Self {
        NodeError::Runtime { error: error.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use nodevisor::NodeError;
    ///
    /// assert_eq!(NodeError::shutdown("socket closed").as_label(), "node_shutdown_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            NodeError::Construction { .. } => "node_construction_failed",
            NodeError::Shutdown { .. } => "node_shutdown_failed",
            NodeError::Runtime { .. } => "node_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            NodeError::Construction { error } => format!("construction: {error}"),
            NodeError::Shutdown { error } => format!("shutdown: {error}"),
            NodeError::Runtime { error } => format!("error: {error}"),
        }
    }
}
