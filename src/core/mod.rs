//! Executor core: registration bookkeeping and lifecycle orchestration.
//!
//! The public API from this module is [`NodeMainExecutor`] (with its
//! [`ExecutorBuilder`]) and the [`Scheduler`] it runs on.
//!
//! Internal modules:
//! - [`registry`]: graph name → live node claims, newest wins;
//! - [`index`]: program ↔ node bijection, shutdown-once flags;
//! - [`state`]: shared bookkeeping plus the safe-shutdown procedure;
//! - [`listener`]: per-node registration listener driving the bookkeeping;
//! - [`scheduler`]: where constructions and caller periodic work run;
//! - [`shutdown`]: termination signals and the exit status they imply;
//! - [`executor`]: the facade.

mod builder;
mod executor;
mod index;
mod listener;
mod registry;
mod scheduler;
mod shutdown;
mod state;

pub use builder::ExecutorBuilder;
pub use executor::NodeMainExecutor;
pub use scheduler::Scheduler;
pub use shutdown::TerminationSignal;
