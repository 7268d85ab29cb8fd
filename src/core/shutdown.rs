//! # Termination signals and the exit status they imply.
//!
//! [`TerminationSignals`] installs the handlers when it is created, so a signal
//! that arrives before [`TerminationSignals::recv`] is awaited is not lost.
//! Handlers stay installed for the life of the process: once they exist the
//! signal no longer ends the process by itself, and whoever listens must end it
//! (return from `main`, or exit with [`TerminationSignal::exit_code`]).
//!
//! ## Signals
//! **Unix platforms:** `SIGINT`, `SIGTERM`, `SIGQUIT`
//!
//! **Other platforms:** `Ctrl-C`, reported as [`TerminationSignal::Interrupt`]

use std::io;

/// Signal that asked the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// `SIGINT` / Ctrl-C.
    Interrupt,
    /// `SIGTERM`.
    Terminate,
    /// `SIGQUIT`.
    Quit,
}

impl TerminationSignal {
    /// Shell convention for a process ended by this signal: 128 + signal number.
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::Interrupt => 130,
            TerminationSignal::Terminate => 143,
            TerminationSignal::Quit => 131,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Quit => "SIGQUIT",
        }
    }
}

/// Installed termination signal handlers.
#[cfg(unix)]
pub(crate) struct TerminationSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    /// Installs the handlers. Must run inside a tokio runtime.
    pub(crate) fn listen() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    /// Waits for the next termination signal.
    pub(crate) async fn recv(&mut self) -> TerminationSignal {
        tokio::select! {
            _ = self.interrupt.recv() => TerminationSignal::Interrupt,
            _ = self.terminate.recv() => TerminationSignal::Terminate,
            _ = self.quit.recv()      => TerminationSignal::Quit,
        }
    }
}

/// Installed termination signal handlers.
#[cfg(not(unix))]
pub(crate) struct TerminationSignals;

#[cfg(not(unix))]
impl TerminationSignals {
    pub(crate) fn listen() -> io::Result<Self> {
        Ok(Self)
    }

    /// Waits for Ctrl-C. Never returns if the handler cannot be installed.
    pub(crate) async fn recv(&mut self) -> TerminationSignal {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        TerminationSignal::Interrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_shell_convention() {
        assert_eq!(TerminationSignal::Interrupt.exit_code(), 130);
        assert_eq!(TerminationSignal::Terminate.exit_code(), 143);
        assert_eq!(TerminationSignal::Quit.exit_code(), 131);
        assert_eq!(TerminationSignal::Terminate.as_str(), "SIGTERM");
    }
}
