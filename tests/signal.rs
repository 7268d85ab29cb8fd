// tests/signal.rs
//
// Sends real signals to the test process, so it lives in its own test binary.
#![cfg(unix)]

mod common;

use std::process::Command;
use std::time::Duration;

use nodevisor::{EventKind, NodeConfiguration, TerminationSignal};
use tokio::signal::unix::{SignalKind, signal};
use tokio::time::timeout;

use crate::common::{FakeFactory, Program, executor, next_event};

fn interrupt_self() {
    let status = Command::new("kill")
        .arg("-INT")
        .arg(std::process::id().to_string())
        .status()
        .expect("spawn kill");
    assert!(status.success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_until_signal_runs_the_exit_hook_once_and_returns() {
    let factory = FakeFactory::new();
    let exec = executor(&factory);
    let mut rx = exec.subscribe();

    exec.execute(Program::named("/a"), &NodeConfiguration::new())
        .unwrap();
    next_event(&mut rx, EventKind::NodeRegistered).await;

    // Keeps SIGINT from killing the test binary before the executor listens.
    let _guard = signal(SignalKind::interrupt()).unwrap();

    let mut waiter = tokio::spawn({
        let exec = exec.clone();
        async move { exec.run_until_signal().await }
    });

    let mut stopped_by = None;
    for _ in 0..25 {
        interrupt_self();
        if let Ok(joined) = timeout(Duration::from_millis(200), &mut waiter).await {
            stopped_by = Some(joined.unwrap().unwrap());
            break;
        }
    }
    let signal = stopped_by.expect("run_until_signal never returned");

    assert_eq!(signal, TerminationSignal::Interrupt);
    assert_eq!(signal.exit_code(), 130);

    let ev = next_event(&mut rx, EventKind::ShutdownRequested).await;
    assert_eq!(ev.reason.as_deref(), Some("exit_hook"));
    assert!(exec.is_empty().await);
    assert_eq!(factory.built()[0].shutdowns(), 1);

    // The hook already ran; a later explicit call is a no-op.
    assert!(!exec.run_exit_hook().await);
}
