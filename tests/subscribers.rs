// tests/subscribers.rs

mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nodevisor::{
    Event, EventKind, NodeConfiguration, NodeKey, NodeMainExecutor, NodeMainRef, Subscribe,
};

use crate::common::{FakeFactory, Program, eventually, init_tracing, name, test_config};

/// Collects every event it sees.
#[derive(Default)]
struct Collector {
    seen: Mutex<Vec<Event>>,
}

impl Collector {
    fn kinds(&self) -> Vec<EventKind> {
        self.seen.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    fn first(&self, kind: EventKind) -> Option<Event> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.kind == kind)
            .cloned()
    }
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, event: &Event) {
        self.seen.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Panics on every registration.
struct Grumpy;

#[async_trait]
impl Subscribe for Grumpy {
    async fn on_event(&self, event: &Event) {
        if event.kind == EventKind::NodeRegistered {
            panic!("registrations upset me");
        }
    }

    fn name(&self) -> &'static str {
        "grumpy"
    }
}

fn observed(
    factory: &Arc<FakeFactory>,
    subs: Vec<Arc<dyn Subscribe>>,
) -> Arc<NodeMainExecutor> {
    init_tracing();
    NodeMainExecutor::builder(factory.clone())
        .with_config(test_config())
        .with_subscribers(subs)
        .build()
        .unwrap()
}

#[tokio::test]
async fn newer_node_evicts_incumbent_with_same_name() {
    let factory = FakeFactory::new();
    let collector = Arc::new(Collector::default());
    let exec = observed(&factory, vec![collector.clone()]);

    let p1 = Program::named("/a");
    let p1_main: NodeMainRef = p1.clone();
    exec.execute(p1_main.clone(), &NodeConfiguration::new()).unwrap();
    eventually("first node registered", || {
        let exec = exec.clone();
        async move { exec.len().await == 1 }
    })
    .await;

    let p2: NodeMainRef = Program::named("/a");
    exec.execute(p2.clone(), &NodeConfiguration::new()).unwrap();
    eventually("incumbent shut down", || {
        let p1 = p1.clone();
        async move { p1.shutdown_completed.load(Ordering::SeqCst) == 1 }
    })
    .await;

    assert_eq!(exec.len().await, 1);
    assert_eq!(exec.node_names().await, vec![name("/a")]);
    let holder = exec.lookup(&name("/a")).await.unwrap();
    let n2 = exec.node_for(&p2).await.unwrap();
    assert_eq!(NodeKey::of(&holder), NodeKey::of(&n2));
    assert!(exec.node_for(&p1_main).await.is_none());
    assert_eq!(exec.program_count().await, 1);

    let built = factory.nodes_named("/a");
    assert_eq!(built.len(), 2);
    let n1 = built.iter().find(|n| !n.is(&holder)).unwrap();
    assert_eq!(n1.shutdowns(), 1);

    eventually("collision observed", || {
        let collector = collector.clone();
        async move { collector.count(EventKind::NameCollision) == 1 }
    })
    .await;
    let ev = collector.first(EventKind::NameCollision).unwrap();
    assert_eq!(ev.node.as_deref(), Some("/a"));
    assert!(ev.uri.is_some());
}

#[tokio::test]
async fn last_node_to_start_wins_regardless_of_submission_order() {
    let factory = FakeFactory::new();
    factory.set_auto_start(false);
    let exec = observed(&factory, Vec::new());

    let first = Program::named("/b");
    let second = Program::named("/b");
    exec.execute(first.clone(), &NodeConfiguration::new()).unwrap();
    exec.execute(second.clone(), &NodeConfiguration::new()).unwrap();
    eventually("both nodes built", || {
        let factory = factory.clone();
        async move { factory.built_count() == 2 }
    })
    .await;

    let built = factory.built();
    let (early, late) = (&built[1], &built[0]);
    early.start().await;
    late.start().await;

    let holder = exec.lookup(&name("/b")).await.unwrap();
    assert!(late.is(&holder));
    assert_eq!(early.shutdowns(), 1);
    assert_eq!(late.shutdowns(), 0);
    assert_eq!(exec.len().await, 1);
    assert_eq!(exec.program_count().await, 1);
}

#[tokio::test]
async fn panicking_subscriber_is_isolated() {
    let factory = FakeFactory::new();
    let collector = Arc::new(Collector::default());
    let exec = observed(&factory, vec![Arc::new(Grumpy), collector.clone()]);

    for n in ["/x", "/y"] {
        exec.execute(Program::named(n), &NodeConfiguration::new()).unwrap();
    }

    eventually("both panics reported and both nodes registered", || {
        let collector = collector.clone();
        async move {
            collector.count(EventKind::SubscriberPanicked) == 2
                && collector.count(EventKind::NodeRegistered) == 2
        }
    })
    .await;

    let ev = collector.first(EventKind::SubscriberPanicked).unwrap();
    assert_eq!(ev.node.as_deref(), Some("grumpy"));
    assert!(ev.reason.as_deref().unwrap().contains("registrations upset me"));
    assert_eq!(exec.len().await, 2);
}

#[tokio::test]
async fn subscribers_see_the_full_lifecycle_in_order() {
    let factory = FakeFactory::new();
    let collector = Arc::new(Collector::default());
    let exec = observed(&factory, vec![collector.clone()]);

    let program: NodeMainRef = Program::named("/life");
    exec.execute(program.clone(), &NodeConfiguration::new()).unwrap();
    eventually("node registered", || {
        let exec = exec.clone();
        async move { exec.len().await == 1 }
    })
    .await;
    exec.shutdown_node_main(&program).await;

    eventually("unregistration observed", || {
        let collector = collector.clone();
        async move { collector.count(EventKind::NodeUnregistered) == 1 }
    })
    .await;
    assert_eq!(
        collector.kinds(),
        vec![
            EventKind::ExecuteRequested,
            EventKind::NodeStarted,
            EventKind::NodeRegistered,
            EventKind::NodeShuttingDown,
            EventKind::NodeShutdownComplete,
            EventKind::NodeUnregistered,
        ]
    );
    let started = collector.first(EventKind::NodeStarted).unwrap();
    assert!(started.uri.as_deref().unwrap().starts_with("tcp://127.0.0.1:"));
}
