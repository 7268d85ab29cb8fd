#![allow(dead_code)]

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::timeout;
use tracing_subscriber::{EnvFilter, fmt};

use nodevisor::{
    Event, EventKind, ExecutorConfig, GraphName, Node, NodeConfiguration, NodeError, NodeFactory,
    NodeListener, NodeListenerRef, NodeListeners, NodeMain, NodeMainExecutor, NodeRef,
};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Enable levels with e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

pub fn name(s: &str) -> GraphName {
    GraphName::new(s).unwrap()
}

/// Executor config for tests: no background exit hook.
pub fn test_config() -> ExecutorConfig {
    ExecutorConfig {
        shutdown_on_signal: false,
        ..ExecutorConfig::default()
    }
}

pub fn executor(factory: &Arc<FakeFactory>) -> Arc<NodeMainExecutor> {
    init_tracing();
    NodeMainExecutor::builder(factory.clone())
        .with_config(test_config())
        .build()
        .unwrap()
}

/// Polls `check` until it returns true; panics after 3 seconds.
pub async fn eventually<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let res = timeout(Duration::from_secs(3), async {
        loop {
            if check().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(res.is_ok(), "condition not reached within 3s: {what}");
}

/// Waits for the first event of `kind`.
pub async fn next_event(rx: &mut broadcast::Receiver<Event>, kind: EventKind) -> Event {
    let res = timeout(Duration::from_secs(3), async {
        loop {
            match rx.recv().await {
                Ok(ev) if ev.kind == kind => return ev,
                Ok(_) => continue,
                Err(e) => panic!("bus closed while waiting for {kind:?}: {e}"),
            }
        }
    })
    .await;
    match res {
        Ok(ev) => ev,
        Err(_) => panic!("no {kind:?} event within 3s"),
    }
}

/// Event kinds already buffered on `rx`.
pub fn drain_kinds(rx: &mut broadcast::Receiver<Event>) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        kinds.push(ev.kind);
    }
    kinds
}

pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(j: &Journal) -> Vec<String> {
    j.lock().unwrap().clone()
}

// ---------------------------
// Programs and listeners
// ---------------------------

/// Node program that counts callbacks and journals them as `"{tag}:{callback}"`.
pub struct Program {
    tag: &'static str,
    default_name: Option<GraphName>,
    journal: Journal,
    pub started: AtomicUsize,
    pub shutdown_completed: AtomicUsize,
    pub errors: AtomicUsize,
}

impl Program {
    pub fn new(tag: &'static str, default_name: Option<&str>, journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            tag,
            default_name: default_name.map(name),
            journal,
            started: AtomicUsize::new(0),
            shutdown_completed: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        })
    }

    pub fn named(default_name: &str) -> Arc<Self> {
        Self::new("program", Some(default_name), journal())
    }

    fn note(&self, what: &str) {
        self.journal.lock().unwrap().push(format!("{}:{what}", self.tag));
    }
}

#[async_trait]
impl NodeListener for Program {
    async fn on_start(&self, _node: &NodeRef) {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.note("start");
    }

    async fn on_shutdown(&self, _node: &NodeRef) {
        self.note("shutdown");
    }

    async fn on_shutdown_complete(&self, _node: &NodeRef) {
        self.shutdown_completed.fetch_add(1, Ordering::SeqCst);
        self.note("shutdown_complete");
    }

    async fn on_error(&self, _node: &NodeRef, _error: &NodeError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.note("error");
    }
}

impl NodeMain for Program {
    fn default_node_name(&self) -> Option<GraphName> {
        self.default_name.clone()
    }
}

/// Extra listener that only journals `"{tag}:start"`.
pub struct Recorder {
    pub tag: &'static str,
    pub journal: Journal,
}

#[async_trait]
impl NodeListener for Recorder {
    async fn on_start(&self, _node: &NodeRef) {
        self.journal.lock().unwrap().push(format!("{}:start", self.tag));
    }
}

// ---------------------------
// Fake nodes
// ---------------------------

/// In-memory node. Drives its listeners the way a real node would.
pub struct FakeNode {
    me: Weak<FakeNode>,
    name: GraphName,
    uri: String,
    listeners: NodeListeners,
    fail_shutdown: bool,
    complete_on_shutdown: bool,
    pub shutdown_calls: AtomicUsize,
    started: AtomicBool,
}

impl FakeNode {
    fn node_ref(&self) -> Option<NodeRef> {
        self.me.upgrade().map(|n| n as NodeRef)
    }

    /// Fires `on_start` once.
    pub async fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(node) = self.node_ref() {
            self.listeners.signal_start(&node).await;
        }
    }

    /// Reports a runtime error to the listeners.
    pub async fn fail(&self, error: NodeError) {
        if let Some(node) = self.node_ref() {
            self.listeners.signal_error(&node, &error).await;
        }
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is(&self, node: &NodeRef) -> bool {
        self.node_ref()
            .is_some_and(|me| nodevisor::NodeKey::of(&me) == nodevisor::NodeKey::of(node))
    }
}

#[async_trait]
impl Node for FakeNode {
    fn name(&self) -> &GraphName {
        &self.name
    }

    fn uri(&self) -> Option<String> {
        Some(self.uri.clone())
    }

    async fn shutdown(&self) -> Result<(), NodeError> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_shutdown {
            return Err(NodeError::shutdown("transport wedged"));
        }
        if self.complete_on_shutdown {
            if let Some(node) = self.node_ref() {
                self.listeners.signal_shutdown(&node).await;
                self.listeners.signal_shutdown_complete(&node).await;
            }
        }
        Ok(())
    }

    fn remove_listeners(&self) {
        self.listeners.clear();
    }
}

// ---------------------------
// Fake factory
// ---------------------------

/// Factory building [`FakeNode`]s.
///
/// - names in `fail_construction` make `new_node` fail
/// - names in `fail_shutdown` build nodes whose `shutdown` errors
/// - names in `hang_shutdown` build nodes whose `shutdown` never completes
/// - with `auto_start = false` nodes wait for an explicit [`FakeNode::start`]
pub struct FakeFactory {
    built: Mutex<Vec<Arc<FakeNode>>>,
    fail_construction: Mutex<HashSet<String>>,
    fail_shutdown: Mutex<HashSet<String>>,
    hang_shutdown: Mutex<HashSet<String>>,
    auto_start: AtomicBool,
    next_port: AtomicUsize,
}

impl FakeFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            built: Mutex::new(Vec::new()),
            fail_construction: Mutex::new(HashSet::new()),
            fail_shutdown: Mutex::new(HashSet::new()),
            hang_shutdown: Mutex::new(HashSet::new()),
            auto_start: AtomicBool::new(true),
            next_port: AtomicUsize::new(4000),
        })
    }

    pub fn fail_construction_of(&self, n: &str) {
        self.fail_construction.lock().unwrap().insert(n.to_string());
    }

    pub fn fail_shutdown_of(&self, n: &str) {
        self.fail_shutdown.lock().unwrap().insert(n.to_string());
    }

    pub fn hang_shutdown_of(&self, n: &str) {
        self.hang_shutdown.lock().unwrap().insert(n.to_string());
    }

    pub fn set_auto_start(&self, on: bool) {
        self.auto_start.store(on, Ordering::SeqCst);
    }

    pub fn built(&self) -> Vec<Arc<FakeNode>> {
        self.built.lock().unwrap().clone()
    }

    pub fn built_count(&self) -> usize {
        self.built.lock().unwrap().len()
    }

    pub fn nodes_named(&self, n: &str) -> Vec<Arc<FakeNode>> {
        self.built()
            .into_iter()
            .filter(|node| node.name.as_str() == n)
            .collect()
    }
}

#[async_trait]
impl NodeFactory for FakeFactory {
    async fn new_node(
        &self,
        config: NodeConfiguration,
        listeners: Vec<NodeListenerRef>,
    ) -> Result<NodeRef, NodeError> {
        let node_name = config
            .node_name()
            .cloned()
            .ok_or_else(|| NodeError::construction("no node name"))?;
        let key = node_name.as_str().to_string();
        if self.fail_construction.lock().unwrap().contains(&key) {
            return Err(NodeError::construction("address already in use"));
        }

        let port = self.next_port.fetch_add(1, Ordering::SeqCst);
        let fail_shutdown = self.fail_shutdown.lock().unwrap().contains(&key);
        let hang = self.hang_shutdown.lock().unwrap().contains(&key);
        let node = Arc::new_cyclic(|me| FakeNode {
            me: me.clone(),
            name: node_name,
            uri: format!("tcp://127.0.0.1:{port}"),
            listeners: NodeListeners::new(listeners),
            fail_shutdown,
            complete_on_shutdown: !hang,
            shutdown_calls: AtomicUsize::new(0),
            started: AtomicBool::new(false),
        });
        self.built.lock().unwrap().push(node.clone());

        if self.auto_start.load(Ordering::SeqCst) {
            node.start().await;
        }
        Ok(node)
    }
}
