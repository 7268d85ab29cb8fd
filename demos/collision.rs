//! # Example: collision
//!
//! Two programs ask for the same graph name; the newest node to start wins and
//! the incumbent is shut down.
//!
//! Demonstrates how to:
//! - Implement a `NodeFactory` whose nodes drive their listeners.
//! - Submit programs with `execute()` and watch events through a `Subscribe`.
//! - Stop one program with `shutdown_node_main()` and the rest with `shutdown()`.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► execute(talker #1, "/talker")  ─► NodeRegistered
//!   ├─► execute(talker #2, "/talker")  ─► NodeRegistered, NameCollision
//!   │                                     └─► talker #1 shut down
//!   ├─► execute(listener, "/listener")
//!   ├─► shutdown_node_main(listener)
//!   └─► shutdown()                     ─► talker #2 shut down
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example collision
//! ```

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use nodevisor::{
    Event, ExecutorConfig, GraphName, Node, NodeConfiguration, NodeError, NodeFactory,
    NodeListener, NodeListenerRef, NodeListeners, NodeMain, NodeMainExecutor, NodeMainRef,
    NodeRef, Subscribe,
};

/// Node living entirely in memory.
struct LocalNode {
    me: Weak<LocalNode>,
    name: GraphName,
    port: u16,
    listeners: NodeListeners,
}

impl LocalNode {
    fn node_ref(&self) -> Option<NodeRef> {
        self.me.upgrade().map(|n| n as NodeRef)
    }
}

#[async_trait]
impl Node for LocalNode {
    fn name(&self) -> &GraphName {
        &self.name
    }

    fn uri(&self) -> Option<String> {
        Some(format!("local://{}", self.port))
    }

    async fn shutdown(&self) -> Result<(), NodeError> {
        if let Some(node) = self.node_ref() {
            self.listeners.signal_shutdown(&node).await;
            self.listeners.signal_shutdown_complete(&node).await;
        }
        Ok(())
    }

    fn remove_listeners(&self) {
        self.listeners.clear();
    }
}

struct LocalFactory {
    next_port: AtomicU16,
}

#[async_trait]
impl NodeFactory for LocalFactory {
    async fn new_node(
        &self,
        config: NodeConfiguration,
        listeners: Vec<NodeListenerRef>,
    ) -> Result<NodeRef, NodeError> {
        let name = config
            .node_name()
            .cloned()
            .ok_or_else(|| NodeError::construction("no node name"))?;
        let port = self.next_port.fetch_add(1, Ordering::Relaxed);
        let node = Arc::new_cyclic(|me| LocalNode {
            me: me.clone(),
            name,
            port,
            listeners: NodeListeners::new(listeners),
        });

        // Start right away, the way a node that came up on its own would.
        let as_ref: NodeRef = node.clone();
        node.listeners.signal_start(&as_ref).await;
        Ok(node)
    }
}

/// Program that just narrates its lifecycle.
struct Chatty {
    label: &'static str,
    default_name: &'static str,
}

#[async_trait]
impl NodeListener for Chatty {
    async fn on_start(&self, node: &NodeRef) {
        println!("[{}] started as {}", self.label, node.name());
    }

    async fn on_shutdown_complete(&self, node: &NodeRef) {
        println!("[{}] {} is gone", self.label, node.name());
    }
}

impl NodeMain for Chatty {
    fn default_node_name(&self) -> Option<GraphName> {
        GraphName::new(self.default_name).ok()
    }
}

/// Prints every executor event.
struct Printer;

#[async_trait]
impl Subscribe for Printer {
    async fn on_event(&self, ev: &Event) {
        println!(
            "  event {:?} node={} uri={}",
            ev.kind,
            ev.node.as_deref().unwrap_or("-"),
            ev.uri.as_deref().unwrap_or("-"),
        );
    }

    fn name(&self) -> &'static str {
        "printer"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) Executor with an in-memory factory and a printing subscriber
    let factory = Arc::new(LocalFactory {
        next_port: AtomicU16::new(11311),
    });
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Printer)];
    let exec = NodeMainExecutor::builder(factory)
        .with_config(ExecutorConfig::default())
        .with_subscribers(subs)
        .build()?;

    // 2) Two programs competing for "/talker"
    let first: NodeMainRef = Arc::new(Chatty {
        label: "talker#1",
        default_name: "/talker",
    });
    let second: NodeMainRef = Arc::new(Chatty {
        label: "talker#2",
        default_name: "/talker",
    });
    exec.execute(first, &NodeConfiguration::new())?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    exec.execute(second, &NodeConfiguration::new())?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 3) An unrelated program, stopped on its own
    let listener: NodeMainRef = Arc::new(Chatty {
        label: "listener",
        default_name: "/listener",
    });
    exec.execute(listener.clone(), &NodeConfiguration::new())?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("live: {:?}", exec.node_names().await);
    exec.shutdown_node_main(&listener).await;

    // 4) Everything else
    exec.shutdown().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("live after shutdown: {:?}", exec.node_names().await);
    Ok(())
}
