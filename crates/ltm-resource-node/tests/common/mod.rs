//! Test doubles and common utilities for node resource contract tests
//!
//! The mock store keeps nodes exactly as they are handed to it, counts every
//! call and can be told to fail, so tests can pin down which remote calls a
//! lifecycle step makes and what it does with the outcome.

#![allow(dead_code)]

use ltm_core::error::Result;
use ltm_core::model::Node;
use ltm_core::traits::NodeStore;
use ltm_core::{Error, ResourceDataMap};
use ltm_resource_node::{NodeResource, node_schema};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Which calls should fail
#[derive(Debug, Default)]
struct Failures {
    /// Number of upcoming get_node() calls that fail
    gets: usize,
    add: bool,
    modify: bool,
    delete: bool,
}

/// A mock NodeStore that tracks calls
///
/// Clones share nodes, counters and failure switches.
#[derive(Debug, Clone, Default)]
pub struct MockNodeStore {
    nodes: Arc<Mutex<HashMap<String, Node>>>,
    get_call_count: Arc<AtomicUsize>,
    add_call_count: Arc<AtomicUsize>,
    modify_call_count: Arc<AtomicUsize>,
    delete_call_count: Arc<AtomicUsize>,
    /// Payloads passed to add_node()
    added: Arc<Mutex<Vec<Node>>>,
    /// Names and payloads passed to modify_node()
    modified: Arc<Mutex<Vec<(String, Node)>>>,
    failures: Arc<Mutex<Failures>>,
}

impl MockNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing node
    pub fn with_node(self, node: Node) -> Self {
        self.put(node);
        self
    }

    /// Insert or replace a node as the device would report it
    pub fn put(&self, node: Node) {
        self.nodes.lock().unwrap().insert(node.name.clone(), node);
    }

    /// Remove a node behind the resource's back
    pub fn remove(&self, name: &str) {
        self.nodes.lock().unwrap().remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.lock().unwrap().contains_key(name)
    }

    /// Fail the next `count` get_node() calls
    pub fn fail_gets(&self, count: usize) {
        self.failures.lock().unwrap().gets = count;
    }

    pub fn fail_add(&self) {
        self.failures.lock().unwrap().add = true;
    }

    pub fn fail_modify(&self) {
        self.failures.lock().unwrap().modify = true;
    }

    pub fn fail_delete(&self) {
        self.failures.lock().unwrap().delete = true;
    }

    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    pub fn add_call_count(&self) -> usize {
        self.add_call_count.load(Ordering::SeqCst)
    }

    pub fn modify_call_count(&self) -> usize {
        self.modify_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    /// Get the payloads passed to add_node()
    pub fn added(&self) -> Vec<Node> {
        self.added.lock().unwrap().clone()
    }

    /// Get the payloads passed to modify_node()
    pub fn modified(&self) -> Vec<(String, Node)> {
        self.modified.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NodeStore for MockNodeStore {
    async fn add_node(&self, node: &Node) -> Result<()> {
        self.add_call_count.fetch_add(1, Ordering::SeqCst);
        self.added.lock().unwrap().push(node.clone());

        if self.failures.lock().unwrap().add {
            return Err(Error::store("mock", "01020066:3: The requested node already exists"));
        }

        self.put(node.clone());
        Ok(())
    }

    async fn get_node(&self, name: &str) -> Result<Option<Node>> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);

        {
            let mut failures = self.failures.lock().unwrap();
            if failures.gets > 0 {
                failures.gets -= 1;
                return Err(Error::store("mock", "connection reset by peer"));
            }
        }

        Ok(self.nodes.lock().unwrap().get(name).cloned())
    }

    async fn modify_node(&self, name: &str, node: &Node) -> Result<()> {
        self.modify_call_count.fetch_add(1, Ordering::SeqCst);
        self.modified
            .lock()
            .unwrap()
            .push((name.to_string(), node.clone()));

        if self.failures.lock().unwrap().modify {
            return Err(Error::store("mock", "01070734:3: Configuration error"));
        }

        let mut nodes = self.nodes.lock().unwrap();
        if let Some(stored) = nodes.get_mut(name) {
            if !node.monitor.is_empty() {
                stored.monitor = node.monitor.clone();
            }
            if !node.description.is_empty() {
                stored.description = node.description.clone();
            }
            if !node.session.is_empty() {
                stored.session = node.session.clone();
            }
            if node.ratio != 0 {
                stored.ratio = node.ratio;
            }
            if node.connection_limit != 0 {
                stored.connection_limit = node.connection_limit;
            }
        }
        Ok(())
    }

    async fn delete_node(&self, name: &str) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);

        if self.failures.lock().unwrap().delete {
            return Err(Error::store("mock", "node is referenced by a pool member"));
        }

        self.remove(name);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a node resource backed by a clone of `store`
pub fn resource(store: &MockNodeStore) -> NodeResource {
    NodeResource::new(Arc::new(store.clone()))
}

/// Build resource data from configured attributes (defaults applied)
pub fn node_data(attrs: Value) -> ResourceDataMap {
    let Value::Object(map) = attrs else {
        panic!("node_data expects a JSON object");
    };
    ResourceDataMap::from_attributes(node_schema(), map).expect("valid node configuration")
}

/// A literal node the way the device reports it
pub fn device_node(name: &str, address: &str) -> Node {
    Node {
        name: name.to_string(),
        address: address.to_string(),
        monitor: "/Common/icmp ".to_string(),
        rate_limit: "disabled".to_string(),
        session: "user-enabled".to_string(),
        state: "user-up".to_string(),
        ..Node::default()
    }
}
