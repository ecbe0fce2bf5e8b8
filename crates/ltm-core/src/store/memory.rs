// # Memory Node Store
//
// In-memory implementation of NodeStore that behaves like a device.
//
// ## Purpose
//
// Lets lifecycle code run end to end without a device: embedding demos,
// integration tests, dry runs of configuration changes.
//
// ## Device behavior mirrored
//
// - Adding a name that already exists fails
// - Unset settings get the device defaults (`rateLimit` `disabled`,
//   `session` `user-enabled`, `state` `user-up`)
// - FQDN nodes report `any6` as their address plus FQDN defaults
// - Monitor rules come back with a trailing space
// - Literal addresses can be decorated with a route domain (`%<n>`)
// - Modify only overwrites fields present in the payload

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::model::Node;
use crate::traits::NodeStore;

/// Name reported by [`MemoryNodeStore::store_name`]
const STORE_NAME: &str = "memory";

/// In-memory node store
///
/// # Example
///
/// ```rust,no_run
/// use ltm_core::model::Node;
/// use ltm_core::store::MemoryNodeStore;
/// use ltm_core::traits::NodeStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryNodeStore::new().with_route_domain(2);
///
///     store.add_node(&Node {
///         name: "/Common/web1".to_string(),
///         address: "10.0.0.5".to_string(),
///         ..Node::default()
///     }).await?;
///
///     let node = store.get_node("/Common/web1").await?.expect("node exists");
///     assert_eq!(node.address, "10.0.0.5%2");
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeStore {
    inner: Arc<RwLock<HashMap<String, Node>>>,
    route_domain: Option<u32>,
}

impl MemoryNodeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `%<id>` to literal addresses without a route domain
    pub fn with_route_domain(mut self, id: u32) -> Self {
        self.route_domain = Some(id);
        self
    }

    /// Get the number of nodes in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Insert or replace a node as-is, bypassing device defaults
    ///
    /// Simulates objects created outside of this tool.
    pub async fn insert_raw(&self, node: Node) {
        let mut guard = self.inner.write().await;
        guard.insert(node.name.clone(), node);
    }

    /// Remove a node as-is, simulating an out-of-band deletion
    pub async fn remove_raw(&self, name: &str) -> Option<Node> {
        let mut guard = self.inner.write().await;
        guard.remove(name)
    }

    fn materialize(&self, node: &Node) -> Node {
        let mut stored = node.clone();

        if stored.rate_limit.is_empty() {
            stored.rate_limit = "disabled".to_string();
        }
        if stored.session.is_empty() {
            stored.session = "user-enabled".to_string();
        }
        if stored.state.is_empty() {
            stored.state = "user-up".to_string();
        }
        if !stored.monitor.is_empty() {
            stored.monitor = format!("{} ", stored.monitor.trim_end());
        }

        if stored.fqdn.name.is_empty() {
            self.decorate_address(&mut stored);
        } else {
            stored.address = "any6".to_string();
            let fqdn = &mut stored.fqdn;
            if fqdn.address_family.is_empty() {
                fqdn.address_family = "ipv4".to_string();
            }
            if fqdn.interval.is_empty() {
                fqdn.interval = "3600".to_string();
            }
            if fqdn.down_interval == 0 {
                fqdn.down_interval = 5;
            }
            if fqdn.auto_populate.is_empty() {
                fqdn.auto_populate = "disabled".to_string();
            }
        }

        stored
    }

    fn decorate_address(&self, node: &mut Node) {
        if let Some(id) = self.route_domain
            && !node.address.is_empty()
            && !node.address.contains('%')
        {
            node.address = format!("{}%{}", node.address, id);
        }
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn add_node(&self, node: &Node) -> Result<(), Error> {
        if node.name.is_empty() {
            return Err(Error::store(STORE_NAME, "node name cannot be empty"));
        }

        let mut guard = self.inner.write().await;
        if guard.contains_key(&node.name) {
            return Err(Error::store(
                STORE_NAME,
                format!("The requested node ({}) already exists", node.name),
            ));
        }

        let stored = self.materialize(node);
        tracing::trace!("Stored node {}: {:?}", node.name, stored);
        guard.insert(node.name.clone(), stored);
        Ok(())
    }

    async fn get_node(&self, name: &str) -> Result<Option<Node>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(name).cloned())
    }

    async fn modify_node(&self, name: &str, node: &Node) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        let Some(stored) = guard.get_mut(name) else {
            return Err(Error::store(
                STORE_NAME,
                format!("The requested node ({}) was not found", name),
            ));
        };

        if !node.address.is_empty() {
            let requested = {
                let mut decorated = node.clone();
                self.decorate_address(&mut decorated);
                decorated.address
            };
            if stored.fqdn.name.is_empty() && stored.address != requested {
                return Err(Error::store(
                    STORE_NAME,
                    format!("The address of node {} cannot be modified", name),
                ));
            }
        }

        let text_fields = [
            (&mut stored.rate_limit, &node.rate_limit),
            (&mut stored.session, &node.session),
            (&mut stored.state, &node.state),
            (&mut stored.description, &node.description),
        ];
        for (target, value) in text_fields {
            if !value.is_empty() {
                target.clone_from(value);
            }
        }
        if !node.monitor.is_empty() {
            stored.monitor = format!("{} ", node.monitor.trim_end());
        }

        let counters = [
            (&mut stored.connection_limit, node.connection_limit),
            (&mut stored.dynamic_ratio, node.dynamic_ratio),
            (&mut stored.ratio, node.ratio),
        ];
        for (target, value) in counters {
            if value != 0 {
                *target = value;
            }
        }

        Ok(())
    }

    async fn delete_node(&self, name: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        match guard.remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::store(
                STORE_NAME,
                format!("The requested node ({}) was not found", name),
            )),
        }
    }

    fn store_name(&self) -> &'static str {
        STORE_NAME
    }
}
