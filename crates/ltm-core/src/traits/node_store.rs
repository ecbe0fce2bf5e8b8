// # Node Store Trait
//
// Defines the interface to the remote device's node collection.
//
// ## Implementations
//
// - In-memory device double: `ltm_core::store::MemoryNodeStore`
// - REST clients for real devices live outside this workspace
//
// ## Usage
//
// ```rust,ignore
// use ltm_core::traits::{lookup, NodeLookup, NodeStore};
//
// async fn show(store: &dyn NodeStore) -> ltm_core::Result<()> {
//     match lookup(store, "/Common/web1").await {
//         NodeLookup::Found(node) => println!("{} -> {}", node.name, node.address),
//         NodeLookup::Absent => println!("gone"),
//         NodeLookup::Failed(e) => return Err(e),
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::model::Node;

/// Trait for remote node store implementations
///
/// One method per remote call. Implementations own transport, sessions and
/// any retry policy; callers issue exactly one call per lifecycle step.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Create a node object
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The object was created
    /// - `Err(Error)`: The device rejected the request or the call failed
    async fn add_node(&self, node: &Node) -> Result<(), crate::Error>;

    /// Fetch a node object by name
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Node))`: The object exists
    /// - `Ok(None)`: No object with this name exists
    /// - `Err(Error)`: The call failed
    async fn get_node(&self, name: &str) -> Result<Option<Node>, crate::Error>;

    /// Modify an existing node object
    ///
    /// Only non-empty fields of `node` are sent; everything else keeps its
    /// current value on the device.
    async fn modify_node(&self, name: &str, node: &Node) -> Result<(), crate::Error>;

    /// Delete a node object
    async fn delete_node(&self, name: &str) -> Result<(), crate::Error>;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}

/// Outcome of fetching a node
///
/// Collapses the `Result<Option<Node>>` of [`NodeStore::get_node`] into one
/// unambiguous value.
#[derive(Debug)]
pub enum NodeLookup {
    /// The object exists
    Found(Node),
    /// The device reported no object and no error
    Absent,
    /// The remote call failed
    Failed(crate::Error),
}

impl NodeLookup {
    /// Returns `true` for [`NodeLookup::Found`]
    pub fn is_found(&self) -> bool {
        matches!(self, NodeLookup::Found(_))
    }
}

impl From<Result<Option<Node>, crate::Error>> for NodeLookup {
    fn from(result: Result<Option<Node>, crate::Error>) -> Self {
        match result {
            Ok(Some(node)) => NodeLookup::Found(node),
            Ok(None) => NodeLookup::Absent,
            Err(e) => NodeLookup::Failed(e),
        }
    }
}

/// Fetch a node and classify the outcome
pub async fn lookup(store: &dyn NodeStore, name: &str) -> NodeLookup {
    store.get_node(name).await.into()
}
