// # State Store Trait
//
// Defines the interface for persisting resource state between lifecycle
// invocations.
//
// ## Purpose
//
// Lifecycle callbacks are stateless; the identity and attribute map of each
// resource instance survive between calls only through a state store. Each
// instance is keyed by its address, e.g. `bigip_ltm_node.web1`.
//
// ## Implementations
//
// - In-memory: `MemoryStateStore`
// - File-based: `FileStateStore` (JSON)
//
// ## Usage
//
// ```rust,ignore
// use ltm_core::StateStore;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* StateStore implementation */;
//
//     if let Some(state) = store.get_state("bigip_ltm_node.web1").await? {
//         println!("web1 is {}", state.id);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Persisted snapshot of one resource instance
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceState {
    /// Resource identity
    pub id: String,
    /// Attribute values
    pub attributes: Map<String, Value>,
    /// Timestamp of the last write
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl ResourceState {
    /// Create a new snapshot stamped with the current time
    pub fn new(id: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            attributes,
            last_updated: chrono::Utc::now(),
        }
    }

}

/// Trait for state store implementations
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// ## Implementation Guidelines
///
/// - **Async I/O only**: Use async file/database operations, never blocking I/O
/// - **Explicit flush**: `flush()` must persist all pending changes
/// - **Thread-safe**: All methods must be safe to call concurrently
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the snapshot for a resource address
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ResourceState))`: The stored snapshot
    /// - `Ok(None)`: Nothing stored under this address
    /// - `Err(Error)`: Storage error
    async fn get_state(&self, address: &str) -> Result<Option<ResourceState>, crate::Error>;

    /// Store the snapshot for a resource address
    async fn set_state(&self, address: &str, state: &ResourceState)
    -> Result<(), crate::Error>;

    /// Delete a snapshot
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully deleted (or didn't exist)
    /// - `Err(Error)`: Storage error
    async fn delete_state(&self, address: &str) -> Result<(), crate::Error>;

    /// List all resource addresses in the store
    async fn list_states(&self) -> Result<Vec<String>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;
}
