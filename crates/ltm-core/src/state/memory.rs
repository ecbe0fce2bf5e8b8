// # Memory State Store
//
// In-memory implementation of StateStore.
//
// ## Purpose
//
// Keeps resource snapshots for the lifetime of the process only. Suited to
// tests, embedding and one-shot runs where the device is the only source of
// truth that matters.
//
// ## Crash Behavior
//
// - All snapshots are lost on restart
// - The next run starts with no identities, so existing nodes must be
//   imported again

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::state_store::{ResourceState, StateStore};

/// In-memory state store implementation
///
/// # Example
///
/// ```rust,no_run
/// use ltm_core::state::MemoryStateStore;
/// use ltm_core::traits::{ResourceState, StateStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryStateStore::new();
///
///     let state = ResourceState::new("/Common/web1", Default::default());
///     store.set_state("bigip_ltm_node.web1", &state).await?;
///
///     let loaded = store.get_state("bigip_ltm_node.web1").await?;
///     assert_eq!(loaded.map(|s| s.id), Some("/Common/web1".to_string()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<HashMap<String, ResourceState>>>,
}

impl MemoryStateStore {
    /// Create a new empty memory state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of snapshots in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Clear all snapshots from the store
    pub async fn clear(&self) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.clear();
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_state(&self, address: &str) -> Result<Option<ResourceState>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(address).cloned())
    }

    async fn set_state(&self, address: &str, state: &ResourceState) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.insert(address.to_string(), state.clone());
        Ok(())
    }

    async fn delete_state(&self, address: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.remove(address);
        Ok(())
    }

    async fn list_states(&self) -> Result<Vec<String>, Error> {
        let guard = self.inner.read().await;
        let mut addresses: Vec<String> = guard.keys().cloned().collect();
        addresses.sort();
        Ok(addresses)
    }

    async fn flush(&self) -> Result<(), Error> {
        // Nothing to persist
        Ok(())
    }
}
