// # ltm-core
//
// Core library for managing BIG-IP LTM objects as declarative resources.
//
// ## Architecture Overview
//
// - **NodeStore**: Trait for the remote node operations of a device session
// - **Resource**: Trait for the Create/Read/Update/Delete lifecycle of a resource type
// - **ResourceData**: Trait for the identity and attributes of one resource instance
// - **ResourceSchema**: Declared attributes with defaults, validation and force-new flags
// - **StateStore**: Trait for persisting resource instances between runs
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Lifecycle logic never talks to a transport directly
// 2. **Library-First**: Everything can be embedded in a host process
// 3. **Device-Reported State**: Computed attributes always come from the device

pub mod address;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod schema;
pub mod state;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{FqdnConfig, NodeConfig, StateStoreConfig};
pub use data::ResourceDataMap;
pub use error::{Error, Operation, Result};
pub use model::{Fqdn, Node, SessionState};
pub use schema::{Attribute, ResourceSchema};
pub use state::{FileStateStore, MemoryStateStore, create_state_store};
pub use store::MemoryNodeStore;
pub use traits::{NodeLookup, NodeStore, Resource, ResourceData, ResourceState, StateStore};
