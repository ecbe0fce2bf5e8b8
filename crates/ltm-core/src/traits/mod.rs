//! Core traits for LTM node management
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`NodeStore`]: Remote node object calls
//! - [`ResourceData`]: Attribute and identity access for one resource instance
//! - [`Resource`]: Lifecycle callbacks driven by a host runtime
//! - [`StateStore`]: Persistence of resource snapshots between invocations

pub mod node_store;
pub mod resource;
pub mod resource_data;
pub mod state_store;

pub use node_store::{NodeLookup, NodeStore, lookup};
pub use resource::Resource;
pub use resource_data::ResourceData;
pub use state_store::{ResourceState, StateStore};
