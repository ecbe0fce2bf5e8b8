// # Node Store Implementations
//
// Device transports live outside this crate; the in-memory store stands in
// for a device wherever one is not available.

pub mod memory;

pub use memory::MemoryNodeStore;
