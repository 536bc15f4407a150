// Adapters layer: concrete implementations for external systems.

pub mod fs_store;

pub use fs_store::FsPodStore;
