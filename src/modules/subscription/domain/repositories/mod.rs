pub mod edge_store;

pub use edge_store::EdgeStore;
