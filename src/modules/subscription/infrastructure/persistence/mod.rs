pub mod edge_store_impl;

pub use edge_store_impl::DieselEdgeStore;
