//! # Repositories
//!
//! SQL lives here; everything above this module talks in keys and values.

pub mod kv;

pub use kv::KvRepository;
