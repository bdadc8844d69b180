//! # microshop-store: Device-Local Persistence for MicroShop
//!
//! Everything the client keeps between launches goes through one string
//! key/value contract. SQLite backs it in the app; a `HashMap` backs it in
//! tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MicroShop Data Flow                              │
//! │                                                                         │
//! │  Store mutation / inventory command                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  microshop-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐   │   │
//! │  │   │ PersistedSlice│   │  InventoryApi  │   │   Database    │   │   │
//! │  │   │ (persist.rs)  │   │ (local backend)│   │   (pool.rs)   │   │   │
//! │  │   │ {state,ver}   │   │ whole-list blob│   │ SqlitePool    │   │   │
//! │  │   └───────┬───────┘   └───────┬────────┘   │ kv_store      │   │   │
//! │  │           └───────────┬───────┘            └───────▲───────┘   │   │
//! │  │                       ▼                            │           │   │
//! │  │              dyn KeyValueStorage ──────────────────┘           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/microshop/microshop.db (or MICROSHOP_DB_PATH)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - `KeyValueStorage` trait and in-memory adapter
//! - [`pool`] - SQLite pool and configuration
//! - [`migrations`] - Embedded schema
//! - [`repository`] - SQL for the `kv_store` table
//! - [`persist`] - Versioned JSON envelopes for store slices
//! - [`inventory_api`] - Listing CRUD over local storage
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use microshop_store::{Database, DbConfig, InventoryApi};
//! use std::sync::Arc;
//!
//! let db = Database::new(DbConfig::new("path/to/microshop.db")).await?;
//! let inventory = InventoryApi::new(Arc::new(db));
//!
//! let listings = inventory.get_my_inventories().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory_api;
pub mod migrations;
pub mod persist;
pub mod pool;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use inventory_api::InventoryApi;
pub use persist::{keys, PersistedSlice};
pub use pool::{Database, DbConfig};
pub use repository::KvRepository;
pub use storage::{KeyValueStorage, MemoryStorage, SharedStorage};
