//! # Inventory API (local backend)
//!
//! Listing CRUD with the same response shapes as the `/inventory` HTTP
//! endpoints, served from device storage until a real backend exists.
//!
//! ## Storage Layout
//! The whole list lives under one key as a bare JSON array:
//! ```text
//! microshop_inventory = [ {Inventory}, {Inventory}, ... ]
//! ```
//! Every operation reads the full list, changes it and writes it back.
//! A missing key is an empty list.
//!
//! ## Failure Semantics
//! Nothing here returns `Err`. Storage and JSON failures are logged and
//! become `{ success: false, error: "Failed to <op> inventory" }`; unknown
//! ids become `{ success: false, error: "Inventory not found" }`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use microshop_core::ids::generate_local_id;
use microshop_core::{
    ApiResponse, CreateInventoryRequest, Inventory, InventoryStatus, UpdateInventoryRequest,
};

use crate::error::{StoreError, StoreResult};
use crate::persist::keys;
use crate::storage::SharedStorage;

// =============================================================================
// Messages
// =============================================================================

pub const NOT_FOUND: &str = "Inventory not found";
pub const PUBLISHED: &str = "Inventory published successfully";

const FAILED_LOAD: &str = "Failed to load inventories";
const FAILED_CREATE: &str = "Failed to create inventory";
const FAILED_UPDATE: &str = "Failed to update inventory";
const FAILED_DELETE: &str = "Failed to delete inventory";
const FAILED_PUBLISH: &str = "Failed to publish inventory";
const FAILED_UNPUBLISH: &str = "Failed to unpublish inventory";
const FAILED_GET: &str = "Failed to get inventory";

// =============================================================================
// Response Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryList {
    pub inventories: Vec<Inventory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPayload {
    pub inventory: Inventory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishPayload {
    pub inventory: Inventory,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePayload {
    pub success: bool,
}

// =============================================================================
// Inventory API
// =============================================================================

/// Local listing backend.
#[derive(Clone)]
pub struct InventoryApi {
    storage: SharedStorage,
}

impl std::fmt::Debug for InventoryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryApi").finish_non_exhaustive()
    }
}

impl InventoryApi {
    pub fn new(storage: SharedStorage) -> Self {
        InventoryApi { storage }
    }

    /// All stored listings, in insertion order.
    pub async fn get_my_inventories(&self) -> ApiResponse<InventoryList> {
        let result = self.load_all().await.map(Some);
        finish("get_my_inventories", FAILED_LOAD, result, |inventories| {
            InventoryList { inventories }
        })
    }

    /// Appends a new `draft` listing with fresh id and slug.
    pub async fn create_inventory(
        &self,
        data: CreateInventoryRequest,
    ) -> ApiResponse<InventoryPayload> {
        let result = async {
            let mut inventories = self.load_all().await?;
            let now = Utc::now();
            let inventory = data.into_draft(generate_local_id(now), generate_local_id(now), now);

            inventories.push(inventory.clone());
            self.save_all(&inventories).await?;

            info!(id = %inventory.id, slug = %inventory.public_slug, "Created draft listing");
            Ok::<_, StoreError>(Some(inventory))
        }
        .await;

        finish("create_inventory", FAILED_CREATE, result, |inventory| {
            InventoryPayload { inventory }
        })
    }

    /// Merges `data` into the listing with `id`.
    pub async fn update_inventory(
        &self,
        id: &str,
        data: &UpdateInventoryRequest,
    ) -> ApiResponse<InventoryPayload> {
        let result = self
            .modify(id, |inventory, now| inventory.apply_update(data, now))
            .await;
        finish("update_inventory", FAILED_UPDATE, result, |inventory| {
            InventoryPayload { inventory }
        })
    }

    /// Removes the listing with `id`. Succeeds whether or not it existed.
    pub async fn delete_inventory(&self, id: &str) -> ApiResponse<DeletePayload> {
        let result = async {
            let mut inventories = self.load_all().await?;
            let before = inventories.len();
            inventories.retain(|inventory| inventory.id != id);
            self.save_all(&inventories).await?;

            debug!(id = %id, removed = before - inventories.len(), "Deleted listing");
            Ok::<_, StoreError>(Some(DeletePayload { success: true }))
        }
        .await;

        finish("delete_inventory", FAILED_DELETE, result, |payload| payload)
    }

    /// Sets the listing `active`.
    pub async fn publish_inventory(&self, id: &str) -> ApiResponse<PublishPayload> {
        let result = self
            .modify(id, |inventory, now| {
                inventory.apply_update(&UpdateInventoryRequest::status(InventoryStatus::Active), now)
            })
            .await;
        finish("publish_inventory", FAILED_PUBLISH, result, |inventory| {
            PublishPayload {
                inventory,
                message: PUBLISHED.to_string(),
            }
        })
    }

    /// Returns the listing to `draft`.
    pub async fn unpublish_inventory(&self, id: &str) -> ApiResponse<InventoryPayload> {
        let result = self
            .modify(id, |inventory, now| {
                inventory.apply_update(&UpdateInventoryRequest::status(InventoryStatus::Draft), now)
            })
            .await;
        finish("unpublish_inventory", FAILED_UNPUBLISH, result, |inventory| {
            InventoryPayload { inventory }
        })
    }

    /// Public lookup: only `active` listings are visible by slug.
    pub async fn get_inventory_by_slug(&self, slug: &str) -> ApiResponse<InventoryPayload> {
        let result = self.load_all().await.map(|inventories| {
            inventories
                .into_iter()
                .find(|inv| inv.public_slug == slug && inv.status == InventoryStatus::Active)
        });
        finish("get_inventory_by_slug", FAILED_GET, result, |inventory| {
            InventoryPayload { inventory }
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load_all(&self) -> StoreResult<Vec<Inventory>> {
        match self.storage.get_item(keys::INVENTORY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, inventories: &[Inventory]) -> StoreResult<()> {
        let raw = serde_json::to_string(inventories)?;
        self.storage.set_item(keys::INVENTORY, &raw).await
    }

    /// Applies `change` to the listing with `id` and writes the list back.
    /// `Ok(None)` when no such listing exists; nothing is written then.
    async fn modify<F>(&self, id: &str, change: F) -> StoreResult<Option<Inventory>>
    where
        F: FnOnce(&mut Inventory, chrono::DateTime<Utc>),
    {
        let mut inventories = self.load_all().await?;
        let Some(inventory) = inventories.iter_mut().find(|inv| inv.id == id) else {
            debug!(id = %id, "Listing not found");
            return Ok(None);
        };

        change(inventory, Utc::now());
        let updated = inventory.clone();

        self.save_all(&inventories).await?;
        Ok(Some(updated))
    }
}

/// Flattens an operation result into the response envelope.
fn finish<T, R>(
    op: &'static str,
    failure: &'static str,
    result: StoreResult<Option<T>>,
    wrap: impl FnOnce(T) -> R,
) -> ApiResponse<R> {
    match result {
        Ok(Some(value)) => ApiResponse::ok(wrap(value)),
        Ok(None) => ApiResponse::err(NOT_FOUND),
        Err(e) => {
            error!(op, error = %e, "Inventory storage operation failed");
            ApiResponse::err(failure)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
