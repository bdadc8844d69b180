//! # Inventory State
//!
//! In-memory listing lists for the screens. `inventories` is the public
//! feed, `myInventories` the seller's own listings. Nothing keeps the two
//! in sync beyond the reducers below touching both.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use microshop_core::{Inventory, InventoryStatus, UpdateInventoryRequest};

use super::StoreHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStore {
    pub inventories: Vec<Inventory>,
    pub my_inventories: Vec<Inventory>,
    pub selected_inventory: Option<Inventory>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Dashboard tallies over `myInventories`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCounts {
    pub active: usize,
    pub draft: usize,
    pub sold_out: usize,
}

impl InventoryStore {
    pub fn set_inventories(&mut self, inventories: Vec<Inventory>) {
        self.inventories = inventories;
    }

    pub fn set_my_inventories(&mut self, inventories: Vec<Inventory>) {
        self.my_inventories = inventories;
    }

    /// Prepends to both lists.
    pub fn add_inventory(&mut self, inventory: Inventory) {
        self.inventories.insert(0, inventory.clone());
        self.my_inventories.insert(0, inventory);
    }

    /// Merges `updates` into every copy with `id` and refreshes `updatedAt`.
    pub fn update_inventory(&mut self, id: &str, updates: &UpdateInventoryRequest) {
        let now = Utc::now();
        let copies = self
            .inventories
            .iter_mut()
            .chain(self.my_inventories.iter_mut())
            .chain(self.selected_inventory.iter_mut());

        for inventory in copies.filter(|inv| inv.id == id) {
            inventory.apply_update(updates, now);
        }
    }

    pub fn delete_inventory(&mut self, id: &str) {
        self.inventories.retain(|inv| inv.id != id);
        self.my_inventories.retain(|inv| inv.id != id);
        if self.selected_inventory.as_ref().map(|inv| inv.id.as_str()) == Some(id) {
            self.selected_inventory = None;
        }
    }

    pub fn set_selected_inventory(&mut self, inventory: Option<Inventory>) {
        self.selected_inventory = inventory;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    /// Records an error and ends loading.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.is_loading = false;
    }

    /// Scans `inventories` regardless of status.
    pub fn get_inventory_by_slug(&self, slug: &str) -> Option<&Inventory> {
        self.inventories.iter().find(|inv| inv.public_slug == slug)
    }

    pub fn get_active_inventories(&self) -> Vec<Inventory> {
        filter_status(&self.inventories, |s| s == InventoryStatus::Active)
    }

    pub fn get_draft_inventories(&self) -> Vec<Inventory> {
        filter_status(&self.my_inventories, |s| s == InventoryStatus::Draft)
    }

    pub fn clear_inventories(&mut self) {
        self.inventories.clear();
        self.my_inventories.clear();
        self.selected_inventory = None;
        self.error = None;
    }

    pub fn listing_counts(&self) -> ListingCounts {
        self.my_inventories
            .iter()
            .fold(ListingCounts::default(), |mut counts, inv| {
                match inv.status {
                    InventoryStatus::Active => counts.active += 1,
                    InventoryStatus::Draft => counts.draft += 1,
                    InventoryStatus::SoldOut => counts.sold_out += 1,
                    InventoryStatus::Inactive => {}
                }
                counts
            })
    }

    /// "For sale" tab: active and draft listings.
    pub fn for_sale(&self) -> Vec<Inventory> {
        filter_status(&self.my_inventories, |s| {
            matches!(s, InventoryStatus::Active | InventoryStatus::Draft)
        })
    }

    /// "Sold" tab.
    pub fn sold(&self) -> Vec<Inventory> {
        filter_status(&self.my_inventories, |s| s == InventoryStatus::SoldOut)
    }
}

fn filter_status(list: &[Inventory], keep: impl Fn(InventoryStatus) -> bool) -> Vec<Inventory> {
    list.iter().filter(|inv| keep(inv.status)).cloned().collect()
}

pub type InventoryState = StoreHandle<InventoryStore>;
