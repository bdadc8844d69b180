//! # Inventory Commands
//!
//! Listing lifecycle as the seller drives it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Listing Lifecycle                                    │
//! │                                                                         │
//! │   save_draft ───────► ┌───────┐  publish_listing  ┌────────┐            │
//! │                       │ draft │ ────────────────► │ active │            │
//! │   create_and_publish  └───────┘ ◄──────────────── └───┬────┘            │
//! │   (seller enabled) ───────────────────────────────────►│               │
//! │                              unpublish_listing        │ checkout       │
//! │                                                        ▼                │
//! │                                                  ┌──────────┐           │
//! │                                                  │ sold_out │           │
//! │                                                  └──────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command writes through [`InventoryApi`] first and mirrors the
//! result into the [`InventoryState`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use microshop_core::validation::ListingForm;
use microshop_core::{CoreError, Inventory, InventoryStatus, UpdateInventoryRequest};
use microshop_store::InventoryApi;

use super::unwrap_response;
use crate::error::ApiError;
use crate::state::{InventoryState, StripeState};

/// Shown when the listing was saved but publishing it failed.
pub const PARTIAL_PUBLISH: &str =
    "Draft saved but publishing failed. You can publish later from your listings.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub inventory: Inventory,
    pub published: bool,
    pub message: String,
}

/// Loads the seller's listings into both store lists.
pub async fn load_my_inventories(
    api: &InventoryApi,
    store: &InventoryState,
) -> Result<Vec<Inventory>, ApiError> {
    debug!("load_my_inventories command");
    store.with_mut(|s| s.set_loading(true));

    match unwrap_response(api.get_my_inventories().await, "Failed to load inventories") {
        Ok(list) => {
            store.with_mut(|s| {
                s.set_inventories(list.inventories.clone());
                s.set_my_inventories(list.inventories.clone());
                s.set_loading(false);
            });
            Ok(list.inventories)
        }
        Err(e) => {
            store.with_mut(|s| s.set_error(Some(e.to_string())));
            Err(e.into())
        }
    }
}

pub async fn save_draft(
    api: &InventoryApi,
    store: &InventoryState,
    form: ListingForm,
) -> Result<Inventory, ApiError> {
    debug!(title = %form.title, "save_draft command");
    let request = form.into_request()?;

    let payload = unwrap_response(
        api.create_inventory(request).await,
        "Failed to save draft",
    )?;

    store.with_mut(|s| s.add_inventory(payload.inventory.clone()));
    info!(id = %payload.inventory.id, "Draft saved");
    Ok(payload.inventory)
}

/// Creates the listing and publishes it in one go.
///
/// Needs a fully enabled seller account. If the publish step fails the
/// draft is kept and the outcome reports `published: false`.
pub async fn create_and_publish(
    api: &InventoryApi,
    store: &InventoryState,
    stripe: &StripeState,
    form: ListingForm,
) -> Result<PublishOutcome, ApiError> {
    debug!(title = %form.title, "create_and_publish command");
    let request = form.into_request()?;

    if !stripe.with(|s| s.is_seller_enabled()) {
        return Err(CoreError::SellerNotEnabled.into());
    }

    let created = unwrap_response(
        api.create_inventory(request).await,
        "Failed to create listing",
    )?;

    match unwrap_response(
        api.publish_inventory(&created.inventory.id).await,
        "Failed to publish inventory",
    ) {
        Ok(published) => {
            store.with_mut(|s| s.add_inventory(published.inventory.clone()));
            info!(id = %published.inventory.id, "Listing published");
            Ok(PublishOutcome {
                inventory: published.inventory,
                published: true,
                message: "Listing published successfully!".to_string(),
            })
        }
        Err(e) => {
            warn!(id = %created.inventory.id, error = %e, "Publish after create failed");
            store.with_mut(|s| s.add_inventory(created.inventory.clone()));
            Ok(PublishOutcome {
                inventory: created.inventory,
                published: false,
                message: PARTIAL_PUBLISH.to_string(),
            })
        }
    }
}

/// Replaces the editable fields of a listing with the form's values.
pub async fn update_listing(
    api: &InventoryApi,
    store: &InventoryState,
    id: &str,
    form: ListingForm,
) -> Result<Inventory, ApiError> {
    debug!(id = %id, "update_listing command");
    let update = UpdateInventoryRequest::from(form.into_request()?);

    let payload = unwrap_response(
        api.update_inventory(id, &update).await,
        "Failed to update inventory",
    )?;

    store.with_mut(|s| s.update_inventory(id, &update));
    info!(id = %id, "Listing updated");
    Ok(payload.inventory)
}

/// Returns the confirmation message.
pub async fn publish_listing(
    api: &InventoryApi,
    store: &InventoryState,
    id: &str,
) -> Result<String, ApiError> {
    debug!(id = %id, "publish_listing command");
    let payload = unwrap_response(api.publish_inventory(id).await, "Failed to publish inventory")?;

    store.with_mut(|s| {
        s.update_inventory(id, &UpdateInventoryRequest::status(InventoryStatus::Active))
    });
    info!(id = %id, "Listing published");
    Ok(payload.message)
}

pub async fn unpublish_listing(
    api: &InventoryApi,
    store: &InventoryState,
    id: &str,
) -> Result<Inventory, ApiError> {
    debug!(id = %id, "unpublish_listing command");
    let payload = unwrap_response(
        api.unpublish_inventory(id).await,
        "Failed to unpublish inventory",
    )?;

    store.with_mut(|s| {
        s.update_inventory(id, &UpdateInventoryRequest::status(InventoryStatus::Draft))
    });
    info!(id = %id, "Listing unpublished");
    Ok(payload.inventory)
}

pub async fn delete_listing(
    api: &InventoryApi,
    store: &InventoryState,
    id: &str,
) -> Result<(), ApiError> {
    debug!(id = %id, "delete_listing command");
    unwrap_response(api.delete_inventory(id).await, "Failed to delete inventory")?;

    store.with_mut(|s| s.delete_inventory(id));
    info!(id = %id, "Listing deleted");
    Ok(())
}

/// Public product page lookup. Only active listings resolve.
pub async fn public_listing(api: &InventoryApi, slug: &str) -> Result<Inventory, ApiError> {
    debug!(slug = %slug, "public_listing command");
    let payload = unwrap_response(
        api.get_inventory_by_slug(slug).await,
        "Failed to get inventory",
    )?;
    Ok(payload.inventory)
}

/// Marks one of the seller's listings as selected.
pub fn select_listing(store: &InventoryState, id: &str) -> Result<Inventory, ApiError> {
    store.with_mut(|s| {
        let found = s.my_inventories.iter().find(|inv| inv.id == id).cloned();
        s.set_selected_inventory(found.clone());
        found.ok_or_else(|| ApiError::not_found("Inventory not found"))
    })
}

pub fn share_link(store: &InventoryState, id: &str) -> Result<String, ApiError> {
    store
        .with(|s| {
            s.my_inventories
                .iter()
                .find(|inv| inv.id == id)
                .map(Inventory::share_link)
        })
        .ok_or_else(|| ApiError::not_found("Inventory not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use microshop_core::StripeAccount;
    use microshop_store::MemoryStorage;

    fn form(title: &str) -> ListingForm {
        ListingForm {
            title: title.into(),
            price: "25".into(),
            quantity: "2".into(),
            ..Default::default()
        }
    }

    async fn enabled_seller() -> StripeState {
        let stripe = StripeState::rehydrate(MemoryStorage::shared()).await;
        stripe
            .update(|s| {
                s.set_stripe_account(Some(StripeAccount {
                    user_id: "1".into(),
                    stripe_account_id: "acct_test".into(),
                    charges_enabled: true,
                    payouts_enabled: true,
                    details_submitted: true,
                    requirements: None,
                    updated_at: Utc::now(),
                }))
            })
            .await;
        stripe
    }

    fn api() -> InventoryApi {
        InventoryApi::new(MemoryStorage::shared())
    }

    #[tokio::test]
    async fn test_save_draft_mirrors_into_store() {
        let (api, store) = (api(), InventoryState::default());
        let draft = save_draft(&api, &store, form("Lamp")).await.unwrap();

        assert_eq!(draft.status, InventoryStatus::Draft);
        assert_eq!(draft.quantity_available, 2);
        assert_eq!(store.with(|s| s.my_inventories.len()), 1);
        assert_eq!(store.with(|s| s.inventories[0].id.clone()), draft.id);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_storage() {
        let (api, store) = (api(), InventoryState::default());
        let err = save_draft(&api, &store, form("  ")).await.unwrap_err();

        assert_eq!(err.message, "Please enter a title");
        let stored = api.get_my_inventories().await.data.unwrap();
        assert!(stored.inventories.is_empty());
    }

    #[tokio::test]
    async fn test_publish_requires_enabled_seller() {
        let (api, store) = (api(), InventoryState::default());
        let stripe = StripeState::rehydrate(MemoryStorage::shared()).await;

        let err = create_and_publish(&api, &store, &stripe, form("Lamp"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SellerSetupRequired);
        assert!(store.with(|s| s.my_inventories.is_empty()));
    }

    #[tokio::test]
    async fn test_create_and_publish_goes_active() {
        let (api, store) = (api(), InventoryState::default());
        let stripe = enabled_seller().await;

        let outcome = create_and_publish(&api, &store, &stripe, form("Lamp"))
            .await
            .unwrap();
        assert!(outcome.published);
        assert_eq!(outcome.inventory.status, InventoryStatus::Active);

        let public = public_listing(&api, &outcome.inventory.public_slug).await.unwrap();
        assert_eq!(public.id, outcome.inventory.id);
    }

    #[tokio::test]
    async fn test_publish_unpublish_round_trip_updates_store() {
        let (api, store) = (api(), InventoryState::default());
        let draft = save_draft(&api, &store, form("Lamp")).await.unwrap();

        let message = publish_listing(&api, &store, &draft.id).await.unwrap();
        assert_eq!(message, "Inventory published successfully");
        assert_eq!(store.with(|s| s.get_active_inventories().len()), 1);

        let back = unpublish_listing(&api, &store, &draft.id).await.unwrap();
        assert_eq!(back.status, InventoryStatus::Draft);
        assert_eq!(store.with(|s| s.get_draft_inventories().len()), 1);
    }

    #[tokio::test]
    async fn test_missing_listing_maps_to_not_found() {
        let (api, store) = (api(), InventoryState::default());
        let err = publish_listing(&api, &store, "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Inventory not found");

        assert!(delete_listing(&api, &store, "nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_listing_replaces_fields() {
        let (api, store) = (api(), InventoryState::default());
        let draft = save_draft(&api, &store, form("Lamp")).await.unwrap();

        let mut edit = form("Desk Lamp");
        edit.price = "30".into();
        let updated = update_listing(&api, &store, &draft.id, edit).await.unwrap();

        assert_eq!(updated.title, "Desk Lamp");
        assert_eq!(updated.price_cents, 3000);
        assert_eq!(updated.status, InventoryStatus::Draft);
        assert_eq!(store.with(|s| s.my_inventories[0].title.clone()), "Desk Lamp");
    }

    #[tokio::test]
    async fn test_load_select_and_share() {
        let api = api();
        let draft = save_draft(&api, &InventoryState::default(), form("Lamp"))
            .await
            .unwrap();

        let store = InventoryState::default();
        let loaded = load_my_inventories(&api, &store).await.unwrap();
        assert_eq!(loaded.len(), 1);

        let selected = select_listing(&store, &draft.id).unwrap();
        assert_eq!(store.with(|s| s.selected_inventory.clone()), Some(selected));

        let link = share_link(&store, &draft.id).unwrap();
        assert_eq!(
            link,
            format!("https://microshop.app/product/{}", draft.public_slug)
        );
        assert!(share_link(&store, "nope").is_err());
    }
}
