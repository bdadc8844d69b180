//! # Checkout Commands
//!
//! Payments are simulated. Every path ends in [`simulate_payment`], which
//! waits the configured latency and marks the listing sold.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  load_checkout(id, qty) ──► summary (price × qty + shipping)           │
//! │          │                                                              │
//! │          ▼  CheckoutForm::validate                                      │
//! │  pay(method)                                                            │
//! │   ├── Card:      POST /checkout/create-session ──► simulate_payment    │
//! │   ├── ApplePay:  ─────────────────────────────────► simulate_payment    │
//! │   └── GooglePay: ─────────────────────────────────► simulate_payment    │
//! │                                                       │                 │
//! │                          status = sold_out            ▼                 │
//! │                          qty = max(0, qty - n)   "ORD<millis>"          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A completed checkout always sets `sold_out`, even when units remain.

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use microshop_client::checkout::CreateCheckoutSessionRequest;
use microshop_client::CheckoutApi;
use microshop_core::ids::generate_order_id;
use microshop_core::validation::{validate_quantity, CheckoutForm, ValidationResult};
use microshop_core::{
    CheckoutSession, CoreError, Inventory, InventoryStatus, Money, UpdateInventoryRequest,
    ValidationError,
};
use microshop_store::InventoryApi;

use super::unwrap_response;
use crate::config::SimulationSettings;
use crate::error::{ApiError, AppError};
use crate::state::InventoryState;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const NO_LONGER_AVAILABLE: &str = "This product is no longer available for purchase.";
pub const TOTAL_TOO_LARGE: &str = "Order total is too large";
pub const INVENTORY_UPDATE_FAILED: &str =
    "Payment was successful but failed to update inventory. Please contact support.";

/// On the command line these read `card`, `apple-pay` and `google-pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Card,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GooglePay => "Google Pay",
        }
    }
}

/// What the checkout screen shows before paying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub inventory: Inventory,
    pub quantity: i64,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl CheckoutSummary {
    /// Prices `quantity` units plus shipping. Fails instead of wrapping when
    /// the total does not fit in cents.
    pub fn new(inventory: Inventory, quantity: i64) -> ValidationResult<Self> {
        let too_large = || ValidationError::invalid("quantity", TOTAL_TOO_LARGE);

        let subtotal = inventory
            .price()
            .checked_multiply_quantity(quantity)
            .ok_or_else(too_large)?;
        let shipping = Money::from_cents(inventory.shipping_cost_cents.unwrap_or(0));
        let total = subtotal.checked_add(shipping).ok_or_else(too_large)?;

        Ok(CheckoutSummary {
            inventory,
            quantity,
            subtotal_cents: subtotal.cents(),
            shipping_cents: shipping.cents(),
            total_cents: total.cents(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub inventory: Inventory,
    pub total_cents: i64,
    pub method: PaymentMethod,
}

/// Checks a buyer may take `quantity` units of `inventory`.
pub fn ensure_purchasable(inventory: &Inventory, quantity: i64) -> Result<(), CoreError> {
    if inventory.status != InventoryStatus::Active {
        return Err(CoreError::NotPurchasable {
            reason: NO_LONGER_AVAILABLE.to_string(),
        });
    }
    if quantity > inventory.quantity_available {
        return Err(CoreError::NotPurchasable {
            reason: format!("Only {} items available.", inventory.quantity_available),
        });
    }
    Ok(())
}

/// Looks the listing up among the seller's own listings.
pub fn load_checkout(
    store: &InventoryState,
    inventory_id: &str,
    quantity: i64,
) -> Result<CheckoutSummary, ApiError> {
    debug!(inventory_id = %inventory_id, quantity, "load_checkout command");
    validate_quantity(quantity)?;
    let inventory = store
        .with(|s| s.my_inventories.iter().find(|inv| inv.id == inventory_id).cloned())
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))?;

    Ok(CheckoutSummary::new(inventory, quantity)?)
}

/// Buy button of the public product page: resolves the slug, checks
/// availability and opens a hosted checkout session.
pub async fn start_public_checkout(
    inventory_api: &InventoryApi,
    checkout_api: &CheckoutApi,
    slug: &str,
    quantity: i64,
) -> Result<CheckoutSession, ApiError> {
    debug!(slug = %slug, quantity, "start_public_checkout command");
    validate_quantity(quantity)?;
    let inventory = unwrap_response(
        inventory_api.get_inventory_by_slug(slug).await,
        "Failed to get inventory",
    )?
    .inventory;

    ensure_purchasable(&inventory, quantity)?;

    let request = CreateCheckoutSessionRequest::new(inventory.id.clone(), quantity);
    let response = unwrap_response(
        checkout_api.create_checkout_session(&request).await,
        "Failed to create checkout session",
    )?;

    info!(inventory_id = %inventory.id, session_id = %response.session.session_id, "Checkout session created");
    Ok(response.session)
}

/// Pays for `quantity` units of one of the seller's listings.
#[allow(clippy::too_many_arguments)]
pub async fn pay(
    store: &InventoryState,
    inventory_api: &InventoryApi,
    checkout_api: &CheckoutApi,
    simulation: &SimulationSettings,
    form: &CheckoutForm,
    inventory_id: &str,
    quantity: i64,
    method: PaymentMethod,
) -> Result<OrderConfirmation, ApiError> {
    debug!(inventory_id = %inventory_id, quantity, method = method.label(), "pay command");
    let summary = load_checkout(store, inventory_id, quantity)?;
    form.validate()?;

    if method == PaymentMethod::Card {
        let request = CreateCheckoutSessionRequest::new(inventory_id, quantity);
        let response = unwrap_response(
            checkout_api.create_checkout_session(&request).await,
            "Failed to create checkout session",
        )?;
        debug!(session_id = %response.session.session_id, "Checkout session created");
    }

    let (order_id, inventory) =
        simulate_payment(store, inventory_api, simulation, &summary.inventory, quantity).await?;

    Ok(OrderConfirmation {
        order_id,
        inventory,
        total_cents: summary.total_cents,
        method,
    })
}

/// Waits the payment latency, then records the sale.
///
/// Returns the order id and the updated listing.
pub async fn simulate_payment(
    store: &InventoryState,
    inventory_api: &InventoryApi,
    simulation: &SimulationSettings,
    inventory: &Inventory,
    quantity: i64,
) -> Result<(String, Inventory), ApiError> {
    tokio::time::sleep(simulation.payment_delay()).await;

    let order_id = generate_order_id(Utc::now());
    let update = UpdateInventoryRequest {
        status: Some(InventoryStatus::SoldOut),
        quantity_available: Some(inventory.quantity_available.saturating_sub(quantity).max(0)),
        ..Default::default()
    };

    let updated = match unwrap_response(
        inventory_api.update_inventory(&inventory.id, &update).await,
        "Failed to update inventory",
    ) {
        Ok(payload) => payload.inventory,
        Err(e) => {
            error!(order_id = %order_id, inventory_id = %inventory.id, error = %e, "Inventory update after payment failed");
            return Err(AppError::Payment(INVENTORY_UPDATE_FAILED.to_string()).into());
        }
    };

    store.with_mut(|s| s.update_inventory(&inventory.id, &update));
    info!(order_id = %order_id, inventory_id = %inventory.id, remaining = updated.quantity_available, "Payment completed");
    Ok((order_id, updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::inventory::{publish_listing, save_draft};
    use crate::error::ErrorCode;
    use microshop_client::{ApiClient, ApiConfig};
    use microshop_core::validation::ListingForm;
    use microshop_core::{Address, MAX_ITEM_QUANTITY};
    use microshop_store::MemoryStorage;

    fn buyer() -> CheckoutForm {
        CheckoutForm {
            email: "buyer@mail.com".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            address: Address {
                street: "1 Navy Way".into(),
                city: "Arlington".into(),
                state: "VA".into(),
                postal_code: "22201".into(),
                country: "US".into(),
            },
        }
    }

    /// Client pointed at a port nothing listens on.
    fn offline_checkout() -> CheckoutApi {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ApiClient::new(&ApiConfig::new(format!("http://127.0.0.1:{}", port))).unwrap();
        CheckoutApi::new(client)
    }

    async fn active_listing(api: &InventoryApi, store: &InventoryState, qty: &str) -> Inventory {
        let form = ListingForm {
            title: "Lamp".into(),
            price: "10".into(),
            quantity: qty.into(),
            shipping_cost: "5".into(),
            ..Default::default()
        };
        let draft = save_draft(api, store, form).await.unwrap();
        publish_listing(api, store, &draft.id).await.unwrap();
        store.with(|s| s.my_inventories[0].clone())
    }

    #[test]
    fn test_purchase_checks() {
        let mut inv = microshop_core::CreateInventoryRequest {
            title: "Lamp".into(),
            price_cents: 100,
            quantity_available: Some(2),
            ..Default::default()
        }
        .into_draft("i".into(), "s".into(), Utc::now());

        let err = ensure_purchasable(&inv, 1).unwrap_err();
        assert_eq!(err.to_string(), NO_LONGER_AVAILABLE);

        inv.status = InventoryStatus::Active;
        assert_eq!(
            ensure_purchasable(&inv, 3).unwrap_err().to_string(),
            "Only 2 items available."
        );
        assert!(ensure_purchasable(&inv, 2).is_ok());
    }

    #[tokio::test]
    async fn test_summary_adds_shipping() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "3").await;

        let summary = load_checkout(&store, &inv.id, 2).unwrap();
        assert_eq!(summary.subtotal_cents, 2000);
        assert_eq!(summary.shipping_cents, 500);
        assert_eq!(summary.total_cents, 2500);

        let err = load_checkout(&store, "missing", 1).unwrap_err();
        assert_eq!(err.message, "Product not found");
    }

    #[tokio::test]
    async fn test_checkout_quantity_is_bounded() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "2").await;

        for quantity in [0, -1, MAX_ITEM_QUANTITY + 1, i64::MAX / 10] {
            let err = load_checkout(&store, &inv.id, quantity).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }

        let err = pay(
            &store,
            &api,
            &offline_checkout(),
            &SimulationSettings::instant(),
            &buyer(),
            &inv.id,
            999_999_999_999_999_999,
            PaymentMethod::ApplePay,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            store.with(|s| s.my_inventories[0].quantity_available),
            2
        );
    }

    #[test]
    fn test_summary_overflow_is_a_validation_error() {
        let inv = microshop_core::CreateInventoryRequest {
            title: "Yacht".into(),
            price_cents: i64::MAX,
            shipping_cost_cents: Some(500),
            ..Default::default()
        }
        .into_draft("i".into(), "s".into(), Utc::now());

        let err = CheckoutSummary::new(inv.clone(), 2).unwrap_err();
        assert_eq!(err.to_string(), TOTAL_TOO_LARGE);
        assert_eq!(
            CheckoutSummary::new(inv, 1).unwrap_err().to_string(),
            TOTAL_TOO_LARGE
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wallet_payment_marks_sold_out() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "2").await;

        let confirmation = pay(
            &store,
            &api,
            &offline_checkout(),
            &SimulationSettings::default(),
            &buyer(),
            &inv.id,
            1,
            PaymentMethod::ApplePay,
        )
        .await
        .unwrap();

        assert!(confirmation.order_id.starts_with("ORD"));
        assert_eq!(confirmation.inventory.status, InventoryStatus::SoldOut);
        assert_eq!(confirmation.inventory.quantity_available, 1);
        assert_eq!(
            store.with(|s| s.my_inventories[0].status),
            InventoryStatus::SoldOut
        );
    }

    #[tokio::test]
    async fn test_card_payment_surfaces_session_error() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "2").await;

        let err = pay(
            &store,
            &api,
            &offline_checkout(),
            &SimulationSettings::instant(),
            &buyer(),
            &inv.id,
            1,
            PaymentMethod::Card,
        )
        .await
        .unwrap_err();

        assert!(!err.message.is_empty());
        assert_eq!(
            store.with(|s| s.my_inventories[0].status),
            InventoryStatus::Active
        );
    }

    #[tokio::test]
    async fn test_invalid_buyer_form_is_rejected() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "1").await;

        let mut form = buyer();
        form.email = "nope".into();
        let err = pay(
            &store,
            &api,
            &offline_checkout(),
            &SimulationSettings::instant(),
            &form,
            &inv.id,
            1,
            PaymentMethod::GooglePay,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_inventory_update_failure_after_payment() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "1").await;
        api.delete_inventory(&inv.id).await;

        let err = simulate_payment(&store, &api, &SimulationSettings::instant(), &inv, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, INVENTORY_UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_public_checkout_checks_before_network() {
        let api = InventoryApi::new(MemoryStorage::shared());
        let store = InventoryState::default();
        let inv = active_listing(&api, &store, "1").await;

        let err = start_public_checkout(&api, &offline_checkout(), &inv.public_slug, 5)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotPurchasable);
        assert_eq!(err.message, "Only 1 items available.");

        let err = start_public_checkout(&api, &offline_checkout(), "missing", 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
