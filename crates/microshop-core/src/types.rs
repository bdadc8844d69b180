//! # Domain Types
//!
//! Records shared by the stores, the mock inventory backend and the HTTP
//! client. Every type serializes to camelCase JSON so that blobs already
//! written to device storage by earlier app versions still deserialize.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Inventory     │   │      Order      │   │  StripeAccount  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, publicSlug │   │  inventoryId    │   │  chargesEnabled │       │
//! │  │  priceCents     │   │  amountTotal    │   │  payoutsEnabled │       │
//! │  │  status         │   │  status         │   │  requirements   │       │
//! │  └────────┬────────┘   └─────────────────┘   └────────┬────────┘       │
//! │           │ from_inventory                            │ SellerStatus    │
//! │  ┌────────▼────────┐   ┌─────────────────┐            ▼                 │
//! │  │ Product (legacy)│◄──│    CartItem     │   not_started / incomplete  │
//! │  │  price (float)  │   │  quantity       │   / active                  │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Inventory Lifecycle
//! ```text
//!   create ──► draft ──publish──► active ──checkout──► sold_out
//!                ▲                  │
//!                └────unpublish─────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_CURRENCY, LOCAL_USER_ID, SHARE_LINK_BASE};

// =============================================================================
// Inventory Status
// =============================================================================

/// Where a listing is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    /// Saved but not visible to buyers.
    Draft,
    /// Public and purchasable through its slug.
    Active,
    /// A checkout completed against it.
    SoldOut,
    /// Hidden by the seller.
    Inactive,
}

impl InventoryStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Draft => "draft",
            InventoryStatus::Active => "active",
            InventoryStatus::SoldOut => "sold_out",
            InventoryStatus::Inactive => "inactive",
        }
    }

    /// Badge text used on listing cards.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::Draft => "Draft",
            InventoryStatus::Active => "Active",
            InventoryStatus::SoldOut => "Sold Out",
            InventoryStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A single sellable listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Lowercase ISO code, `usd` by default.
    pub currency: String,
    pub quantity_available: i64,
    pub status: InventoryStatus,
    /// Public identifier used in share links.
    pub public_slug: String,
    pub images: Vec<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost_cents: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Shareable URL of the public product page.
    pub fn share_link(&self) -> String {
        share_link_for(&self.public_slug)
    }

    /// Whether a buyer may check out `quantity` units right now.
    pub fn can_purchase(&self, quantity: i64) -> bool {
        self.status == InventoryStatus::Active && quantity > 0 && quantity <= self.quantity_available
    }

    /// Merges the present fields of `update` into this record and stamps
    /// `updated_at`. Absent fields are left untouched.
    pub fn apply_update(&mut self, update: &UpdateInventoryRequest, now: DateTime<Utc>) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(price_cents) = update.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(currency) = &update.currency {
            self.currency = currency.clone();
        }
        if let Some(quantity) = update.quantity_available {
            self.quantity_available = quantity;
        }
        if let Some(images) = &update.images {
            self.images = images.clone();
        }
        if let Some(category) = &update.category {
            self.category = Some(category.clone());
        }
        if let Some(condition) = &update.condition {
            self.condition = Some(condition.clone());
        }
        if let Some(size) = &update.size {
            self.size = Some(size.clone());
        }
        if let Some(weight) = &update.weight {
            self.weight = Some(weight.clone());
        }
        if let Some(shipping) = update.shipping_cost_cents {
            self.shipping_cost_cents = Some(shipping);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Builds the public product URL for a slug.
pub fn share_link_for(slug: &str) -> String {
    format!("{}/{}", SHARE_LINK_BASE, slug)
}

// =============================================================================
// Inventory Requests
// =============================================================================

/// Payload for creating a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<i64>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost_cents: Option<i64>,
}

impl CreateInventoryRequest {
    /// Turns the request into a new `draft` listing owned by the local user.
    ///
    /// ## Defaults
    /// - currency `usd`
    /// - quantity 1 when missing or zero
    /// - no images
    pub fn into_draft(self, id: String, public_slug: String, now: DateTime<Utc>) -> Inventory {
        let quantity_available = match self.quantity_available {
            Some(q) if q != 0 => q,
            _ => 1,
        };

        Inventory {
            id,
            user_id: LOCAL_USER_ID.to_string(),
            title: self.title,
            description: self.description,
            price_cents: self.price_cents,
            currency: self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            quantity_available,
            status: InventoryStatus::Draft,
            public_slug,
            images: self.images.unwrap_or_default(),
            category: self.category,
            condition: self.condition,
            size: self.size,
            weight: self.weight,
            shipping_cost_cents: self.shipping_cost_cents,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial listing update. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<i64>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost_cents: Option<i64>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
}

impl UpdateInventoryRequest {
    /// An update that only changes the status.
    pub fn status(status: InventoryStatus) -> Self {
        UpdateInventoryRequest {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Full edit from the listing form: every create field becomes present,
/// status is untouched.
impl From<CreateInventoryRequest> for UpdateInventoryRequest {
    fn from(req: CreateInventoryRequest) -> Self {
        UpdateInventoryRequest {
            title: Some(req.title),
            description: Some(req.description),
            price_cents: Some(req.price_cents),
            currency: req.currency,
            quantity_available: req.quantity_available,
            images: req.images,
            category: req.category,
            condition: req.condition,
            size: req.size,
            weight: req.weight,
            shipping_cost_cents: req.shipping_cost_cents,
            status: None,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Partial profile edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn apply_update(&mut self, update: &UserUpdate) {
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(display_name) = &update.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(avatar) = &update.avatar {
            self.avatar = Some(avatar.clone());
        }
    }
}

// =============================================================================
// Stripe Connect
// =============================================================================

/// Outstanding verification items reported by the payment processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StripeAccountRequirements {
    pub currently_due: Vec<String>,
    pub eventually_due: Vec<String>,
    pub past_due: Vec<String>,
    pub pending_verification: Vec<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
}

/// A seller's connected payment account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StripeAccount {
    pub user_id: String,
    pub stripe_account_id: String,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub details_submitted: bool,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<StripeAccountRequirements>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Partial account update (webhook / status refresh).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StripeAccountUpdate {
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges_enabled: Option<bool>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payouts_enabled: Option<bool>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_submitted: Option<bool>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<StripeAccountRequirements>,
}

impl StripeAccount {
    /// True once both charges and payouts are enabled.
    pub fn is_enabled(&self) -> bool {
        self.charges_enabled && self.payouts_enabled
    }

    pub fn apply_update(&mut self, update: &StripeAccountUpdate, now: DateTime<Utc>) {
        if let Some(v) = update.charges_enabled {
            self.charges_enabled = v;
        }
        if let Some(v) = update.payouts_enabled {
            self.payouts_enabled = v;
        }
        if let Some(v) = update.details_submitted {
            self.details_submitted = v;
        }
        if let Some(requirements) = &update.requirements {
            self.requirements = Some(requirements.clone());
        }
        self.updated_at = now;
    }
}

/// Derived seller readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SellerStatus {
    NotStarted,
    Incomplete,
    Active,
}

impl SellerStatus {
    /// `active` iff both flags are set, `incomplete` if an account exists,
    /// otherwise `not_started`.
    pub fn of(account: Option<&StripeAccount>) -> Self {
        match account {
            Some(a) if a.is_enabled() => SellerStatus::Active,
            Some(_) => SellerStatus::Incomplete,
            None => SellerStatus::NotStarted,
        }
    }

    /// Headline shown on the seller dashboard.
    pub fn headline(&self) -> &'static str {
        match self {
            SellerStatus::Active => "Ready to Sell",
            SellerStatus::Incomplete => "Setup Incomplete",
            SellerStatus::NotStarted => "Not Set Up",
        }
    }
}

/// Hosted onboarding link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinkResponse {
    pub url: String,
    /// Unix seconds.
    pub expires_at: i64,
}

// =============================================================================
// Legacy Product
// =============================================================================

/// Older product shape kept for the browse/cart screens.
///
/// Price is a float in major units. Nothing reconciles products with
/// listings beyond [`Product::from_inventory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub share_link: String,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_slug: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Legacy view of a listing, as the create-product screen builds it.
    pub fn from_inventory(inventory: &Inventory) -> Self {
        Product {
            id: inventory.id.clone(),
            title: inventory.title.clone(),
            description: inventory.description.clone(),
            price: inventory.price().to_major_units(),
            images: inventory.images.clone(),
            share_link: inventory.share_link(),
            public_slug: Some(inventory.public_slug.clone()),
            category: inventory.category.clone(),
            status: Some(inventory.status),
            created_at: inventory.created_at,
            updated_at: inventory.updated_at,
        }
    }

    pub fn apply_update(&mut self, update: &ProductUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(images) = &update.images {
            self.images = images.clone();
        }
        if let Some(category) = &update.category {
            self.category = Some(category.clone());
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
    }
}

/// Partial product edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
}

// =============================================================================
// Cart & Address
// =============================================================================

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Line total in major units.
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Shipping address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

// =============================================================================
// Orders & Checkout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Paid,
    Failed,
    Refunded,
    Disputed,
}

/// A purchase of one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub inventory_id: String,
    pub stripe_checkout_session_id: String,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_payment_intent_id: Option<String>,
    pub seller_stripe_account_id: String,
    pub amount_total_cents: i64,
    pub currency: String,
    pub status: OrderStatus,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total charged for this order.
    #[inline]
    pub fn amount_total(&self) -> Money {
        Money::from_cents(self.amount_total_cents)
    }

    /// Marketplace fee withheld from the seller's payout.
    pub fn application_fee(&self) -> Money {
        self.amount_total().platform_fee()
    }
}

/// Hosted checkout session returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

// =============================================================================
// API Response Envelope
// =============================================================================

/// Uniform result envelope: every API-facing operation returns one of these
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiResponse<T> {
    pub success: bool,
    // A missing `Option` field already reads as `None`; `default` here would
    // demand `T: Default` of every payload.
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts to a `Result`, substituting `fallback` when a failed
    /// response carries no message (or a successful one carries no data).
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| fallback.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inventory() -> Inventory {
        let now = Utc::now();
        CreateInventoryRequest {
            title: "Vintage Jacket".to_string(),
            description: "Denim, barely worn".to_string(),
            price_cents: 4500,
            quantity_available: Some(2),
            category: Some("clothing".to_string()),
            ..Default::default()
        }
        .into_draft("1700000000000abc".to_string(), "1700000000000xyz".to_string(), now)
    }

    #[test]
    fn test_into_draft_applies_defaults() {
        let inv = CreateInventoryRequest {
            title: "Mug".to_string(),
            price_cents: 800,
            quantity_available: Some(0),
            ..Default::default()
        }
        .into_draft("id".to_string(), "slug".to_string(), Utc::now());

        assert_eq!(inv.status, InventoryStatus::Draft);
        assert_eq!(inv.currency, "usd");
        assert_eq!(inv.quantity_available, 1);
        assert_eq!(inv.user_id, LOCAL_USER_ID);
        assert!(inv.images.is_empty());
        assert_eq!(inv.created_at, inv.updated_at);
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut inv = sample_inventory();
        let before = inv.clone();
        let later = before.updated_at + chrono::Duration::seconds(5);

        inv.apply_update(
            &UpdateInventoryRequest {
                price_cents: Some(3900),
                ..Default::default()
            },
            later,
        );

        assert_eq!(inv.price_cents, 3900);
        assert_eq!(inv.title, before.title);
        assert_eq!(inv.category, before.category);
        assert_eq!(inv.status, InventoryStatus::Draft);
        assert_eq!(inv.updated_at, later);
        assert_eq!(inv.created_at, before.created_at);
    }

    #[test]
    fn test_inventory_json_is_camel_case() {
        let inv = sample_inventory();
        let json = serde_json::to_value(&inv).unwrap();

        assert_eq!(json["priceCents"], 4500);
        assert_eq!(json["quantityAvailable"], 2);
        assert_eq!(json["publicSlug"], "1700000000000xyz");
        assert_eq!(json["status"], "draft");
        assert!(json.get("size").is_none());

        let sold: InventoryStatus = serde_json::from_str("\"sold_out\"").unwrap();
        assert_eq!(sold, InventoryStatus::SoldOut);
    }

    #[test]
    fn test_can_purchase() {
        let mut inv = sample_inventory();
        assert!(!inv.can_purchase(1));

        inv.status = InventoryStatus::Active;
        assert!(inv.can_purchase(2));
        assert!(!inv.can_purchase(3));
        assert!(!inv.can_purchase(0));
    }

    #[test]
    fn test_seller_status() {
        assert_eq!(SellerStatus::of(None), SellerStatus::NotStarted);

        let mut account = StripeAccount {
            user_id: "1".to_string(),
            stripe_account_id: "acct_123".to_string(),
            charges_enabled: true,
            payouts_enabled: false,
            details_submitted: true,
            requirements: None,
            updated_at: Utc::now(),
        };
        assert_eq!(SellerStatus::of(Some(&account)), SellerStatus::Incomplete);
        assert_eq!(SellerStatus::of(Some(&account)).headline(), "Setup Incomplete");

        account.apply_update(
            &StripeAccountUpdate {
                payouts_enabled: Some(true),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(SellerStatus::of(Some(&account)), SellerStatus::Active);
        assert_eq!(
            serde_json::to_value(SellerStatus::NotStarted).unwrap(),
            "not_started"
        );
    }

    #[test]
    fn test_product_from_inventory() {
        let inv = sample_inventory();
        let product = Product::from_inventory(&inv);

        assert_eq!(product.id, inv.id);
        assert!((product.price - 45.0).abs() < f64::EPSILON);
        assert_eq!(
            product.share_link,
            "https://microshop.app/product/1700000000000xyz"
        );
        assert_eq!(product.status, Some(InventoryStatus::Draft));
    }

    #[test]
    fn test_order_fee() {
        let order = Order {
            id: "ORD1".to_string(),
            inventory_id: "inv".to_string(),
            stripe_checkout_session_id: "cs_1".to_string(),
            stripe_payment_intent_id: None,
            seller_stripe_account_id: "acct_1".to_string(),
            amount_total_cents: 2000,
            currency: "usd".to_string(),
            status: OrderStatus::Paid,
            buyer_email: None,
            quantity: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(order.application_fee().cents(), 100);
    }

    #[test]
    fn test_api_response_envelope() {
        let ok: ApiResponse<i32> = ApiResponse::ok(7);
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"success":true,"data":7}"#);
        assert_eq!(ok.into_result("x"), Ok(7));

        let err: ApiResponse<i32> = ApiResponse::err("Inventory not found");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"success":false,"error":"Inventory not found"}"#
        );

        let bare: ApiResponse<i32> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(bare.into_result("Failed to create checkout session"),
            Err("Failed to create checkout session".to_string()));
    }

    #[test]
    fn test_api_response_payload_needs_no_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Session {
            url: String,
        }

        let failed: ApiResponse<Session> =
            serde_json::from_str(r#"{"success":false,"error":"Seller not onboarded"}"#).unwrap();
        assert_eq!(failed.data, None);
        assert_eq!(failed.error.as_deref(), Some("Seller not onboarded"));

        let ok: ApiResponse<Session> =
            serde_json::from_str(r#"{"success":true,"data":{"url":"https://pay"}}"#).unwrap();
        assert_eq!(ok.into_result("x").unwrap().url, "https://pay");
    }

    #[test]
    fn test_skipped_fields_are_optional_in_typescript() {
        let decl = CreateInventoryRequest::decl();
        assert!(decl.contains("title: string"), "{decl}");
        assert!(decl.contains("category?: string"), "{decl}");
        assert!(!decl.contains("category: string | null"), "{decl}");
    }
}
