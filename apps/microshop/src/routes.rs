//! # Routes
//!
//! Every screen the app can show, with its parameters, plus the mapping
//! from deep links and share links to screens.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Root ─┬─ Auth ─────── Login, Register                                  │
//! │        ├─ Main tabs ── Orders, CreateOrder, Inventory, Profile          │
//! │        │    ├─ Inventory stack: InventoryList, CreateInventory,         │
//! │        │    │                   EditInventory{id}, InventoryDetail{id}  │
//! │        │    └─ Profile stack:   Profile, Settings, PublicProfile,       │
//! │        │                        SellerOnboarding(Flow), SellerDashboard │
//! │        ├─ PublicProduct{slug}                                           │
//! │        └─ Checkout{id, qty} ──► CheckoutSuccess{orderId}                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Links
//! ```text
//! microshop://product/{slug}              → PublicProduct
//! https://microshop.app/product/{slug}    → PublicProduct
//! microshop://inventory/create            → CreateInventory
//! microshop://inventory/{id}[/edit]       → InventoryDetail / EditInventory
//! microshop://checkout/{id}?quantity=N    → Checkout
//! microshop://orders/{id}                 → CheckoutSuccess
//! microshop://seller/onboarding/return    → SellerDashboard
//! microshop://seller/onboarding/refresh   → SellerOnboarding
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

pub const APP_SCHEME: &str = "microshop";
pub const SHARE_HOST: &str = "microshop.app";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params")]
pub enum Route {
    // root
    Auth,
    Main,
    PublicProduct { slug: String },

    // auth stack
    Login,
    Register,

    // main tabs
    OrdersTab,
    CreateOrderTab,
    InventoryTab,
    ProfileTab,

    // profile stack
    Profile,
    Settings,
    PublicProfile,
    SellerOnboarding,
    SellerOnboardingFlow,
    SellerDashboard,

    // inventory stack
    InventoryList,
    CreateInventory,
    #[serde(rename_all = "camelCase")]
    EditInventory { inventory_id: String },
    #[serde(rename_all = "camelCase")]
    InventoryDetail { inventory_id: String },

    // checkout
    #[serde(rename_all = "camelCase")]
    Checkout { inventory_id: String, quantity: i64 },
    #[serde(rename_all = "camelCase")]
    CheckoutSuccess { order_id: String },
}

impl Route {
    /// Screen for an app deep link or a public share link. `None` when the
    /// link points nowhere the app knows.
    ///
    /// ## Example
    /// ```rust
    /// use microshop_app::routes::Route;
    ///
    /// assert_eq!(
    ///     Route::from_link("https://microshop.app/product/abc123"),
    ///     Some(Route::PublicProduct { slug: "abc123".into() })
    /// );
    /// assert_eq!(
    ///     Route::from_link("microshop://checkout/inv-1?quantity=2"),
    ///     Some(Route::Checkout { inventory_id: "inv-1".into(), quantity: 2 })
    /// );
    /// ```
    pub fn from_link(link: &str) -> Option<Route> {
        let url = Url::parse(link).ok()?;

        let segments: Vec<String> = match url.scheme() {
            APP_SCHEME => url
                .host_str()
                .into_iter()
                .map(str::to_string)
                .chain(path_segments(&url))
                .collect(),
            "http" | "https" if url.host_str() == Some(SHARE_HOST) => path_segments(&url).collect(),
            _ => return None,
        };

        let parts: Vec<&str> = segments.iter().map(String::as_str).collect();
        let route = match parts.as_slice() {
            ["product", slug] => Route::PublicProduct {
                slug: slug.to_string(),
            },
            ["inventory"] => Route::InventoryList,
            ["inventory", "create"] => Route::CreateInventory,
            ["inventory", id] => Route::InventoryDetail {
                inventory_id: id.to_string(),
            },
            ["inventory", id, "edit"] => Route::EditInventory {
                inventory_id: id.to_string(),
            },
            ["checkout", id] => Route::Checkout {
                inventory_id: id.to_string(),
                quantity: quantity_param(&url),
            },
            ["orders", id] => Route::CheckoutSuccess {
                order_id: id.to_string(),
            },
            ["seller", "onboarding", "return"] => Route::SellerDashboard,
            ["seller", "onboarding", "refresh"] => Route::SellerOnboarding,
            ["seller", "dashboard"] => Route::SellerDashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["settings"] => Route::Settings,
            _ => {
                debug!(link = %link, "Unrecognised link");
                return None;
            }
        };

        Some(route)
    }

    /// Shareable link of a public product page.
    pub fn share_link(slug: &str) -> String {
        format!("https://{}/product/{}", SHARE_HOST, slug)
    }

    /// Whether the screen needs a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Route::Auth | Route::Login | Route::Register | Route::PublicProduct { .. }
        )
    }
}

fn path_segments(url: &Url) -> impl Iterator<Item = String> + '_ {
    url.path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `quantity` query parameter; 1 when missing or not a positive integer.
fn quantity_param(url: &Url) -> i64 {
    url.query_pairs()
        .find(|(key, _)| key == "quantity")
        .and_then(|(_, value)| value.parse::<i64>().ok())
        .filter(|q| *q > 0)
        .unwrap_or(1)
}
