//! # Cart Commands
//!
//! Browse-screen cart over legacy products.
//!
//! ```text
//!  Empty ──add_to_cart──► In Cart ──update_cart_item / remove_from_cart──┐
//!    ▲                       │                                            │
//!    └────── clear_cart ◄────┴────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use microshop_core::validation::validate_quantity;
use microshop_core::{Address, CartItem, Inventory, Product};

use crate::error::ApiError;
use crate::state::{CartState, CartStore, ProductState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub item_count: i64,
    /// Major units.
    pub total: f64,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            items: cart.items.clone(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with(|c| CartResponse::from(c))
}

pub async fn add_to_cart(cart: &CartState, product: Product) -> CartResponse {
    debug!(product_id = %product.id, "add_to_cart command");
    cart.update(|c| {
        c.add_item(product);
        CartResponse::from(&*c)
    })
    .await
}

/// Adds a listing through its legacy product view.
pub async fn add_listing_to_cart(
    cart: &CartState,
    products: &ProductState,
    inventory: &Inventory,
) -> CartResponse {
    let product = Product::from_inventory(inventory);
    products.with_mut(|p| {
        if !p.products.iter().any(|existing| existing.id == product.id) {
            p.add_product(product.clone());
        }
    });
    add_to_cart(cart, product).await
}

/// Zero or less removes the line.
pub async fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity, "update_cart_item command");
    if quantity > 0 {
        validate_quantity(quantity)?;
    }
    Ok(cart
        .update(|c| {
            c.update_quantity(product_id, quantity);
            CartResponse::from(&*c)
        })
        .await)
}

pub async fn remove_from_cart(cart: &CartState, product_id: &str) -> CartResponse {
    cart.update(|c| {
        c.remove_item(product_id);
        CartResponse::from(&*c)
    })
    .await
}

pub async fn clear_cart(cart: &CartState) -> CartResponse {
    cart.update(|c| {
        c.clear_cart();
        CartResponse::from(&*c)
    })
    .await
}

pub async fn set_shipping_address(cart: &CartState, address: Address) {
    cart.update(|c| c.set_shipping_address(address)).await
}

pub async fn set_payment_method(cart: &CartState, method_id: &str) {
    cart.update(|c| c.set_payment_method(method_id)).await
}
