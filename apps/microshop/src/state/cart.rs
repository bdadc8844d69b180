//! # Cart State
//!
//! Lines are unique by product id. Everything is persisted
//! (`cart-storage`).
//!
//! ```text
//! add_item(p)            ──► new line qty 1, or existing line qty + 1
//! update_quantity(id, q) ──► q > 0 sets the quantity, q <= 0 removes
//! remove_item(id)        ──► drops the line (missing id is fine)
//! ```

use serde::{Deserialize, Serialize};

use microshop_core::{Address, CartItem, Product};
use microshop_store::keys;

use super::{Persisted, PersistedStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartStore {
    pub items: Vec<CartItem>,
    pub shipping_address: Option<Address>,
    pub selected_payment_method: Option<String>,
}

impl CartStore {
    pub fn add_item(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            product,
            quantity: 1,
        });
    }

    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        for item in self.items.iter_mut().filter(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the lines; address and payment method stay.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    pub fn set_shipping_address(&mut self, address: Address) {
        self.shipping_address = Some(address);
    }

    pub fn set_payment_method(&mut self, method_id: impl Into<String>) {
        self.selected_payment_method = Some(method_id.into());
    }

    /// Sum of `price * quantity`, in dollars.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// The whole cart is the slice.
pub type CartSlice = CartStore;

impl Persisted for CartStore {
    type Slice = CartSlice;
    const KEY: &'static str = keys::CART;

    fn to_slice(&self) -> CartSlice {
        self.clone()
    }

    fn from_slice(slice: CartSlice) -> Self {
        slice
    }
}

pub type CartState = PersistedStore<CartStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use microshop_store::MemoryStorage;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            title: format!("Item {}", id),
            description: String::new(),
            price,
            images: vec![],
            share_link: format!("https://microshop.app/product/{}", id),
            public_slug: None,
            category: None,
            status: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = CartStore::default();
        cart.add_item(product("a", 2.5));
        cart.add_item(product("a", 2.5));
        cart.add_item(product("b", 10.0));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert!((cart.total() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartStore::default();
        cart.add_item(product("a", 1.0));
        cart.update_quantity("a", 4);
        assert_eq!(cart.item_count(), 4);

        cart.update_quantity("a", 0);
        assert!(cart.items.is_empty());

        cart.update_quantity("missing", 3);
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_clear_keeps_address() {
        let mut cart = CartStore::default();
        cart.add_item(product("a", 1.0));
        cart.set_shipping_address(Address {
            street: "1 Main".into(),
            ..Default::default()
        });
        cart.set_payment_method("pm_card");
        cart.clear_cart();

        assert!(cart.items.is_empty());
        assert!(cart.shipping_address.is_some());
        assert_eq!(cart.selected_payment_method.as_deref(), Some("pm_card"));
    }

    #[tokio::test]
    async fn test_cart_survives_rehydrate() {
        let storage = MemoryStorage::shared();
        let state = CartState::rehydrate(storage.clone()).await;
        state.update(|c| c.add_item(product("a", 3.0))).await;

        let reopened = CartState::rehydrate(storage).await;
        assert_eq!(reopened.with(|c| c.item_count()), 1);
    }
}
