//! Legacy product lists for the browse screen. In memory only.

use serde::{Deserialize, Serialize};

use microshop_core::{InventoryStatus, Product, ProductUpdate};

use super::StoreHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStore {
    pub products: Vec<Product>,
    pub my_products: Vec<Product>,
    pub selected_product: Option<Product>,
    pub is_loading: bool,
    pub search_query: String,
    pub selected_category: Option<String>,
}

impl ProductStore {
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn set_my_products(&mut self, products: Vec<Product>) {
        self.my_products = products;
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.insert(0, product.clone());
        self.my_products.insert(0, product);
    }

    /// Merges into every copy with `id`. Timestamps are left alone.
    pub fn update_product(&mut self, id: &str, updates: &ProductUpdate) {
        let copies = self
            .products
            .iter_mut()
            .chain(self.my_products.iter_mut())
            .chain(self.selected_product.iter_mut());

        for product in copies.filter(|p| p.id == id) {
            product.apply_update(updates);
        }
    }

    pub fn delete_product(&mut self, id: &str) {
        self.products.retain(|p| p.id != id);
        self.my_products.retain(|p| p.id != id);
        if self.selected_product.as_ref().map(|p| p.id.as_str()) == Some(id) {
            self.selected_product = None;
        }
    }

    pub fn set_selected_product(&mut self, product: Option<Product>) {
        self.selected_product = product;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_selected_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    /// Active products matching the query (title or description, any
    /// case) and the selected category.
    pub fn filtered_products(&self) -> Vec<Product> {
        let query = self.search_query.to_lowercase();

        self.products
            .iter()
            .filter(|p| p.status == Some(InventoryStatus::Active))
            .filter(|p| {
                query.is_empty()
                    || p.title.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .filter(|p| match &self.selected_category {
                Some(category) => p.category.as_ref() == Some(category),
                None => true,
            })
            .cloned()
            .collect()
    }
}

pub type ProductState = StoreHandle<ProductStore>;
