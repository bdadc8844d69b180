//! Order history endpoints.

use serde::{Deserialize, Serialize};

use microshop_core::{ApiResponse, Order};

use crate::client::ApiClient;
use crate::endpoints;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub order: Order,
}

#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    pub fn new(client: ApiClient) -> Self {
        OrdersApi { client }
    }

    pub async fn list(&self) -> ApiResponse<OrderList> {
        self.client.get(endpoints::orders::LIST).await
    }

    pub async fn get(&self, id: &str) -> ApiResponse<OrderPayload> {
        self.client.get(&endpoints::orders::by_id(id)).await
    }
}
