//! Order history from the backend.

use tracing::debug;

use microshop_client::OrdersApi;
use microshop_core::Order;

use super::unwrap_response;
use crate::error::ApiError;

pub async fn list_orders(api: &OrdersApi) -> Result<Vec<Order>, ApiError> {
    debug!("list_orders command");
    let list = unwrap_response(api.list().await, "Failed to load orders")?;
    Ok(list.orders)
}

pub async fn get_order(api: &OrdersApi, id: &str) -> Result<Order, ApiError> {
    debug!(order_id = %id, "get_order command");
    let payload = unwrap_response(api.get(id).await, "Failed to load order")?;
    Ok(payload.order)
}
