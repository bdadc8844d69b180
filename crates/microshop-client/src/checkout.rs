//! Checkout session endpoint.
//!
//! The backend creates a hosted payment page with a destination charge:
//! funds go to the seller's connected account minus the platform fee.

use serde::{Deserialize, Serialize};

use microshop_core::{ApiResponse, CheckoutSession};

use crate::client::ApiClient;
use crate::endpoints;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    pub inventory_id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl CreateCheckoutSessionRequest {
    pub fn new(inventory_id: impl Into<String>, quantity: i64) -> Self {
        CreateCheckoutSessionRequest {
            inventory_id: inventory_id.into(),
            quantity,
            success_url: None,
            cancel_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckoutSessionResponse {
    pub session: CheckoutSession,
}

#[derive(Debug, Clone)]
pub struct CheckoutApi {
    client: ApiClient,
}

impl CheckoutApi {
    pub fn new(client: ApiClient) -> Self {
        CheckoutApi { client }
    }

    pub async fn create_checkout_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> ApiResponse<CreateCheckoutSessionResponse> {
        self.client
            .post(endpoints::checkout::CREATE_SESSION, request)
            .await
    }
}
