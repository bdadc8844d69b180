//! # Seller Account Endpoints
//!
//! Connected-account lifecycle on the payment processor:
//!
//! ```text
//! create_connect_account ──► get_account_link ──► hosted onboarding
//!                                                       │
//!          microshop://seller/onboarding/return ◄───────┘
//!                     │
//!                     ▼
//!             get_account_status ──► StripeStore
//! ```

use serde::{Deserialize, Serialize};

use microshop_core::{AccountLinkResponse, ApiResponse, StripeAccount};

use crate::client::ApiClient;
use crate::endpoints;

/// Deep link the hosted onboarding returns to when finished.
pub const ONBOARDING_RETURN_URL: &str = "microshop://seller/onboarding/return";
/// Deep link used when the hosted onboarding link expired.
pub const ONBOARDING_REFRESH_URL: &str = "microshop://seller/onboarding/refresh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub stripe_account_id: String,
    pub account: StripeAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatusResponse {
    pub account: StripeAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountLinkRequest<'a> {
    refresh_url: &'a str,
    return_url: &'a str,
}

#[derive(Debug, Clone)]
pub struct StripeApi {
    client: ApiClient,
}

impl StripeApi {
    pub fn new(client: ApiClient) -> Self {
        StripeApi { client }
    }

    /// Creates a connected account for the signed-in user.
    pub async fn create_connect_account(&self) -> ApiResponse<CreateAccountResponse> {
        self.client
            .post_empty(endpoints::stripe::CREATE_ACCOUNT)
            .await
    }

    /// One-time hosted onboarding link.
    pub async fn get_account_link(
        &self,
        refresh_url: &str,
        return_url: &str,
    ) -> ApiResponse<AccountLinkResponse> {
        let body = AccountLinkRequest {
            refresh_url,
            return_url,
        };
        self.client
            .post(endpoints::stripe::ACCOUNT_LINK, &body)
            .await
    }

    pub async fn get_account_status(&self) -> ApiResponse<AccountStatusResponse> {
        self.client.get(endpoints::stripe::ACCOUNT_STATUS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_request_is_camel_case() {
        let json = serde_json::to_value(AccountLinkRequest {
            refresh_url: ONBOARDING_REFRESH_URL,
            return_url: ONBOARDING_RETURN_URL,
        })
        .unwrap();
        assert_eq!(json["refreshUrl"], "microshop://seller/onboarding/refresh");
        assert_eq!(json["returnUrl"], "microshop://seller/onboarding/return");
    }

    #[test]
    fn test_create_account_response_shape() {
        let response: CreateAccountResponse = serde_json::from_str(
            r#"{
                "stripeAccountId": "acct_1",
                "account": {
                    "userId": "1",
                    "stripeAccountId": "acct_1",
                    "chargesEnabled": false,
                    "payoutsEnabled": false,
                    "detailsSubmitted": false,
                    "updatedAt": "2024-01-01T00:00:00Z"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(response.stripe_account_id, "acct_1");
        assert!(!response.account.is_enabled());
    }
}
