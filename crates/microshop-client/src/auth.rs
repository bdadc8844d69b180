//! Account endpoints. The app signs in locally today; these are the calls
//! it makes once a backend answers on `/auth/*`.

use serde::{Deserialize, Serialize};

use microshop_core::{ApiResponse, User};

use crate::client::ApiClient;
use crate::endpoints;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        AuthApi { client }
    }

    /// On success the returned token becomes the client's bearer token.
    pub async fn login(&self, request: &LoginRequest) -> ApiResponse<AuthResponse> {
        let response: ApiResponse<AuthResponse> =
            self.client.post(endpoints::auth::LOGIN, request).await;
        self.adopt_token(&response);
        response
    }

    pub async fn signup(&self, request: &SignupRequest) -> ApiResponse<AuthResponse> {
        let response: ApiResponse<AuthResponse> =
            self.client.post(endpoints::auth::SIGNUP, request).await;
        self.adopt_token(&response);
        response
    }

    /// Clears the bearer token whatever the server says.
    pub async fn logout(&self) -> ApiResponse<LogoutResponse> {
        let response = self.client.post_empty(endpoints::auth::LOGOUT).await;
        self.client.set_auth_token(None);
        response
    }

    fn adopt_token(&self, response: &ApiResponse<AuthResponse>) {
        if let Some(auth) = &response.data {
            self.client.set_auth_token(Some(auth.token.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_logout_clears_token_even_when_offline() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&ApiConfig::new(format!("http://{}", addr))).unwrap();
        client.set_auth_token(Some("mock-token-123".to_string()));

        let response = AuthApi::new(client.clone()).logout().await;
        assert!(!response.success);
        assert_eq!(client.auth_token(), None);
    }

    #[test]
    fn test_signup_request_is_camel_case() {
        let json = serde_json::to_value(SignupRequest {
            email: "a@b.co".to_string(),
            password: "secret".to_string(),
            display_name: "Ada".to_string(),
        })
        .unwrap();
        assert_eq!(json["displayName"], "Ada");
    }
}
