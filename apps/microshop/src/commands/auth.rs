//! # Auth Commands
//!
//! Sign-in has no backend yet: both flows validate the form, wait the
//! configured latency and then sign in a locally built user.
//!
//! ```text
//! login(email, pw)          ──► user { id: "1", displayName: local part }
//!                               token "mock-token-123"
//! register(name, email, pw) ──► user { id: <millis>, displayName: name }
//!                               token "mock-token-<millis>"
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use microshop_client::ApiClient;
use microshop_core::ids::{mock_register_token, MOCK_LOGIN_TOKEN};
use microshop_core::validation::{validate_login, validate_registration};
use microshop_core::User;

use crate::config::SimulationSettings;
use crate::error::ApiError;
use crate::state::AuthState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub async fn login(
    auth: &AuthState,
    client: &ApiClient,
    simulation: &SimulationSettings,
    email: &str,
    password: &str,
) -> Result<AuthSession, ApiError> {
    debug!(email = %email, "login command");
    validate_login(email, password)?;

    auth.with_mut_transient(|s| s.set_loading(true));
    tokio::time::sleep(simulation.auth_delay()).await;

    let display_name = email.split('@').next().unwrap_or(email).to_string();
    let user = User {
        id: "1".to_string(),
        email: email.to_string(),
        display_name,
        avatar: None,
        created_at: Utc::now(),
    };

    let session = sign_in(auth, client, user, MOCK_LOGIN_TOKEN.to_string()).await;
    info!(user_id = %session.user.id, "Signed in");
    Ok(session)
}

pub async fn register(
    auth: &AuthState,
    client: &ApiClient,
    simulation: &SimulationSettings,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthSession, ApiError> {
    debug!(email = %email, "register command");
    validate_registration(name, email, password)?;

    auth.with_mut_transient(|s| s.set_loading(true));
    tokio::time::sleep(simulation.auth_delay()).await;

    let now = Utc::now();
    let user = User {
        id: now.timestamp_millis().to_string(),
        email: email.to_string(),
        display_name: name.to_string(),
        avatar: None,
        created_at: now,
    };

    let session = sign_in(auth, client, user, mock_register_token(now)).await;
    info!(user_id = %session.user.id, "Registered");
    Ok(session)
}

/// Clears the session and the client's bearer token.
pub async fn logout(auth: &AuthState, client: &ApiClient) {
    auth.update(|s| s.logout()).await;
    client.set_auth_token(None);
    info!("Signed out");
}

/// Hands a rehydrated token back to the HTTP client.
pub fn restore_session(auth: &AuthState, client: &ApiClient) -> Option<User> {
    let (user, token) = auth.with(|s| (s.user.clone(), s.token.clone()));
    if token.is_some() {
        debug!("Restoring bearer token from saved session");
    }
    client.set_auth_token(token);
    user
}

async fn sign_in(auth: &AuthState, client: &ApiClient, user: User, token: String) -> AuthSession {
    auth.update(|s| s.login(user.clone(), token.clone())).await;
    client.set_auth_token(Some(token.clone()));
    AuthSession { user, token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use microshop_client::ApiConfig;
    use microshop_store::MemoryStorage;

    async fn fixtures() -> (AuthState, ApiClient) {
        let auth = AuthState::rehydrate(MemoryStorage::shared()).await;
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        (auth, client)
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_builds_mock_user() {
        let (auth, client) = fixtures().await;
        let session = login(
            &auth,
            &client,
            &SimulationSettings::default(),
            "ada@mail.com",
            "secret1",
        )
        .await
        .unwrap();

        assert_eq!(session.user.id, "1");
        assert_eq!(session.user.display_name, "ada");
        assert_eq!(session.token, "mock-token-123");
        assert_eq!(client.auth_token().as_deref(), Some("mock-token-123"));
        assert!(auth.with(|s| s.is_authenticated && !s.is_loading));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_form_without_loading() {
        let (auth, client) = fixtures().await;
        let err = login(&auth, &client, &SimulationSettings::instant(), "ada", "secret1")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please enter a valid email");
        assert!(!auth.with(|s| s.is_loading));
    }

    #[tokio::test]
    async fn test_register_uses_timestamp_ids() {
        let (auth, client) = fixtures().await;
        let session = register(
            &auth,
            &client,
            &SimulationSettings::instant(),
            "Ada Lovelace",
            "ada@mail.com",
            "secret1",
        )
        .await
        .unwrap();

        assert!(session.user.id.parse::<i64>().is_ok());
        assert_eq!(session.token, format!("mock-token-{}", session.user.id));
        assert_eq!(session.user.display_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_logout_clears_client_token() {
        let (auth, client) = fixtures().await;
        login(&auth, &client, &SimulationSettings::instant(), "a@b.co", "secret1")
            .await
            .unwrap();

        logout(&auth, &client).await;
        assert_eq!(client.auth_token(), None);
        assert!(!auth.with(|s| s.is_authenticated));
    }

    #[tokio::test]
    async fn test_restore_session_reapplies_token() {
        let storage = MemoryStorage::shared();
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let auth = AuthState::rehydrate(storage.clone()).await;
        login(&auth, &client, &SimulationSettings::instant(), "a@b.co", "secret1")
            .await
            .unwrap();

        let fresh_client = ApiClient::new(&ApiConfig::default()).unwrap();
        let reopened = AuthState::rehydrate(storage).await;
        let user = restore_session(&reopened, &fresh_client);

        assert_eq!(user.map(|u| u.email).as_deref(), Some("a@b.co"));
        assert_eq!(fresh_client.auth_token().as_deref(), Some("mock-token-123"));
    }
}
