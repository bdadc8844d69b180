//! # Auth State
//!
//! Signed-in user and bearer token. `user`, `token` and `isAuthenticated`
//! are persisted under `auth-storage`; `isLoading` is not.

use serde::{Deserialize, Serialize};

use microshop_core::{User, UserUpdate};
use microshop_store::keys;

use super::{Persisted, PersistedStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStore {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub token: Option<String>,
}

impl AuthStore {
    /// Sets the user; the auth flag follows its presence.
    pub fn set_user(&mut self, user: Option<User>) {
        self.is_authenticated = user.is_some();
        self.user = user;
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn login(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    /// Clears the session. The caller also clears the HTTP client's token.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }

    /// Merges into the current user; no-op when signed out.
    pub fn update_user(&mut self, update: &UserUpdate) {
        if let Some(user) = self.user.as_mut() {
            user.apply_update(update);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSlice {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl Persisted for AuthStore {
    type Slice = AuthSlice;
    const KEY: &'static str = keys::AUTH;

    fn to_slice(&self) -> AuthSlice {
        AuthSlice {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    fn from_slice(slice: AuthSlice) -> Self {
        AuthStore {
            user: slice.user,
            token: slice.token,
            is_authenticated: slice.is_authenticated,
            is_loading: false,
        }
    }
}

pub type AuthState = PersistedStore<AuthStore>;
