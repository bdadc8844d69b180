//! # Stripe State
//!
//! The seller's connected payment account. Only `stripeAccount` is
//! persisted (`stripe-storage`).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use microshop_core::{SellerStatus, StripeAccount, StripeAccountUpdate};
use microshop_store::keys;

use super::{Persisted, PersistedStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeStore {
    pub stripe_account: Option<StripeAccount>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl StripeStore {
    /// Replaces the account and clears any error.
    pub fn set_stripe_account(&mut self, account: Option<StripeAccount>) {
        self.stripe_account = account;
        self.error = None;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    /// Records an error and ends loading.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.is_loading = false;
    }

    /// Merges into the account; no-op when there is none.
    pub fn update_stripe_account(&mut self, update: &StripeAccountUpdate) {
        if let Some(account) = self.stripe_account.as_mut() {
            account.apply_update(update, Utc::now());
        }
    }

    pub fn seller_status(&self) -> SellerStatus {
        SellerStatus::of(self.stripe_account.as_ref())
    }

    pub fn is_seller_enabled(&self) -> bool {
        self.stripe_account
            .as_ref()
            .map(StripeAccount::is_enabled)
            .unwrap_or(false)
    }

    pub fn clear_stripe_account(&mut self) {
        self.stripe_account = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeSlice {
    pub stripe_account: Option<StripeAccount>,
}

impl Persisted for StripeStore {
    type Slice = StripeSlice;
    const KEY: &'static str = keys::STRIPE;

    fn to_slice(&self) -> StripeSlice {
        StripeSlice {
            stripe_account: self.stripe_account.clone(),
        }
    }

    fn from_slice(slice: StripeSlice) -> Self {
        StripeStore {
            stripe_account: slice.stripe_account,
            ..Default::default()
        }
    }
}

pub type StripeState = PersistedStore<StripeStore>;

#[cfg(test)]
mod tests {
    use super::*;

    fn account(charges: bool, payouts: bool) -> StripeAccount {
        StripeAccount {
            user_id: "1".into(),
            stripe_account_id: "acct_0123456789abcdef".into(),
            charges_enabled: charges,
            payouts_enabled: payouts,
            details_submitted: charges,
            requirements: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_seller_status_transitions() {
        let mut store = StripeStore::default();
        assert_eq!(store.seller_status(), SellerStatus::NotStarted);
        assert!(!store.is_seller_enabled());

        store.set_stripe_account(Some(account(true, false)));
        assert_eq!(store.seller_status(), SellerStatus::Incomplete);

        store.update_stripe_account(&StripeAccountUpdate {
            payouts_enabled: Some(true),
            ..Default::default()
        });
        assert_eq!(store.seller_status(), SellerStatus::Active);
        assert!(store.is_seller_enabled());
    }

    #[test]
    fn test_update_without_account_is_noop() {
        let mut store = StripeStore::default();
        store.update_stripe_account(&StripeAccountUpdate {
            charges_enabled: Some(true),
            ..Default::default()
        });
        assert_eq!(store.stripe_account, None);
    }

    #[test]
    fn test_error_handling_flags() {
        let mut store = StripeStore::default();
        store.set_loading(true);
        store.set_error(Some("Failed".into()));
        assert!(!store.is_loading);

        store.set_stripe_account(Some(account(false, false)));
        assert_eq!(store.error, None);

        store.set_error(Some("again".into()));
        store.clear_stripe_account();
        assert_eq!(store, StripeStore::default());
    }
}
