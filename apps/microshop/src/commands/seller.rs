//! # Seller Commands
//!
//! Two ways to become a seller:
//!
//! ```text
//! Hosted (needs the backend)               Local (works offline)
//! ──────────────────────────               ─────────────────────
//! create_connect_account                   onboarding_form(user)
//!         │                                        │ five steps
//! onboarding_link ──► browser ──► deep link        ▼
//!         │        microshop://seller/...   submit_onboarding
//! refresh_account_status                           │ delay
//!         │                                        ▼
//!         └────────────► StripeStore ◄──── simulated enabled account
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use microshop_client::stripe::{ONBOARDING_REFRESH_URL, ONBOARDING_RETURN_URL};
use microshop_client::StripeApi;
use microshop_core::ids::simulated_account_id;
use microshop_core::onboarding::OnboardingForm;
use microshop_core::{AccountLinkResponse, SellerStatus, StripeAccount, LOCAL_USER_ID};

use super::unwrap_response;
use crate::config::SimulationSettings;
use crate::error::{ApiError, AppError};
use crate::state::{AuthState, InventoryState, ListingCounts, StripeState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDashboard {
    pub status: SellerStatus,
    pub headline: String,
    pub stripe_account_id: Option<String>,
    pub can_publish: bool,
    pub listings: ListingCounts,
}

pub async fn create_connect_account(
    stripe: &StripeState,
    api: &StripeApi,
) -> Result<StripeAccount, ApiError> {
    debug!("create_connect_account command");
    stripe.with_mut_transient(|s| s.set_loading(true));

    let result = unwrap_response(
        api.create_connect_account().await,
        "Failed to create seller account",
    );
    let account = record_account(stripe, result.map(|r| r.account)).await?;

    info!(account_id = %account.stripe_account_id, "Connect account created");
    Ok(account)
}

/// Hosted onboarding URL; the browser returns through the seller deep links.
pub async fn onboarding_link(api: &StripeApi) -> Result<AccountLinkResponse, ApiError> {
    debug!("onboarding_link command");
    let link = unwrap_response(
        api.get_account_link(ONBOARDING_REFRESH_URL, ONBOARDING_RETURN_URL)
            .await,
        "Failed to get onboarding link",
    )?;
    Ok(link)
}

pub async fn refresh_account_status(
    stripe: &StripeState,
    api: &StripeApi,
) -> Result<StripeAccount, ApiError> {
    debug!("refresh_account_status command");
    stripe.with_mut_transient(|s| s.set_loading(true));

    let result = unwrap_response(
        api.get_account_status().await,
        "Failed to get account status",
    );
    record_account(stripe, result.map(|r| r.account)).await
}

/// Empty onboarding form pre-filled from the signed-in user.
pub fn onboarding_form(auth: &AuthState) -> OnboardingForm {
    auth.with(|s| OnboardingForm::for_user(s.user.as_ref()))
}

/// Completes local onboarding with a simulated, fully enabled account.
pub async fn submit_onboarding(
    stripe: &StripeState,
    auth: &AuthState,
    simulation: &SimulationSettings,
    form: &OnboardingForm,
) -> Result<StripeAccount, ApiError> {
    debug!(business = %form.business_name, "submit_onboarding command");
    form.validate()?;

    stripe.with_mut_transient(|s| s.set_loading(true));
    tokio::time::sleep(simulation.onboarding_delay()).await;

    let user_id = auth
        .with(|s| s.user.as_ref().map(|u| u.id.clone()))
        .unwrap_or_else(|| LOCAL_USER_ID.to_string());

    let account = StripeAccount {
        user_id,
        stripe_account_id: simulated_account_id(),
        charges_enabled: true,
        payouts_enabled: true,
        details_submitted: true,
        requirements: None,
        updated_at: Utc::now(),
    };

    let account = record_account(stripe, Ok(account)).await?;
    info!(account_id = %account.stripe_account_id, "Seller onboarding completed");
    Ok(account)
}

pub fn dashboard(stripe: &StripeState, inventory: &InventoryState) -> SellerDashboard {
    let (status, stripe_account_id) = stripe.with(|s| {
        (
            s.seller_status(),
            s.stripe_account.as_ref().map(|a| a.stripe_account_id.clone()),
        )
    });

    SellerDashboard {
        status,
        headline: status.headline().to_string(),
        stripe_account_id,
        can_publish: status == SellerStatus::Active,
        listings: inventory.with(|s| s.listing_counts()),
    }
}

/// Stores the account on success, the error message on failure.
async fn record_account(
    stripe: &StripeState,
    result: Result<StripeAccount, AppError>,
) -> Result<StripeAccount, ApiError> {
    match result {
        Ok(account) => {
            stripe
                .update(|s| {
                    s.set_stripe_account(Some(account.clone()));
                    s.set_loading(false);
                })
                .await;
            Ok(account)
        }
        Err(e) => {
            stripe.with_mut_transient(|s| s.set_error(Some(e.to_string())));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use microshop_client::{ApiClient, ApiConfig};
    use microshop_core::onboarding::BusinessType;
    use microshop_core::User;
    use microshop_store::MemoryStorage;

    fn complete_form() -> OnboardingForm {
        let mut form = OnboardingForm {
            business_name: "Ada's Attic".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@mail.com".into(),
            phone: "555-0100".into(),
            street: "1 Analytical Way".into(),
            city: "London".into(),
            state: "LDN".into(),
            zip_code: "00001".into(),
            country: "US".into(),
            account_number: "000123456789".into(),
            routing_number: "110000000".into(),
            account_holder_name: "Ada Lovelace".into(),
            ..Default::default()
        };
        form.set_business_type(BusinessType::Individual);
        form
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_onboarding_enables_seller() {
        let storage = MemoryStorage::shared();
        let stripe = StripeState::rehydrate(storage.clone()).await;
        let auth = AuthState::rehydrate(storage.clone()).await;

        let account = submit_onboarding(&stripe, &auth, &SimulationSettings::default(), &complete_form())
            .await
            .unwrap();

        assert!(account.stripe_account_id.starts_with("acct_"));
        assert_eq!(account.user_id, "local-user");
        assert!(stripe.with(|s| s.is_seller_enabled() && !s.is_loading));

        let reopened = StripeState::rehydrate(storage).await;
        assert!(reopened.with(|s| s.is_seller_enabled()));
    }

    #[tokio::test]
    async fn test_onboarding_reports_first_missing_field() {
        let storage = MemoryStorage::shared();
        let stripe = StripeState::rehydrate(storage.clone()).await;
        let auth = AuthState::rehydrate(storage).await;

        let mut form = complete_form();
        form.phone.clear();
        let err = submit_onboarding(&stripe, &auth, &SimulationSettings::instant(), &form)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please enter your phone number");
        assert_eq!(stripe.with(|s| s.stripe_account.clone()), None);
    }

    #[tokio::test]
    async fn test_onboarding_form_uses_signed_in_user() {
        let auth = AuthState::rehydrate(MemoryStorage::shared()).await;
        auth.update(|s| {
            s.login(
                User {
                    id: "1".into(),
                    email: "ada@mail.com".into(),
                    display_name: "Ada Lovelace".into(),
                    avatar: None,
                    created_at: Utc::now(),
                },
                "t".into(),
            )
        })
        .await;

        let form = onboarding_form(&auth);
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.business_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_hosted_account_failure_is_recorded() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ApiClient::new(&ApiConfig::new(format!("http://127.0.0.1:{}", port))).unwrap();
        let api = StripeApi::new(client);
        let stripe = StripeState::rehydrate(MemoryStorage::shared()).await;

        let err = create_connect_account(&stripe, &api).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(stripe.with(|s| s.error.is_some() && !s.is_loading));
    }

    #[tokio::test]
    async fn test_dashboard_reflects_status_and_counts() {
        let stripe = StripeState::rehydrate(MemoryStorage::shared()).await;
        let inventory = InventoryState::default();

        let view = dashboard(&stripe, &inventory);
        assert_eq!(view.status, SellerStatus::NotStarted);
        assert_eq!(view.headline, "Not Set Up");
        assert!(!view.can_publish);
        assert_eq!(view.listings, ListingCounts::default());
    }
}
