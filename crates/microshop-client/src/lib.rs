//! # microshop-client: HTTP Client for MicroShop
//!
//! Typed calls to the MicroShop backend. Every call returns an
//! [`ApiResponse`](microshop_core::ApiResponse); transport and status
//! failures are logged and flattened into `{ success: false, error }`.
//!
//! ## Modules
//!
//! - [`client`] - `ApiClient` (base URL, bearer token, verbs)
//! - [`endpoints`] - Endpoint path table
//! - [`checkout`] - Checkout session creation
//! - [`stripe`] - Seller connected-account calls
//! - [`auth`] - Sign in / sign up / sign out
//! - [`orders`] - Order history
//! - [`config`] - `ApiConfig`
//! - [`error`] - `ClientError`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use microshop_client::{ApiClient, ApiConfig, CheckoutApi};
//! use microshop_client::checkout::CreateCheckoutSessionRequest;
//!
//! let client = ApiClient::new(&ApiConfig::default())?;
//! let checkout = CheckoutApi::new(client.clone());
//!
//! let response = checkout
//!     .create_checkout_session(&CreateCheckoutSessionRequest::new("inv-1", 1))
//!     .await;
//! if !response.success {
//!     eprintln!("{}", response.error.unwrap_or_default());
//! }
//! ```

pub mod auth;
pub mod checkout;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod orders;
pub mod stripe;

pub use auth::AuthApi;
pub use checkout::CheckoutApi;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ClientError, ClientResult};
pub use orders::OrdersApi;
pub use stripe::StripeApi;
