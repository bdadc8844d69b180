//! # Commands Module
//!
//! The actions behind each screen. A command takes only the stores and
//! services it touches and returns `Result<T, ApiError>`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports, response flattening)
//! ├── auth.rs       ◄─── Mock login / register, logout
//! ├── inventory.rs  ◄─── Draft, publish, edit, delete, slug lookup
//! ├── checkout.rs   ◄─── Purchase checks, card and wallet payments
//! ├── orders.rs     ◄─── Order history
//! ├── seller.rs     ◄─── Connect account, onboarding, dashboard
//! ├── theme.rs      ◄─── Dark mode, glass, custom background
//! └── cart.rs       ◄─── Legacy product cart
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen action                                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  command(stores..., services..., input)                                 │
//! │        │  validate input ───────── ValidationError ──┐                  │
//! │        │  call InventoryApi / ApiClient ─ ApiResponse │                 │
//! │        │  mirror result into stores                   │                 │
//! │        ▼                                              ▼                 │
//! │  Ok(payload)                               Err(ApiError { code, msg }) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inventory API module is the record of truth for listings; the
//! inventory store is refreshed from its results after every call.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod orders;
pub mod seller;
pub mod theme;

use microshop_core::ApiResponse;

use crate::error::AppError;

/// Unwraps a `{ success, data, error }` response, keeping its message.
pub(crate) fn unwrap_response<T>(response: ApiResponse<T>, fallback: &str) -> Result<T, AppError> {
    response.into_result(fallback).map_err(AppError::Api)
}
