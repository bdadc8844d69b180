//! # microshop-core: Pure Domain Logic for MicroShop
//!
//! Everything the MicroShop client knows about listings, orders, sellers and
//! themes, expressed as plain data and pure functions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MicroShop Client Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Screens (React Native, not here)                │   │
//! │  │   Login ──► Inventory ──► Create Listing ──► Checkout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            apps/microshop (stores + commands)                   │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────┐  ┌────────────────▼──────────────┐   │
//! │  │ microshop-store (KV, mock   │  │ microshop-client (HTTP stubs) │   │
//! │  │ inventory backend)          │  │                               │   │
//! │  └──────────────┬──────────────┘  └────────────────┬──────────────┘   │
//! │                 └──────────────┬───────────────────┘                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ microshop-core (THIS CRATE) ★                    │   │
//! │  │   types • money • theme • validation • ids                      │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Inventory, User, StripeAccount, Order, ...)
//! - [`money`] - Integer cents and price-input parsing
//! - [`theme`] - Palettes and colour derivation
//! - [`validation`] - Form rules with user-facing messages
//! - [`ids`] - Local id, slug, order id and mock token generation
//! - [`onboarding`] - Five-step seller onboarding form
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use microshop_core::money::Money;
//! use microshop_core::theme::contrast_color;
//!
//! let price = Money::parse_input("12.5").unwrap();
//! assert_eq!(price.cents(), 1250);
//!
//! assert_eq!(contrast_color("#FFFFFF").unwrap(), "#000000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod money;
pub mod onboarding;
pub mod theme;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ThemeError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Owner id stamped on listings created without a backend.
///
/// Every local listing belongs to this placeholder until real accounts
/// are wired to the inventory endpoints.
pub const LOCAL_USER_ID: &str = "local-user";

/// Currency used when a create request does not name one.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Platform fee taken on each sale, in basis points (500 = 5%).
pub const PLATFORM_FEE_BPS: u32 = 500;

/// Public host used for shareable product links.
pub const SHARE_LINK_BASE: &str = "https://microshop.app/product";

/// Upper bound on the quantity of a single listing or cart line.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Upper bound on a listing price or shipping cost ($999,999.99).
pub const MAX_PRICE_CENTS: i64 = 99_999_999;
