//! # MicroShop Application Library
//!
//! Client-side state layer of MicroShop: persisted stores, the commands
//! screens call, and deep-link routing. The CLI in `main.rs` drives the same
//! commands a UI would.
//!
//! ## Module Organization
//! ```text
//! microshop_app/
//! ├── lib.rs          ◄─── You are here (App wiring & tracing)
//! ├── config.rs       ◄─── microshop.toml + env overrides
//! ├── routes.rs       ◄─── Screens and deep links
//! ├── state/
//! │   ├── mod.rs      ◄─── StoreHandle / PersistedStore
//! │   ├── auth.rs     ◄─── Session (persisted)
//! │   ├── theme.rs    ◄─── Palette + toggles (persisted)
//! │   ├── stripe.rs   ◄─── Seller account (persisted)
//! │   ├── cart.rs     ◄─── Cart (persisted)
//! │   ├── inventory.rs◄─── Listings (in memory)
//! │   └── product.rs  ◄─── Legacy catalog (in memory)
//! ├── commands/       ◄─── auth, inventory, checkout, seller, theme, cart
//! └── error.rs        ◄─── AppError + ApiError for screens
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          App (one per process)                          │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐    │
//! │  │  AuthState   │ │  ThemeState  │ │ StripeState  │ │  CartState   │    │
//! │  └──────┬───────┘ └──────┬───────┘ └──────┬───────┘ └──────┬───────┘    │
//! │         └────────────────┴───── SharedStorage ─────────────┘            │
//! │                                   │                                     │
//! │  ┌──────────────┐ ┌──────────────┐│  ┌──────────────────────────────┐   │
//! │  │InventoryState│ │ ProductState ││  │ InventoryApi (mock backend)  │   │
//! │  └──────────────┘ └──────────────┘└─►│ `inventories` key            │   │
//! │                                      └──────────────────────────────┘   │
//! │  ApiClient ─► CheckoutApi, StripeApi, AuthApi, OrdersApi (HTTP)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands only take the pieces they need, so tests build just those.

pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use microshop_client::{ApiClient, AuthApi, CheckoutApi, OrdersApi, StripeApi};
use microshop_store::{Database, DbConfig, InventoryApi, SharedStorage};

use config::AppConfig;
use error::AppResult;
use state::{AuthState, CartState, InventoryState, ProductState, StripeState, ThemeState};

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=microshop=trace` - Trace for the microshop crates only
/// - Default: INFO, DEBUG for microshop
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,microshop=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Everything a screen can reach, wired over one storage backend.
pub struct App {
    pub config: AppConfig,
    pub storage: SharedStorage,

    pub auth: AuthState,
    pub theme: ThemeState,
    pub stripe: StripeState,
    pub cart: CartState,
    pub inventory: InventoryState,
    pub products: ProductState,

    pub inventory_api: InventoryApi,
    pub client: ApiClient,
    pub checkout_api: CheckoutApi,
    pub stripe_api: StripeApi,
    pub auth_api: AuthApi,
    pub orders_api: OrdersApi,

    database: Option<Arc<Database>>,
}

impl App {
    /// Rehydrates the persisted stores from `storage` and restores the
    /// saved session onto the HTTP client.
    pub async fn new(config: AppConfig, storage: SharedStorage) -> AppResult<Self> {
        let client = ApiClient::new(&config.api_config())?;

        let auth = AuthState::rehydrate(storage.clone()).await;
        let theme = ThemeState::rehydrate(storage.clone()).await;
        let stripe = StripeState::rehydrate(storage.clone()).await;
        let cart = CartState::rehydrate(storage.clone()).await;

        if let Some(user) = commands::auth::restore_session(&auth, &client) {
            info!(user_id = %user.id, "Session restored");
        }

        Ok(App {
            inventory_api: InventoryApi::new(storage.clone()),
            checkout_api: CheckoutApi::new(client.clone()),
            stripe_api: StripeApi::new(client.clone()),
            auth_api: AuthApi::new(client.clone()),
            orders_api: OrdersApi::new(client.clone()),
            client,
            config,
            storage,
            auth,
            theme,
            stripe,
            cart,
            inventory: InventoryState::default(),
            products: ProductState::default(),
            database: None,
        })
    }

    /// Opens the SQLite database at the configured path and builds the app
    /// over it.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let path = config.database_path()?;
        info!(path = %path.display(), "Opening database");

        let database = Arc::new(Database::new(DbConfig::new(path)).await?);
        let storage: SharedStorage = database.clone();

        let mut app = App::new(config, storage).await?;
        app.database = Some(database);
        Ok(app)
    }

    /// Waits for pending writes, then closes the database if one is open.
    pub async fn shutdown(&self) {
        self.auth.flush().await;
        self.theme.flush().await;
        self.stripe.flush().await;
        self.cart.flush().await;

        if let Some(db) = &self.database {
            if !db.health_check().await {
                warn!("Database unhealthy at shutdown");
            }
            db.close().await;
        }
    }
}
