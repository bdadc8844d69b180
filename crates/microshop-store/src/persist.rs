//! # Persisted Slices
//!
//! A store persists a *slice* of its state (the fields worth keeping across
//! launches) as one JSON blob under one key. The blob is wrapped the way
//! the mobile app's persistence middleware wrapped it, so existing device
//! data keeps loading:
//!
//! ```json
//! { "state": { "isDark": true, "isLiquidGlassEnabled": false }, "version": 0 }
//! ```
//!
//! | Key              | Slice                                            |
//! |------------------|--------------------------------------------------|
//! | `auth-storage`   | `user`, `token`, `isAuthenticated`               |
//! | `theme-storage`  | `isDark`, `isLiquidGlassEnabled`                 |
//! | `stripe-storage` | `stripeAccount`                                  |
//! | `cart-storage`   | `items`, `shippingAddress`, `selectedPaymentMethod` |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::storage::SharedStorage;

/// Storage keys used by the client.
pub mod keys {
    pub const AUTH: &str = "auth-storage";
    pub const THEME: &str = "theme-storage";
    pub const STRIPE: &str = "stripe-storage";
    pub const CART: &str = "cart-storage";
    /// Whole-list blob of the inventory API (not an envelope).
    pub const INVENTORY: &str = "microshop_inventory";
}

/// Envelope version written alongside every slice.
pub const SLICE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Typed view of one persisted slice.
pub struct PersistedSlice<T> {
    storage: SharedStorage,
    key: &'static str,
    _state: PhantomData<fn() -> T>,
}

impl<T> Clone for PersistedSlice<T> {
    fn clone(&self) -> Self {
        PersistedSlice {
            storage: self.storage.clone(),
            key: self.key,
            _state: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for PersistedSlice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSlice").field("key", &self.key).finish()
    }
}

impl<T> PersistedSlice<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: SharedStorage, key: &'static str) -> Self {
        PersistedSlice {
            storage,
            key,
            _state: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads the slice. Missing key is `Ok(None)`.
    ///
    /// An unreadable blob is also `Ok(None)` (logged): a store starts from
    /// its defaults rather than refusing to start.
    pub async fn load(&self) -> StoreResult<Option<T>> {
        let Some(raw) = self.storage.get_item(self.key).await? else {
            debug!(key = self.key, "No persisted state");
            return Ok(None);
        };

        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) => {
                debug!(key = self.key, version = envelope.version, "Rehydrated state");
                Ok(Some(envelope.state))
            }
            Err(e) => {
                warn!(key = self.key, error = %e, "Discarding unreadable persisted state");
                Ok(None)
            }
        }
    }

    /// Writes the slice, replacing what was there.
    pub async fn save(&self, state: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(&Envelope {
            state,
            version: SLICE_VERSION,
        })?;
        self.storage.set_item(self.key, &raw).await
    }

    /// Removes the slice.
    pub async fn clear(&self) -> StoreResult<()> {
        self.storage.remove_item(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ThemeSlice {
        is_dark: bool,
        is_liquid_glass_enabled: bool,
    }

    #[tokio::test]
    async fn test_save_writes_envelope() {
        let storage = MemoryStorage::shared();
        let slice = PersistedSlice::<ThemeSlice>::new(storage.clone(), keys::THEME);

        slice
            .save(&ThemeSlice {
                is_dark: true,
                is_liquid_glass_enabled: false,
            })
            .await
            .unwrap();

        let raw = storage.get_item(keys::THEME).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["state"]["isDark"], true);
        assert_eq!(json["version"], 0);
    }

    #[tokio::test]
    async fn test_load_existing_blob() {
        let storage = MemoryStorage::shared();
        storage
            .set_item(
                keys::THEME,
                r#"{"state":{"isDark":false,"isLiquidGlassEnabled":true},"version":0}"#,
            )
            .await
            .unwrap();

        let slice = PersistedSlice::<ThemeSlice>::new(storage, keys::THEME);
        assert_eq!(
            slice.load().await.unwrap(),
            Some(ThemeSlice {
                is_dark: false,
                is_liquid_glass_enabled: true
            })
        );
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_load_as_none() {
        let storage = MemoryStorage::shared();
        let slice = PersistedSlice::<ThemeSlice>::new(storage.clone(), keys::THEME);
        assert_eq!(slice.load().await.unwrap(), None);

        storage.set_item(keys::THEME, "not json").await.unwrap();
        assert_eq!(slice.load().await.unwrap(), None);

        slice.clear().await.unwrap();
        assert_eq!(storage.get_item(keys::THEME).await.unwrap(), None);
    }
}
