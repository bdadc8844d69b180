//! # State Module
//!
//! One container per store instead of a single app-wide struct: each
//! command takes only the stores it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  PersistedStore<S>  (survives restarts)        StoreHandle<S> (memory) │
//! │  ┌────────────┐ ┌────────────┐                 ┌────────────────┐      │
//! │  │ AuthStore  │ │ ThemeStore │                 │ InventoryStore │      │
//! │  ├────────────┤ ├────────────┤                 ├────────────────┤      │
//! │  │StripeStore │ │ CartStore  │                 │  ProductStore  │      │
//! │  └─────┬──────┘ └─────┬──────┘                 └────────────────┘      │
//! │        │ update(f): mutate, snapshot and save, one update at a time    │
//! │        ▼                                                                │
//! │  PersistedSlice ──► KeyValueStorage ("auth-storage", ...)             │
//! │                                                                         │
//! │  THREAD SAFETY: Arc<Mutex<S>>; the lock is never held across .await    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod inventory;
mod product;
mod stripe;
mod theme;

pub use auth::{AuthSlice, AuthState, AuthStore};
pub use cart::{CartSlice, CartState, CartStore};
pub use inventory::{InventoryState, InventoryStore, ListingCounts};
pub use product::{ProductState, ProductStore};
pub use stripe::{StripeSlice, StripeState, StripeStore};
pub use theme::{ThemeSlice, ThemeState, ThemeStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use microshop_store::{PersistedSlice, SharedStorage};

/// Store whose subset of fields is written to storage.
pub trait Persisted: Default + Send + 'static {
    type Slice: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Storage key of the slice.
    const KEY: &'static str;

    fn to_slice(&self) -> Self::Slice;

    /// Rebuilds the store from a slice; other fields take defaults.
    fn from_slice(slice: Self::Slice) -> Self;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// =============================================================================
// In-Memory Handle
// =============================================================================

/// Shared, lock-protected store. Clones point at the same state.
#[derive(Debug, Default)]
pub struct StoreHandle<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        StoreHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> StoreHandle<S> {
    pub fn new(store: S) -> Self {
        StoreHandle {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Read access.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let drafts = inventory.with(|s| s.get_draft_inventories());
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let guard = lock(&self.inner);
        f(&guard)
    }

    /// Write access.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        let mut guard = lock(&self.inner);
        f(&mut guard)
    }
}

impl<S: Clone> StoreHandle<S> {
    pub fn snapshot(&self) -> S {
        self.with(S::clone)
    }
}

// =============================================================================
// Persisted Store
// =============================================================================

/// [`StoreHandle`] whose slice is saved after every [`update`](Self::update).
pub struct PersistedStore<S: Persisted> {
    handle: StoreHandle<S>,
    slice: PersistedSlice<S::Slice>,
    /// Held from mutation until the save finishes.
    saving: Arc<tokio::sync::Mutex<()>>,
}

impl<S: Persisted> Clone for PersistedStore<S> {
    fn clone(&self) -> Self {
        PersistedStore {
            handle: self.handle.clone(),
            slice: self.slice.clone(),
            saving: Arc::clone(&self.saving),
        }
    }
}

impl<S: Persisted + std::fmt::Debug> std::fmt::Debug for PersistedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedStore")
            .field("key", &S::KEY)
            .field("state", &*lock(&self.handle.inner))
            .finish()
    }
}

impl<S: Persisted> PersistedStore<S> {
    /// Loads the slice under `S::KEY`; defaults when missing or unreadable.
    pub async fn rehydrate(storage: SharedStorage) -> Self {
        let slice = PersistedSlice::new(storage, S::KEY);

        let store = match slice.load().await {
            Ok(Some(saved)) => S::from_slice(saved),
            Ok(None) => S::default(),
            Err(e) => {
                warn!(key = S::KEY, error = %e, "Could not read persisted state");
                S::default()
            }
        };

        PersistedStore {
            handle: StoreHandle::new(store),
            slice,
            saving: Arc::default(),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        self.handle.with(f)
    }

    /// Mutates fields outside the persisted slice (loading flags, errors).
    /// Nothing is written.
    pub fn with_mut_transient<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        self.handle.with_mut(f)
    }

    /// Mutates the store and saves its slice.
    ///
    /// Updates are serialized up to the end of their save, so storage always
    /// ends on the slice of the last mutation. Reads through [`with`](Self::with)
    /// do not wait and may see a change before it is saved.
    ///
    /// A failed save is logged; the in-memory change stands.
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        let _saving = self.saving.lock().await;

        let (result, snapshot) = self.handle.with_mut(|store| {
            let result = f(store);
            (result, store.to_slice())
        });

        match self.slice.save(&snapshot).await {
            Ok(()) => debug!(key = S::KEY, "Persisted state"),
            Err(e) => warn!(key = S::KEY, error = %e, "Failed to persist state"),
        }

        result
    }

    /// Writes the current slice without changing anything.
    pub async fn flush(&self) {
        self.update(|_| ()).await
    }
}

impl<S: Persisted + Clone> PersistedStore<S> {
    pub fn snapshot(&self) -> S {
        self.handle.snapshot()
    }
}
