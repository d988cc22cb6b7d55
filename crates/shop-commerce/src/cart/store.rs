//! Cart store: the transition function plus notifications and persistence.

use shop_storage::{validate_key, Storage, StorageError, StorageExt};

use crate::cart::{transition, CartAction, CartState, NoopNotifier, Notification, Notifier};
use crate::catalog::Product;
use crate::ids::ProductId;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "shop_cart";

/// Load a persisted cart.
///
/// Missing, unreadable or malformed records all yield the empty cart. The
/// failure is logged, never returned.
pub fn load_cart<S: Storage + ?Sized>(storage: &S, key: &str) -> CartState {
    match storage.get::<CartState>(key) {
        Ok(Some(state)) => {
            tracing::debug!(key, lines = state.lines().len(), "restored cart");
            state
        }
        Ok(None) => CartState::empty(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart");
            CartState::empty()
        }
    }
}

/// The single owner of cart state.
///
/// All mutation goes through the four intents; each one runs [`transition`],
/// writes the new state to storage, then notifies.
///
/// # Example
///
/// ```rust
/// use shop_commerce::cart::CartStore;
/// use shop_commerce::catalog::Product;
/// use shop_commerce::money::Money;
/// use shop_storage::MemoryStorage;
///
/// let mut store = CartStore::open(MemoryStorage::new());
/// store.add(Product::new("1", "Desk Lamp", Money::usd(7999)), 2);
/// assert_eq!(store.state().total_items(), 2);
/// assert_eq!(store.state().total_price().display(), "$159.98");
/// ```
pub struct CartStore<S: Storage, N: Notifier = NoopNotifier> {
    state: CartState,
    storage: S,
    notifier: N,
    key: String,
}

impl<S: Storage> CartStore<S, NoopNotifier> {
    /// Open the cart persisted in `storage`, without notifications.
    pub fn open(storage: S) -> Self {
        Self::with_notifier(storage, NoopNotifier)
    }
}

impl<S: Storage, N: Notifier> CartStore<S, N> {
    /// Open the cart persisted in `storage` under [`CART_STORAGE_KEY`].
    pub fn with_notifier(storage: S, notifier: N) -> Self {
        Self::load(storage, notifier, CART_STORAGE_KEY.to_string())
    }

    /// Open the cart persisted under a custom key.
    ///
    /// Fails with [`StorageError::InvalidKey`] if `key` is not a valid
    /// storage key.
    pub fn with_key(storage: S, notifier: N, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self::load(storage, notifier, key))
    }

    fn load(storage: S, notifier: N, key: String) -> Self {
        let state = load_cart(&storage, &key);
        Self {
            state,
            storage,
            notifier,
            key,
        }
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Storage key this cart persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add units of a product. Stock limits are the caller's concern.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let notification = Notification::Added {
            product_name: product.name.clone(),
            quantity,
        };
        self.dispatch(CartAction::Add { product, quantity });
        self.notifier.notify(&notification);
    }

    /// Remove a product's line. Absent products are ignored.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.dispatch(CartAction::Remove {
            product_id: product_id.clone(),
        });
        self.notifier.notify(&Notification::Removed);
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
        self.notifier.notify(&Notification::Cleared);
    }

    fn dispatch(&mut self, action: CartAction) {
        let name = action.name();
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, action);
        tracing::debug!(
            action = name,
            items = self.state.total_items(),
            total = %self.state.total_price(),
            "cart transition"
        );
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.set(&self.key, &self.state) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}
