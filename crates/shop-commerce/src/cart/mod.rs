//! Shopping cart module.
//!
//! Contains the cart state, its pure transition function, and the store
//! that wraps the transition with notifications and persistence.

mod line;
mod notify;
mod state;
mod store;

pub use line::CartLine;
pub use notify::{NoopNotifier, Notification, NotificationLevel, Notifier};
pub use state::{transition, CartAction, CartState};
pub use store::{load_cart, CartStore, CART_STORAGE_KEY};
