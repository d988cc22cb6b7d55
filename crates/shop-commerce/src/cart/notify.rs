//! User-visible cart notifications.

use std::fmt;

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
}

/// Something the customer should be told after a cart intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A product was added.
    Added { product_name: String, quantity: u32 },
    /// A line was removed.
    Removed,
    /// The cart was emptied.
    Cleared,
}

impl Notification {
    pub fn level(&self) -> NotificationLevel {
        match self {
            Notification::Added { .. } => NotificationLevel::Success,
            Notification::Removed | Notification::Cleared => NotificationLevel::Info,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Added { product_name, .. } => write!(f, "{product_name} added to cart."),
            Notification::Removed => f.write_str("Item removed from cart."),
            Notification::Cleared => f.write_str("Cart cleared."),
        }
    }
}

/// Receives cart notifications.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<F: Fn(&Notification)> Notifier for F {
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let added = Notification::Added {
            product_name: "Luxury Pen Set".to_string(),
            quantity: 2,
        };
        assert_eq!(added.to_string(), "Luxury Pen Set added to cart.");
        assert_eq!(added.level(), NotificationLevel::Success);
        assert_eq!(Notification::Removed.to_string(), "Item removed from cart.");
        assert_eq!(Notification::Cleared.level(), NotificationLevel::Info);
    }
}
