//! Cart state and its transition function.
//!
//! [`transition`] is the only way a [`CartState`] changes. It is pure: no
//! notifications, no persistence. [`CartStore`](crate::cart::CartStore)
//! wraps it with those effects.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// An ordered set of cart lines plus totals derived from them.
///
/// The totals are recomputed from the lines after every transition and on
/// every load; they are never adjusted on their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CartRecord")]
pub struct CartState {
    lines: Vec<CartLine>,
    total_items: u64,
    total_price: Money,
}

impl CartState {
    /// The empty cart.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total_items: 0,
            total_price: Money::zero(Currency::default()),
        }
    }

    /// Build a state from its lines, recomputing the totals.
    ///
    /// Returns `None` when the lines mix currencies or the total price
    /// overflows.
    fn from_lines(lines: Vec<CartLine>) -> Option<Self> {
        let Some(first) = lines.first() else {
            return Some(Self::empty());
        };
        let currency = first.product.price.currency;

        let line_totals = lines
            .iter()
            .map(CartLine::checked_total)
            .collect::<Option<Vec<_>>>()?;
        let total_price = Money::try_sum(line_totals.iter(), currency)?;
        let total_items = lines.iter().map(|l| u64::from(l.quantity)).sum();

        Some(Self {
            lines,
            total_items,
            total_price,
        })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of price times quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Currency of the cart; the first line decides.
    pub fn currency(&self) -> Currency {
        self.total_price.currency
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Quantity of a product currently in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Wire shape of a persisted cart.
///
/// Stored totals are ignored and recomputed from the lines. Records that
/// break the line invariants are rejected.
#[derive(Deserialize)]
struct CartRecord {
    lines: Vec<CartLine>,
}

impl TryFrom<CartRecord> for CartState {
    type Error = String;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::new();
        for line in &record.lines {
            if line.quantity == 0 {
                return Err(format!("line for {} has zero quantity", line.product_id));
            }
            if line.product_id != line.product.id {
                return Err(format!(
                    "line for {} carries snapshot of {}",
                    line.product_id, line.product.id
                ));
            }
            if !seen.insert(&line.product_id) {
                return Err(format!("duplicate line for {}", line.product_id));
            }
        }
        Self::from_lines(record.lines)
            .ok_or_else(|| "cart lines mix currencies or overflow the total".to_string())
    }
}

/// An intent to change the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` units of a product, merging with an existing line.
    Add { product: Product, quantity: u32 },
    /// Drop the line for a product, if any.
    Remove { product_id: ProductId },
    /// Replace a line's quantity; zero or less removes the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::Add { .. } => "add",
            CartAction::Remove { .. } => "remove",
            CartAction::SetQuantity { .. } => "set_quantity",
            CartAction::Clear => "clear",
        }
    }
}

/// Apply an action to a cart state, producing the next state.
///
/// - `Add` on an existing product increases its quantity in place; a new
///   product is appended. Adding zero units changes nothing. Stock limits
///   are not enforced here.
/// - `Remove` of an absent product changes nothing.
/// - `SetQuantity` with `quantity <= 0` is exactly `Remove`; otherwise the
///   line keeps its position. Absent products are ignored.
/// - `Clear` yields the empty cart.
///
/// An action whose result could not be totalled (a product priced in another
/// currency than the cart, or a quantity or total past the numeric bounds)
/// leaves the state unchanged.
pub fn transition(state: CartState, action: CartAction) -> CartState {
    let name = action.name();
    let mut lines = state.lines.clone();

    match action {
        CartAction::Add { product, quantity } => {
            if quantity == 0 {
                return state;
            }
            match lines.iter_mut().find(|l| l.product_id == product.id) {
                Some(line) => match line.quantity.checked_add(quantity) {
                    Some(merged) => line.quantity = merged,
                    None => return rejected(state, name),
                },
                None => lines.push(CartLine::new(product, quantity)),
            }
        }
        CartAction::Remove { product_id } => {
            lines.retain(|l| l.product_id != product_id);
        }
        CartAction::SetQuantity {
            product_id,
            quantity,
        } => {
            if quantity <= 0 {
                return transition(state, CartAction::Remove { product_id });
            }
            let Ok(quantity) = u32::try_from(quantity) else {
                return rejected(state, name);
            };
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity = quantity;
            }
        }
        CartAction::Clear => return CartState::empty(),
    }

    match CartState::from_lines(lines) {
        Some(next) => next,
        None => rejected(state, name),
    }
}

fn rejected(state: CartState, action: &str) -> CartState {
    tracing::warn!(action, "cart change rejected: totals would mix currencies or overflow");
    state
}
