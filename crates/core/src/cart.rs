//! In-memory shopping cart.
//!
//! A [`CartStore`] owns the ordered line items for one page session. Every
//! mutation returns a fresh [`CartSnapshot`] whose total is recomputed from
//! the lines, so the panel can be redrawn straight from the return value.

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// One line item, keyed by plant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Lines and total as of one mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl CartSnapshot {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Authoritative cart state for a page session.
///
/// Invariant: at most one line per distinct name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a plant.
    ///
    /// Unpriced plants are silently ignored. Adding a name that is already in
    /// the cart increments that line's quantity.
    pub fn add(&mut self, name: &str, price: Price) -> CartSnapshot {
        if price.is_on_request() {
            return self.snapshot();
        }

        match self.lines.iter_mut().find(|line| line.name == name) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                name: name.to_string(),
                price,
                quantity: 1,
            }),
        }

        self.snapshot()
    }

    /// Remove the line at `index`; later lines shift down by one.
    ///
    /// Out-of-range indices leave the cart unchanged.
    pub fn remove(&mut self, index: usize) -> CartSnapshot {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        self.snapshot()
    }

    /// Current lines and a freshly computed total.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total(),
        }
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
