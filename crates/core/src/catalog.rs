//! Catalog records as displayed by the storefront.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price};

/// Number of description characters shown on a plant card.
pub const EXCERPT_CHARS: usize = 80;

/// Marker appended to every description excerpt.
pub const EXCERPT_SUFFIX: &str = "...";

/// Label shown instead of an add-to-cart price for unpriced plants.
pub const PRICE_ON_REQUEST: &str = "Price on request";

/// A plant category from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A plant listing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    pub image: String,
    pub description: Option<String>,
    pub price: Price,
}

impl Plant {
    /// Shortened description for a plant card.
    ///
    /// Returns `None` when the plant has no (or an empty) description. The
    /// suffix is appended even when the description is shorter than the cut.
    #[must_use]
    pub fn excerpt(&self) -> Option<String> {
        let description = self.description.as_deref().filter(|d| !d.is_empty())?;
        let mut excerpt: String = description.chars().take(EXCERPT_CHARS).collect();
        excerpt.push_str(EXCERPT_SUFFIX);
        Some(excerpt)
    }

    /// Whether the plant can be added to the cart.
    #[must_use]
    pub const fn can_purchase(&self) -> bool {
        !self.price.is_on_request()
    }

    /// Text for the card's add-to-cart button.
    #[must_use]
    pub fn purchase_label(&self) -> String {
        if self.can_purchase() {
            format!("Add to Cart ({})", self.price)
        } else {
            PRICE_ON_REQUEST.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(description: Option<&str>, price: i64) -> Plant {
        Plant {
            name: "Mango Tree".to_string(),
            image: "https://img.example/mango.png".to_string(),
            description: description.map(String::from),
            price: Price::new(price),
        }
    }

    #[test]
    fn test_excerpt_truncates_to_eighty_chars() {
        let long = "x".repeat(120);
        let excerpt = plant(Some(&long), 100).excerpt();
        assert_eq!(excerpt, Some(format!("{}...", "x".repeat(80))));
    }

    #[test]
    fn test_excerpt_short_description_still_gets_suffix() {
        assert_eq!(
            plant(Some("Sweet fruit"), 100).excerpt().as_deref(),
            Some("Sweet fruit...")
        );
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let bangla = "আ".repeat(90);
        let excerpt = plant(Some(&bangla), 100).excerpt().unwrap_or_default();
        assert_eq!(excerpt.chars().count(), 83);
    }

    #[test]
    fn test_excerpt_absent_or_empty() {
        assert_eq!(plant(None, 100).excerpt(), None);
        assert_eq!(plant(Some(""), 100).excerpt(), None);
    }

    #[test]
    fn test_purchase_label() {
        assert_eq!(plant(None, 500).purchase_label(), "Add to Cart (৳500)");
        assert_eq!(plant(None, 0).purchase_label(), "Price on request");
        assert!(!plant(None, 0).can_purchase());
    }
}
