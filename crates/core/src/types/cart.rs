//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A single line in the cart: one product plus the quantity held.
///
/// Invariant: `amount >= 1`. A line never sits in the cart at zero; a
/// quantity that would drop to zero is handled by removing the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub amount: u32,
}

impl CartItem {
    /// Create a line holding `amount` units of `product`.
    #[must_use]
    pub fn new(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Trail Runner".to_string(),
            price: Decimal::new(1295, 1), // 129.5
            image: None,
        }
    }

    #[test]
    fn test_new_carries_product_attributes() {
        let item = CartItem::new(product(), 2);
        assert_eq!(item.id, ProductId::new(1));
        assert_eq!(item.title, "Trail Runner");
        assert_eq!(item.amount, 2);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(product(), 3);
        assert_eq!(item.line_total(), Decimal::new(3885, 1)); // 388.5
    }
}
