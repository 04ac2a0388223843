//! Records served by the remote product/stock query service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product as served by `GET /products/{id}`.
///
/// Display attributes (title, price, image) are opaque to cart logic and
/// are carried through to the cart line unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

/// Available units for a product, as served by `GET /stock/{id}`.
///
/// Read-only: consulted at mutation time, never stored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}
