//! Closed error set for cart operations.
//!
//! Operations return structured errors and never panic; the caller decides
//! presentation. [`CartError::user_message`] provides the default mapping
//! the storefront toasts use: the insufficient-stock rejection gets its own
//! message, every other cause collapses to a generic, operation-scoped one.

use reqwest::StatusCode;
use thiserror::Error;

use rocket_shoes_core::ProductId;

/// Errors from the remote product/stock query service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected non-success status.
    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    /// The service has no record for the requested id.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the persistence slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the slot file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot content is not a well-formed serialized cart.
    #[error("Corrupt cart data: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The catalog has no product with this id (add path).
    #[error("Product {0} does not exist")]
    ProductNotFound(ProductId),

    /// The cart has no line with this id (remove/update path).
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Requested amount exceeds the stock available at call time.
    #[error("Insufficient stock for product {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The persistence slot could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The cart mutation a failure is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Generic failure message for this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => "Could not add the product",
            Self::Remove => "Could not remove the product",
            Self::UpdateAmount => "Could not update the product amount",
        }
    }
}

impl CartError {
    /// Default user-facing message for a failed `op`.
    ///
    /// Stock rejections are specific; every other cause collapses to the
    /// operation-scoped generic message.
    #[must_use]
    pub fn user_message(&self, op: Operation) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "Requested amount is out of stock",
            _ => op.failure_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_has_specific_message() {
        let err = CartError::InsufficientStock {
            id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.user_message(Operation::UpdateAmount),
            "Requested amount is out of stock"
        );
        // The specific message wins regardless of the reporting operation.
        assert_eq!(
            err.user_message(Operation::Add),
            "Requested amount is out of stock"
        );
    }

    #[test]
    fn test_other_errors_collapse_to_operation_message() {
        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.user_message(Operation::Remove), "Could not remove the product");

        let err = CartError::ProductNotFound(ProductId::new(9));
        assert_eq!(err.user_message(Operation::Add), "Could not add the product");

        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(
            err.user_message(Operation::UpdateAmount),
            "Could not update the product amount"
        );
    }

    #[test]
    fn test_error_display() {
        let err = CartError::InsufficientStock {
            id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: requested 6, available 5"
        );

        let err = CatalogError::NotFound(ProductId::new(3));
        assert_eq!(err.to_string(), "Not found: product 3");
    }
}
