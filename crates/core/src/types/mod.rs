//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;

pub use cart::CartItem;
pub use catalog::{Product, Stock};
pub use id::ProductId;
