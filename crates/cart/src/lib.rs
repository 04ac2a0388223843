//! RocketShoes Cart - client-side cart state management.
//!
//! A thin state container layered over the remote product/stock query
//! service and a local persistence slot. The [`CartManager`] owns the
//! authoritative in-memory cart and keeps the slot synchronized with every
//! accepted mutation.
//!
//! # Architecture
//!
//! - [`catalog`] - read-only HTTP client for the product/stock service
//! - [`storage`] - single-file JSON persistence for the serialized cart
//! - [`manager`] - the cart manager and its three mutating operations
//! - [`config`] - environment-driven configuration
//! - [`error`] - closed error set plus default user-facing messages
//!
//! The manager is an explicit value owned by the application root and
//! handed to whatever renders the cart; there is no ambient instance.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartManager, Operation};
//! use rocket_shoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let cart = CartManager::new(&config).await?;
//!
//! if let Err(e) = cart.add(ProductId::new(1)).await {
//!     show_toast(e.user_message(Operation::Add));
//! }
//! for item in cart.items().await {
//!     // render line
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod storage;

pub use catalog::CatalogClient;
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::{CartError, CatalogError, Operation, StoreError};
pub use manager::CartManager;
pub use storage::CartStore;
