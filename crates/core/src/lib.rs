//! RocketShoes Core - Shared types library.
//!
//! This crate provides the common types used by the RocketShoes components:
//! - `cart` - Client-side cart state management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, catalog records, and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
