//! Plantshop Core - catalog and cart domain.
//!
//! This crate provides the types and state machines shared by the storefront:
//! - [`types`] - Newtype wrappers for category IDs and prices
//! - [`catalog`] - Categories and plant listings
//! - [`cart`] - The per-page shopping cart
//! - [`navigator`] - Category selection with stale-response detection
//!
//! # Architecture
//!
//! The core crate contains only types and state - no I/O, no HTTP clients,
//! no rendering. Everything here can be exercised without a server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod navigator;
pub mod types;

pub use cart::{CartLine, CartSnapshot, CartStore};
pub use catalog::{Category, Plant};
pub use navigator::{CategoryNavigator, NavEntry, NavTarget, NavigatorError, Selection};
pub use types::*;
