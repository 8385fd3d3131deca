//! Chefbook Core - Shared types library.
//!
//! This crate provides common types used across all Chefbook components:
//! - `storefront` - Customer-facing chef profiles, menu and checkout pages
//! - `cli` - Command-line tools for build-time route enumeration
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! templates. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Document IDs, prices, price ranges and booking summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
