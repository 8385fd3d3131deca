//! Chefbook storefront library.
//!
//! Customer-facing chef profiles, menu and checkout pages, rendered
//! server-side from documents in the Sanity content store. The binary in
//! `main.rs` wires configuration, logging and Sentry around
//! [`routes::build_router`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod sanity;
pub mod state;
