//! CLI command implementations.

pub mod routes;
