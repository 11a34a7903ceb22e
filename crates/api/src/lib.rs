//! HTTP layer for the catalog and user services.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! the two binaries and the integration tests share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
