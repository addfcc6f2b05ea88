//! # Tokengate API
//!
//! HTTP layer: session and rate-limit middleware, auth routes, error
//! translation, and application wiring over the core services.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
