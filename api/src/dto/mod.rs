//! Request and response data transfer objects

pub mod auth;

pub use auth::{AuthResponse, LoginRequest, LogoutResponse, RefreshRequest, RegisterRequest};
