//! HTTP middleware: session admission, rate limiting, CORS

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{RequestSubject, SessionAuth};
pub use rate_limit::{InMemoryRateLimiter, RateLimit};
