//! Core services: token issuance, session admission, auth orchestration.

pub mod auth;
pub mod session;
pub mod token;

pub use auth::{AuthService, PasswordHasher};
pub use session::{Admission, Credentials, SessionService};
pub use token::{Rs256KeyManager, TokenIssuer, TokenIssuerConfig};
