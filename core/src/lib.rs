//! # Tokengate Core
//!
//! Core business logic and domain layer for the Tokengate server.
//! This crate contains the token issuance and verification service, the
//! session admission state machine, the auth orchestration service, the
//! ports to external collaborators (user store, revocation denylist,
//! password hasher), and the error taxonomy shared by every layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
