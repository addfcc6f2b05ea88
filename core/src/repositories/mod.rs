//! Ports to external collaborators, implemented by the infrastructure layer.

pub mod revocation;
pub mod user;

pub use revocation::{MockRevocationStore, RevocationStore};
pub use user::{MockUserStore, UserStore};
