//! Password hashing port

use crate::errors::DomainResult;

/// One-way password hashing and verification
///
/// The algorithm is an implementation detail of the infrastructure layer.
/// Both operations are fallible: a corrupt stored hash returns `Err`, it
/// never panics a request.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Verifies a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
