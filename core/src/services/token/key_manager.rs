//! RS256 key management for JWT signing and verification

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{DomainError, TokenError};

/// Manager for the RS256 keypair used in JWT operations
///
/// Loaded once at process start and immutable afterwards. The private key
/// never leaves this type except as an opaque `EncodingKey`; verification
/// only needs the public half, so stateless replicas can be handed the
/// public key alone.
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Path to private key file
    private_key_path: PathBuf,
    /// Path to public key file
    public_key_path: PathBuf,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl Rs256KeyManager {
    /// Creates a new key manager from PEM key file paths
    ///
    /// # Errors
    ///
    /// Returns `TokenError::KeyLoadError` if either file cannot be read or
    /// parsed. This is a startup-time condition, not a per-request error.
    pub fn new<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read(&private_key_path).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Failed to read private key: {}", e),
            })
        })?;

        let encoding_key = EncodingKey::from_rsa_pem(&private_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            })
        })?;

        let public_key_pem = fs::read(&public_key_path).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Failed to read public key: {}", e),
            })
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(&public_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid public key format: {}", e),
            })
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_path,
            public_key_path,
        })
    }

    /// Creates a key manager from environment variables
    ///
    /// Reads `JWT_PRIVATE_KEY_PATH` and `JWT_PUBLIC_KEY_PATH`.
    pub fn from_env() -> Result<Self, DomainError> {
        let private_key_path = std::env::var("JWT_PRIVATE_KEY_PATH")
            .unwrap_or_else(|_| "certs/private.pem".to_string());

        let public_key_path = std::env::var("JWT_PUBLIC_KEY_PATH")
            .unwrap_or_else(|_| "certs/public.pem".to_string());

        Self::new(private_key_path, public_key_path)
    }

    /// Creates a key manager from PEM strings (useful for testing)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            })
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid public key format: {}", e),
            })
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_path: PathBuf::from("memory"),
            public_key_path: PathBuf::from("memory"),
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths to the key files
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}
