//! Security primitives - password hashing

pub mod bcrypt_hasher;

pub use bcrypt_hasher::BcryptHasher;
