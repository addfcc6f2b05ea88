//! Authentication orchestration: registration, login, refresh, logout

mod hasher;
mod service;

#[cfg(test)]
mod tests;

pub use hasher::PasswordHasher;
pub use service::AuthService;
