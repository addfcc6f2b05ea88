//! Session admission state machine
//!
//! Decides, for one request's credentials, whether the caller holds a live
//! session. Transport concerns (headers, cookies) stay in the HTTP layer;
//! this module only sees a [`Credentials`] value and answers with an
//! [`Admission`] or a typed rejection.

mod service;

#[cfg(test)]
mod tests;

pub use service::{Admission, Credentials, SessionService};
